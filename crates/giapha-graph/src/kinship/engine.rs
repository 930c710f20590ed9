//! The kinship engine entry point.
//!
//! Stateless per call. The engine borrows a snapshot, builds its own
//! graph once, and answers any number of queries against it.

use super::in_law::to_in_law;
use super::labels::{TermLabels, Vietnamese};
use super::resolver::{resolve, Lineage, Resolution};
use super::term::{KinshipTerm, Relation};
use crate::ancestry::AncestryMap;
use crate::builder::GraphBuilder;
use crate::graph::{index_people, FamilyGraph, PersonLookup};
use crate::lca::{lowest_common_ancestor, TieBreak};
use giapha_core::{FamilySnapshot, Person, Relationship};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Engine settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Policy for common ancestors tied on total distance.
    pub tie_break: TieBreak,
}

/// What A and B call each other, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinshipResult {
    /// What A calls B.
    pub a_calls_b: String,
    /// What B calls A.
    pub b_calls_a: String,
    pub description: String,
    /// 0 for spouses, -1 for no relation, otherwise generations through the
    /// common ancestor.
    pub distance: i32,
    /// Step-by-step explanation of the path taken.
    pub path_labels: Vec<String>,
    pub a_term: KinshipTerm,
    pub b_term: KinshipTerm,
    pub relation: Relation,
    /// True when the relation goes through a spouse.
    pub via_marriage: bool,
}

impl KinshipResult {
    /// True for the "Người dưng" sentinel.
    pub fn is_unrelated(&self) -> bool {
        self.relation == Relation::Unrelated
    }
}

/// One ordered pair from [`KinshipEngine::matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinshipPair {
    pub a_id: String,
    pub b_id: String,
    #[serde(flatten)]
    pub result: KinshipResult,
}

/// Blood kinship between two people through their common ancestor.
struct BloodLine<'a> {
    resolution: Resolution,
    ancestor: &'a Person,
    depth_a: usize,
    depth_b: usize,
}

impl BloodLine<'_> {
    fn distance(&self) -> i32 {
        (self.depth_a + self.depth_b) as i32
    }
}

/// Which side of the query married into the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InLawSide {
    A,
    B,
}

/// Computes kinship terms over one family snapshot.
pub struct KinshipEngine<'a, L = Vietnamese> {
    people: PersonLookup<'a>,
    graph: FamilyGraph,
    config: EngineConfig,
    labels: L,
}

impl<'a> KinshipEngine<'a, Vietnamese> {
    /// Creates an engine with default settings and Vietnamese labels.
    pub fn new(people: &'a [Person], relationships: &[Relationship]) -> Self {
        let mut builder = GraphBuilder::new();
        builder.add_people(people).add_relationships(relationships);

        Self {
            people: index_people(people),
            graph: builder.build(),
            config: EngineConfig::default(),
            labels: Vietnamese,
        }
    }

    pub fn from_snapshot(snapshot: &'a FamilySnapshot) -> Self {
        Self::new(&snapshot.people, &snapshot.relationships)
    }
}

impl<'a, L: TermLabels> KinshipEngine<'a, L> {
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Swaps the label set, keeping the graph.
    pub fn with_labels<M: TermLabels>(self, labels: M) -> KinshipEngine<'a, M> {
        KinshipEngine {
            people: self.people,
            graph: self.graph,
            config: self.config,
            labels,
        }
    }

    pub fn graph(&self) -> &FamilyGraph {
        &self.graph
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// What `a_id` and `b_id` call each other.
    ///
    /// Returns `None` when both IDs are the same person. Unknown IDs and
    /// disconnected people get the "no relation" result.
    pub fn compute(&self, a_id: &str, b_id: &str) -> Option<KinshipResult> {
        if a_id == b_id {
            return None;
        }

        let (Some(&a), Some(&b)) = (self.people.get(a_id), self.people.get(b_id)) else {
            debug!(a = a_id, b = b_id, "person not in snapshot");
            return Some(self.stranger());
        };

        if self.graph.are_married(a_id, b_id) {
            debug!(a = a_id, b = b_id, "direct marriage");
            return Some(self.marriage(a, b));
        }

        if let Some(line) = self.blood_line(a, b) {
            return Some(self.blood_result(a, b, line));
        }

        for spouse_id in self.graph.spouses_of(a_id) {
            if spouse_id == b_id || spouse_id == a_id {
                continue;
            }
            let Some(&spouse) = self.people.get(spouse_id) else {
                continue;
            };
            if let Some(line) = self.blood_line(spouse, b) {
                debug!(in_law = a_id, spouse = spouse_id, "related through A's spouse");
                return Some(self.in_law_result(InLawSide::A, a, spouse, b, line));
            }
        }

        for spouse_id in self.graph.spouses_of(b_id) {
            if spouse_id == a_id || spouse_id == b_id {
                continue;
            }
            let Some(&spouse) = self.people.get(spouse_id) else {
                continue;
            };
            if let Some(line) = self.blood_line(a, spouse) {
                debug!(in_law = b_id, spouse = spouse_id, "related through B's spouse");
                return Some(self.in_law_result(InLawSide::B, a, spouse, b, line));
            }
        }

        debug!(a = a_id, b = b_id, "no relation found");
        Some(self.stranger())
    }

    /// Computes every ordered pair among `ids`, skipping self-pairs.
    pub fn matrix(&self, ids: &[&str]) -> Vec<KinshipPair> {
        let mut pairs = Vec::with_capacity(ids.len() * ids.len().saturating_sub(1));
        for a_id in ids {
            for b_id in ids {
                if let Some(result) = self.compute(a_id, b_id) {
                    pairs.push(KinshipPair {
                        a_id: a_id.to_string(),
                        b_id: b_id.to_string(),
                        result,
                    });
                }
            }
        }
        pairs
    }

    fn blood_line(&self, a: &'a Person, b: &'a Person) -> Option<BloodLine<'a>> {
        let a_map = AncestryMap::walk(&a.id, &self.graph, &self.people);
        let b_map = AncestryMap::walk(&b.id, &self.graph, &self.people);
        let common = lowest_common_ancestor(&a_map, &b_map, self.config.tie_break)?;

        Some(BloodLine {
            resolution: resolve(&Lineage::from(common.from_a), &Lineage::from(common.from_b)),
            ancestor: common.person(),
            depth_a: common.from_a.depth,
            depth_b: common.from_b.depth,
        })
    }

    fn blood_path(&self, a: &Person, b: &Person, line: &BloodLine<'_>) -> Vec<String> {
        vec![
            self.labels.generations_from(a, line.ancestor, line.depth_a),
            self.labels.generations_from(b, line.ancestor, line.depth_b),
        ]
    }

    fn blood_result(&self, a: &Person, b: &Person, line: BloodLine<'_>) -> KinshipResult {
        let path = self.blood_path(a, b, &line);
        self.finish(
            line.resolution.a_calls_b,
            line.resolution.b_calls_a,
            line.resolution.relation,
            false,
            line.distance(),
            path,
        )
    }

    /// Builds the result when `side` is only related through `spouse`.
    /// The blood line runs between `spouse` and the other party.
    fn in_law_result(
        &self,
        side: InLawSide,
        a: &Person,
        spouse: &Person,
        b: &Person,
        line: BloodLine<'_>,
    ) -> KinshipResult {
        let Resolution {
            a_calls_b,
            b_calls_a,
            relation,
        } = line.resolution;

        let (a_term, b_term, path) = match side {
            InLawSide::A => {
                let mut path = vec![self.labels.married_to(a, spouse)];
                path.extend(self.blood_path(spouse, b, &line));
                (a_calls_b, to_in_law(b_calls_a, a.gender), path)
            }
            InLawSide::B => {
                let mut path = self.blood_path(a, spouse, &line);
                path.push(self.labels.married_to(b, spouse));
                (to_in_law(a_calls_b, b.gender), b_calls_a, path)
            }
        };

        self.finish(a_term, b_term, relation, true, line.distance(), path)
    }

    fn marriage(&self, a: &Person, b: &Person) -> KinshipResult {
        self.finish(
            KinshipTerm::Spouse { gender: b.gender },
            KinshipTerm::Spouse { gender: a.gender },
            Relation::Spouses,
            false,
            0,
            vec![self.labels.married_to(a, b)],
        )
    }

    fn stranger(&self) -> KinshipResult {
        self.finish(
            KinshipTerm::Stranger,
            KinshipTerm::Stranger,
            Relation::Unrelated,
            false,
            -1,
            Vec::new(),
        )
    }

    fn finish(
        &self,
        a_term: KinshipTerm,
        b_term: KinshipTerm,
        relation: Relation,
        via_marriage: bool,
        distance: i32,
        path_labels: Vec<String>,
    ) -> KinshipResult {
        KinshipResult {
            a_calls_b: self.labels.term(&a_term),
            b_calls_a: self.labels.term(&b_term),
            description: self.labels.relation(relation, via_marriage),
            distance,
            path_labels,
            a_term,
            b_term,
            relation,
            via_marriage,
        }
    }
}

/// One-shot kinship query with default settings.
pub fn compute_kinship(
    a_id: &str,
    b_id: &str,
    people: &[Person],
    relationships: &[Relationship],
) -> Option<KinshipResult> {
    KinshipEngine::new(people, relationships).compute(a_id, b_id)
}
