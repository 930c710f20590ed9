//! Lowest common ancestor search over two ancestry maps.

use crate::ancestry::{Ancestor, AncestryMap};
use giapha_core::Person;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// How to choose between common ancestors at the same total distance.
///
/// Ties only happen in consanguineous or remarried families.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The first tied ancestor in A's BFS order.
    #[default]
    FirstFound,

    /// The tied ancestor with the smallest ID. Independent of argument order.
    LowestId,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown tie-break policy '{0}' (expected first_found or lowest_id)")]
pub struct ParseTieBreakError(String);

impl std::str::FromStr for TieBreak {
    type Err = ParseTieBreakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_found" | "first-found" => Ok(TieBreak::FirstFound),
            "lowest_id" | "lowest-id" => Ok(TieBreak::LowestId),
            other => Err(ParseTieBreakError(other.to_string())),
        }
    }
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TieBreak::FirstFound => write!(f, "first_found"),
            TieBreak::LowestId => write!(f, "lowest_id"),
        }
    }
}

/// The chosen common ancestor, seen from both sides.
#[derive(Debug, Clone, Copy)]
pub struct CommonAncestor<'m, 'a> {
    /// The ancestor as reached from A.
    pub from_a: &'m Ancestor<'a>,
    /// The same ancestor as reached from B.
    pub from_b: &'m Ancestor<'a>,
}

impl<'m, 'a> CommonAncestor<'m, 'a> {
    pub fn person(&self) -> &'a Person {
        self.from_a.person
    }

    /// Total generations between A and B through this ancestor.
    pub fn distance(&self) -> usize {
        self.from_a.depth + self.from_b.depth
    }
}

/// Finds the common ancestor minimizing `depthA + depthB`.
///
/// Returns `None` when the two maps share no person.
pub fn lowest_common_ancestor<'m, 'a>(
    a: &'m AncestryMap<'a>,
    b: &'m AncestryMap<'a>,
    tie_break: TieBreak,
) -> Option<CommonAncestor<'m, 'a>> {
    let mut best: Option<CommonAncestor<'m, 'a>> = None;

    for from_a in a.iter() {
        let Some(from_b) = b.get(&from_a.person.id) else {
            continue;
        };
        let candidate = CommonAncestor { from_a, from_b };

        let better = match &best {
            None => true,
            Some(current) => match candidate.distance().cmp(&current.distance()) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Equal => {
                    tie_break == TieBreak::LowestId
                        && candidate.person().id < current.person().id
                }
                std::cmp::Ordering::Greater => false,
            },
        };
        if better {
            best = Some(candidate);
        }
    }

    if let Some(found) = &best {
        debug!(
            ancestor = %found.person().id,
            depth_a = found.from_a.depth,
            depth_b = found.from_b.depth,
            "lowest common ancestor"
        );
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{index_people, FamilyGraph};
    use giapha_core::{Gender, Relationship};

    fn people(ids: &[&str]) -> Vec<Person> {
        ids.iter()
            .map(|id| Person::new(*id, id.to_uppercase(), Gender::Male))
            .collect()
    }

    #[test]
    fn test_cousins_meet_at_grandparent() {
        let people = people(&["g", "p1", "p2", "c1", "c2"]);
        let graph = FamilyGraph::from_relationships(&[
            Relationship::parent_of("g", "p1"),
            Relationship::parent_of("g", "p2"),
            Relationship::parent_of("p1", "c1"),
            Relationship::parent_of("p2", "c2"),
        ]);
        let lookup = index_people(&people);

        let a = AncestryMap::walk("c1", &graph, &lookup);
        let b = AncestryMap::walk("c2", &graph, &lookup);
        let lca = lowest_common_ancestor(&a, &b, TieBreak::FirstFound).unwrap();

        assert_eq!(lca.person().id, "g");
        assert_eq!(lca.from_a.depth, 2);
        assert_eq!(lca.from_b.depth, 2);
        assert_eq!(lca.distance(), 4);
    }

    #[test]
    fn test_ancestor_is_its_own_lca() {
        let people = people(&["g", "p", "c"]);
        let graph = FamilyGraph::from_relationships(&[
            Relationship::parent_of("g", "p"),
            Relationship::parent_of("p", "c"),
        ]);
        let lookup = index_people(&people);

        let a = AncestryMap::walk("g", &graph, &lookup);
        let b = AncestryMap::walk("c", &graph, &lookup);
        let lca = lowest_common_ancestor(&a, &b, TieBreak::FirstFound).unwrap();

        assert_eq!(lca.person().id, "g");
        assert_eq!(lca.from_a.depth, 0);
        assert_eq!(lca.from_b.depth, 2);
    }

    #[test]
    fn test_disjoint_maps() {
        let people = people(&["a", "b"]);
        let graph = FamilyGraph::new();
        let lookup = index_people(&people);

        let a = AncestryMap::walk("a", &graph, &lookup);
        let b = AncestryMap::walk("b", &graph, &lookup);
        assert!(lowest_common_ancestor(&a, &b, TieBreak::FirstFound).is_none());
    }

    #[test]
    fn test_tie_break_policies() {
        // Full siblings: both parents tie at distance 2.
        let people = people(&["zcha", "ame", "x", "y"]);
        let graph = FamilyGraph::from_relationships(&[
            Relationship::parent_of("zcha", "x"),
            Relationship::parent_of("ame", "x"),
            Relationship::parent_of("zcha", "y"),
            Relationship::parent_of("ame", "y"),
        ]);
        let lookup = index_people(&people);

        let a = AncestryMap::walk("x", &graph, &lookup);
        let b = AncestryMap::walk("y", &graph, &lookup);

        let first = lowest_common_ancestor(&a, &b, TieBreak::FirstFound).unwrap();
        assert_eq!(first.person().id, "zcha");

        let lowest = lowest_common_ancestor(&a, &b, TieBreak::LowestId).unwrap();
        assert_eq!(lowest.person().id, "ame");
    }

    #[test]
    fn test_parse_tie_break() {
        assert_eq!("lowest_id".parse::<TieBreak>(), Ok(TieBreak::LowestId));
        assert_eq!("first-found".parse::<TieBreak>(), Ok(TieBreak::FirstFound));
        assert!("random".parse::<TieBreak>().is_err());
    }
}
