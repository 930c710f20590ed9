//! Core graph data structure.
//!
//! FamilyGraph wraps petgraph and keeps an ID index so that the
//! adjacency views (parents, children, spouses) can be looked up by the
//! opaque person IDs the rest of the system uses.

use crate::edge::{EdgeKind, FamilyEdge};
use giapha_core::Person;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a node in the graph.
pub type NodeId = NodeIndex;

/// People keyed by ID, borrowed from a snapshot.
pub type PersonLookup<'a> = HashMap<&'a str, &'a Person>;

/// Builds a lookup from a person list. The first person with a given ID wins.
pub fn index_people(people: &[Person]) -> PersonLookup<'_> {
    let mut lookup = HashMap::with_capacity(people.len());
    for person in people {
        lookup.entry(person.id.as_str()).or_insert(person);
    }
    lookup
}

/// The family relationship graph.
///
/// Nodes are person IDs. Any ID named by an edge gets a node, whether or
/// not the person exists in the snapshot.
#[derive(Debug, Default)]
pub struct FamilyGraph {
    pub(crate) graph: DiGraph<String, FamilyEdge>,

    /// Maps person IDs to graph node indexes.
    id_index: HashMap<String, NodeId>,
}

impl FamilyGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node for an ID, adding it if needed.
    pub fn ensure_node(&mut self, id: &str) -> NodeId {
        if let Some(index) = self.id_index.get(id) {
            return *index;
        }
        let index = self.graph.add_node(id.to_string());
        self.id_index.insert(id.to_string(), index);
        index
    }

    /// Adds an edge between two people.
    pub fn add_edge(&mut self, from: &str, to: &str, edge: FamilyEdge) {
        let from = self.ensure_node(from);
        let to = self.ensure_node(to);
        self.graph.add_edge(from, to, edge);
    }

    /// Gets the node index for a person ID.
    pub fn get_index(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    /// Parents of a person, in edge insertion order.
    pub fn parents_of(&self, id: &str) -> Vec<&str> {
        self.linked(id, EdgeKind::ParentOf, &[Direction::Incoming])
    }

    /// Children of a person, in edge insertion order.
    pub fn children_of(&self, id: &str) -> Vec<&str> {
        self.linked(id, EdgeKind::ParentOf, &[Direction::Outgoing])
    }

    /// Spouses of a person, whichever side of the marriage they were
    /// recorded on, in edge insertion order.
    pub fn spouses_of(&self, id: &str) -> Vec<&str> {
        self.linked(
            id,
            EdgeKind::SpouseOf,
            &[Direction::Outgoing, Direction::Incoming],
        )
    }

    /// True if a marriage edge joins the two people.
    pub fn are_married(&self, a: &str, b: &str) -> bool {
        self.spouses_of(a).contains(&b)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Neighbours over edges of one kind.
    ///
    /// petgraph walks adjacency lists newest-first, so results are sorted
    /// back into insertion order. Ancestry BFS order depends on it.
    fn linked(&self, id: &str, kind: EdgeKind, directions: &[Direction]) -> Vec<&str> {
        let Some(index) = self.get_index(id) else {
            return Vec::new();
        };

        let mut found: Vec<(EdgeIndex, NodeId)> = Vec::new();
        for &direction in directions {
            for edge_ref in self.graph.edges_directed(index, direction) {
                if edge_ref.weight().kind != kind {
                    continue;
                }
                let neighbor = match direction {
                    Direction::Incoming => edge_ref.source(),
                    Direction::Outgoing => edge_ref.target(),
                };
                found.push((edge_ref.id(), neighbor));
            }
        }
        found.sort_by_key(|(edge, _)| *edge);

        found
            .into_iter()
            .filter_map(|(_, node)| self.graph.node_weight(node).map(String::as_str))
            .collect()
    }
}

/// Graph statistics for the status command.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub parent_edges: usize,
    pub marriages: usize,
}

impl FamilyGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        let marriages = self
            .graph
            .edge_weights()
            .filter(|edge| edge.kind == EdgeKind::SpouseOf)
            .count();

        GraphStats {
            node_count: self.node_count(),
            parent_edges: self.edge_count() - marriages,
            marriages,
        }
    }
}
