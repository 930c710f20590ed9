//! Graph builder for turning flat relationship records into a FamilyGraph.
//!
//! Building never fails. Unknown IDs just become nodes with no person
//! behind them, which the traversals later skip.

use crate::edge::FamilyEdge;
use crate::graph::FamilyGraph;
use giapha_core::{Person, Relationship};

/// Builds a FamilyGraph from people and relationship edges.
pub struct GraphBuilder {
    graph: FamilyGraph,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            graph: FamilyGraph::new(),
        }
    }

    /// Registers people as nodes so that people without any edge still
    /// show up in the graph.
    pub fn add_people(&mut self, people: &[Person]) -> &mut Self {
        for person in people {
            self.graph.ensure_node(&person.id);
        }
        self
    }

    /// Adds relationship edges, keeping their order.
    pub fn add_relationships(&mut self, relationships: &[Relationship]) -> &mut Self {
        for rel in relationships {
            self.graph.add_edge(
                &rel.person_a_id,
                &rel.person_b_id,
                FamilyEdge::new(rel.kind),
            );
        }
        self
    }

    /// Finishes building and returns the graph.
    pub fn build(self) -> FamilyGraph {
        self.graph
    }
}

impl FamilyGraph {
    /// Builds the graph straight from relationship edges.
    pub fn from_relationships(relationships: &[Relationship]) -> Self {
        let mut builder = GraphBuilder::new();
        builder.add_relationships(relationships);
        builder.build()
    }
}
