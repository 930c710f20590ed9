//! Edge types for the family graph.
//!
//! The graph only needs two kinds of links: parent to child, and
//! spouse to spouse. Adopted and biological children collapse into the
//! same edge kind; the original relationship type rides along for display.

use giapha_core::RelationshipKind;

/// How two people are linked in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Source is the parent, target the child.
    ParentOf,

    /// Marriage. Stored once, read in both directions.
    SpouseOf,
}

impl From<RelationshipKind> for EdgeKind {
    fn from(kind: RelationshipKind) -> Self {
        match kind {
            RelationshipKind::Marriage => EdgeKind::SpouseOf,
            RelationshipKind::BiologicalChild | RelationshipKind::AdoptedChild => {
                EdgeKind::ParentOf
            }
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ParentOf => "parent_of",
            Self::SpouseOf => "spouse_of",
        };
        write!(f, "{}", s)
    }
}

/// An edge in the family graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyEdge {
    /// The graph semantics of the edge.
    pub kind: EdgeKind,

    /// The relationship type it was built from.
    pub source: RelationshipKind,
}

impl FamilyEdge {
    pub fn new(source: RelationshipKind) -> Self {
        Self {
            kind: source.into(),
            source,
        }
    }
}
