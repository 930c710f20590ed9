//! People and relationship edges.
//!
//! These are read-only projections of what the persistence layer stores.
//! Field names serialize in camelCase to match the stored records.

use serde::{Deserialize, Serialize};

/// Gender of a person. Drives term selection everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Kinship rules branch on "is male"; every other gender takes the
    /// female-side branch.
    pub fn is_male(self) -> bool {
        self == Gender::Male
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// A member of the family tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Opaque unique identifier.
    pub id: String,

    /// Display name. Never used for identity.
    pub full_name: String,

    pub gender: Gender,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,

    /// Rank among siblings sharing a parent. First-born is 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_order: Option<u32>,

    /// Depth from the family roots. Derived data, recomputed by the
    /// lineage recalculator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<u32>,

    /// Entered the family by marriage rather than by birth.
    #[serde(default)]
    pub is_in_law: bool,
}

impl Person {
    /// Creates a person with no birth data.
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            gender,
            birth_year: None,
            birth_order: None,
            generation: None,
            is_in_law: false,
        }
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    pub fn with_birth_order(mut self, order: u32) -> Self {
        self.birth_order = Some(order);
        self
    }

    pub fn with_generation(mut self, generation: u32) -> Self {
        self.generation = Some(generation);
        self
    }

    /// Marks the person as having married into the family.
    pub fn in_law(mut self) -> Self {
        self.is_in_law = true;
        self
    }
}

/// The type of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// Undirected; either side may be A.
    Marriage,

    /// A is the parent, B the child.
    BiologicalChild,

    /// Same graph semantics as `BiologicalChild`, kept for display.
    AdoptedChild,
}

impl RelationshipKind {
    /// True for both biological and adopted parent edges.
    pub fn is_parent_child(self) -> bool {
        matches!(self, Self::BiologicalChild | Self::AdoptedChild)
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Marriage => "marriage",
            Self::BiologicalChild => "biological_child",
            Self::AdoptedChild => "adopted_child",
        };
        write!(f, "{}", s)
    }
}

/// A typed edge between two people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(rename = "type")]
    pub kind: RelationshipKind,

    pub person_a_id: String,

    pub person_b_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Relationship {
    /// Creates a new edge.
    pub fn new(
        kind: RelationshipKind,
        person_a_id: impl Into<String>,
        person_b_id: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            person_a_id: person_a_id.into(),
            person_b_id: person_b_id.into(),
            note: None,
        }
    }

    pub fn marriage(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::new(RelationshipKind::Marriage, a, b)
    }

    pub fn parent_of(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self::new(RelationshipKind::BiologicalChild, parent, child)
    }

    pub fn adopted(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self::new(RelationshipKind::AdoptedChild, parent, child)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// True if both ends name the same person.
    pub fn is_self_loop(&self) -> bool {
        self.person_a_id == self.person_b_id
    }
}
