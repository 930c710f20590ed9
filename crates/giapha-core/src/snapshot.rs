//! Family snapshots.
//!
//! A snapshot is the fully materialized set of people and relationships the
//! engine works on. Loading one is the only I/O in the system.

use crate::error::{Result, SnapshotError};
use crate::model::{Person, Relationship, RelationshipKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// People and relationships loaded together for one computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySnapshot {
    #[serde(default)]
    pub people: Vec<Person>,

    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// A data inconsistency found in a snapshot.
///
/// Issues are informational. The engine tolerates all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum SnapshotIssue {
    /// An edge whose two ends are the same person.
    SelfRelationship { person_id: String, kind: RelationshipKind },
    /// An edge naming a person that is not in the snapshot.
    DanglingReference { person_id: String, kind: RelationshipKind },
    /// The same pair joined twice by the same relationship type.
    DuplicateEdge {
        person_a_id: String,
        person_b_id: String,
        kind: RelationshipKind,
    },
    /// Two people sharing one ID.
    DuplicatePerson { person_id: String },
    /// A child with more than two recorded parents.
    TooManyParents { person_id: String, parents: usize },
}

impl std::fmt::Display for SnapshotIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfRelationship { person_id, kind } => {
                write!(f, "{} relationship from {} to itself", kind, person_id)
            }
            Self::DanglingReference { person_id, kind } => {
                write!(f, "{} relationship references unknown person {}", kind, person_id)
            }
            Self::DuplicateEdge {
                person_a_id,
                person_b_id,
                kind,
            } => write!(
                f,
                "duplicate {} relationship between {} and {}",
                kind, person_a_id, person_b_id
            ),
            Self::DuplicatePerson { person_id } => {
                write!(f, "person id {} appears more than once", person_id)
            }
            Self::TooManyParents { person_id, parents } => {
                write!(f, "{} has {} recorded parents", person_id, parents)
            }
        }
    }
}

impl FamilySnapshot {
    pub fn new(people: Vec<Person>, relationships: Vec<Relationship>) -> Self {
        Self {
            people,
            relationships,
        }
    }

    /// Parses a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a snapshot from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&contents)?;

        debug!(
            path = %path.display(),
            people = snapshot.people.len(),
            relationships = snapshot.relationships.len(),
            "loaded snapshot"
        );

        Ok(snapshot)
    }

    /// Writes the snapshot as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SnapshotError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Finds a person by ID.
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// Checks the snapshot for the inconsistencies the store is supposed
    /// to prevent. Each issue is also logged at warn level.
    pub fn validate(&self) -> Vec<SnapshotIssue> {
        let mut issues = Vec::new();

        let mut ids = HashSet::new();
        for person in &self.people {
            if !ids.insert(person.id.as_str()) {
                issues.push(SnapshotIssue::DuplicatePerson {
                    person_id: person.id.clone(),
                });
            }
        }

        let mut seen_edges = HashSet::new();
        let mut parent_counts: HashMap<&str, usize> = HashMap::new();

        for rel in &self.relationships {
            if rel.is_self_loop() {
                issues.push(SnapshotIssue::SelfRelationship {
                    person_id: rel.person_a_id.clone(),
                    kind: rel.kind,
                });
                continue;
            }

            for id in [&rel.person_a_id, &rel.person_b_id] {
                if !ids.contains(id.as_str()) {
                    issues.push(SnapshotIssue::DanglingReference {
                        person_id: id.clone(),
                        kind: rel.kind,
                    });
                }
            }

            // Marriage is unordered, parent edges are ordered.
            let key = if rel.kind == RelationshipKind::Marriage
                && rel.person_b_id < rel.person_a_id
            {
                (rel.kind, rel.person_b_id.as_str(), rel.person_a_id.as_str())
            } else {
                (rel.kind, rel.person_a_id.as_str(), rel.person_b_id.as_str())
            };
            if !seen_edges.insert(key) {
                issues.push(SnapshotIssue::DuplicateEdge {
                    person_a_id: rel.person_a_id.clone(),
                    person_b_id: rel.person_b_id.clone(),
                    kind: rel.kind,
                });
                continue;
            }

            if rel.kind.is_parent_child() {
                *parent_counts.entry(rel.person_b_id.as_str()).or_default() += 1;
            }
        }

        let mut crowded: Vec<(&str, usize)> = parent_counts
            .into_iter()
            .filter(|(_, count)| *count > 2)
            .collect();
        crowded.sort();
        for (id, parents) in crowded {
            issues.push(SnapshotIssue::TooManyParents {
                person_id: id.to_string(),
                parents,
            });
        }

        for issue in &issues {
            warn!("snapshot issue: {}", issue);
        }

        issues
    }
}
