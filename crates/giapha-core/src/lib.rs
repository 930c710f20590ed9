//! Gia Pha Core - Family tree data model
//!
//! This crate defines the records the kinship engine and the lineage
//! recalculator consume: people, typed relationship edges, and the
//! snapshot that bundles them for a single computation.
//!
//! # Example
//!
//! ```
//! use giapha_core::{FamilySnapshot, Gender, Person, Relationship};
//!
//! let snapshot = FamilySnapshot::new(
//!     vec![
//!         Person::new("cha", "Nguyễn Văn Cha", Gender::Male),
//!         Person::new("con", "Nguyễn Văn Con", Gender::Male),
//!     ],
//!     vec![Relationship::parent_of("cha", "con")],
//! );
//!
//! assert!(snapshot.validate().is_empty());
//! ```

mod error;
mod model;
mod snapshot;

pub use error::{Result, SnapshotError};
pub use model::{Gender, Person, Relationship, RelationshipKind};
pub use snapshot::{FamilySnapshot, SnapshotIssue};
