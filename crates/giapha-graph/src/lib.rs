//! Gia Pha Graph - family relationship graph and kinship inference
//!
//! This crate turns a flat family snapshot into a graph and answers the
//! two questions a genealogy book cares about: what do two members call
//! each other, and which generation and birth order does everyone hold.
//!
//! # Architecture
//!
//! The graph uses petgraph internally, with an ID index on top so the
//! traversals can work on the opaque person IDs of the snapshot:
//! - [`AncestryMap`] walks upward from one person, breadth first
//! - [`lowest_common_ancestor`] joins two walks
//! - the [`kinship`] module maps depths and branches to address terms
//! - [`recalculate_lineage`] recomputes generations and birth orders
//!
//! # Example
//!
//! ```
//! use giapha_core::{Gender, Person, Relationship};
//! use giapha_graph::KinshipEngine;
//!
//! let people = vec![
//!     Person::new("cha", "Nguyễn Văn Cha", Gender::Male),
//!     Person::new("con", "Nguyễn Văn Con", Gender::Male),
//! ];
//! let relationships = vec![Relationship::parent_of("cha", "con")];
//!
//! let engine = KinshipEngine::new(&people, &relationships);
//! let result = engine.compute("con", "cha").unwrap();
//! assert_eq!(result.a_calls_b, "Cha");
//! assert_eq!(result.b_calls_a, "Con trai");
//! ```

mod ancestry;
mod builder;
mod collation;
mod edge;
mod graph;
pub mod kinship;
mod lca;
mod lineage;
mod search_index;

pub use ancestry::{Ancestor, AncestryMap};
pub use builder::GraphBuilder;
pub use collation::{compare_names, fold_diacritics};
pub use edge::{EdgeKind, FamilyEdge};
pub use graph::{index_people, FamilyGraph, GraphStats, NodeId, PersonLookup};
pub use kinship::{
    compute_kinship, EngineConfig, KinshipEngine, KinshipPair, KinshipResult, KinshipTerm,
    Relation, TermLabels, Vietnamese,
};
pub use lca::{lowest_common_ancestor, CommonAncestor, ParseTieBreakError, TieBreak};
pub use lineage::{recalculate_lineage, LineageReport, LineageUpdate};
pub use search_index::SearchIndex;
