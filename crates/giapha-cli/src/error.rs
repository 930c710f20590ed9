//! CLI error type.

use giapha_core::SnapshotError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("No person matches '{0}'")]
    UnknownPerson(String),

    #[error("'{query}' matches {count} people: {candidates}")]
    AmbiguousPerson {
        query: String,
        count: usize,
        candidates: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
