//! Snapshot output
//!
//! - [`path`] derives the artifact file name for a `(dataset type, chunk)` pair
//! - [`snapshot`] writes response bodies to those files

use serde::Serialize;
use std::path::PathBuf;

pub mod path;
pub mod snapshot;

pub use path::{artifact_name, human_readable_period};
pub use snapshot::SnapshotWriter;

/// Output writer errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutputError {
    /// Target could not be created or written
    #[error("IO error: {0}")]
    IoError(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A snapshot file written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// File name, as derived by [`artifact_name`]
    pub name: String,
    /// Full path of the file
    pub path: PathBuf,
    /// Number of body bytes written
    pub bytes: u64,
}
