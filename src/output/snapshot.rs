//! Snapshot writer

use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{artifact_name, Artifact, OutputError, OutputResult};
use crate::{Chunk, DatasetType};

/// Writes response bodies verbatim into one output directory.
///
/// Existing files with the same name are truncated and replaced. Bodies are
/// not parsed or validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotWriter {
    output_dir: PathBuf,
}

impl SnapshotWriter {
    /// Create a writer rooted at `output_dir`. Nothing is touched on disk yet.
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Create the output directory (and parents) if missing
    pub fn ensure_directory(&self) -> OutputResult<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            OutputError::IoError(format!(
                "Failed to create directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }

    /// Path the artifact for `(dataset, chunk)` would be written to
    pub fn artifact_path(&self, dataset: &DatasetType, chunk: &Chunk) -> PathBuf {
        self.output_dir.join(artifact_name(dataset, chunk))
    }

    /// Persist `body` as the artifact for `(dataset, chunk)`
    pub async fn write(
        &self,
        dataset: &DatasetType,
        chunk: &Chunk,
        body: &Bytes,
    ) -> OutputResult<Artifact> {
        let name = artifact_name(dataset, chunk);
        let path = self.output_dir.join(&name);
        debug!(path = %path.display(), bytes = body.len(), "Writing snapshot");

        tokio::fs::write(&path, body).await.map_err(|e| {
            OutputError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })?;

        debug!(dataset = %dataset, path = %path.display(), "Snapshot written");

        Ok(Artifact {
            name,
            path,
            bytes: body.len() as u64,
        })
    }
}
