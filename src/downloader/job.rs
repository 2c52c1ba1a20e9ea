//! Dataset jobs and run reports

use crate::output::Artifact;
use crate::period::{Chunks, PeriodChunker};
use crate::{Chunk, DatasetType, FormattingGroup};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything one dataset task needs: its type, group and date window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetJob {
    /// Dataset type (portal path segment)
    pub dataset: DatasetType,
    /// Formatting group resolved from the registry
    pub group: FormattingGroup,
    /// First day of the window
    pub start: NaiveDate,
    /// Last day of the window (inclusive)
    pub end: NaiveDate,
}

impl DatasetJob {
    /// Create a job
    pub fn new(
        dataset: DatasetType,
        group: FormattingGroup,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            dataset,
            group,
            start,
            end,
        }
    }

    /// Validate job parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.start > self.end {
            return Err(format!(
                "Start date ({}) must not be after end date ({})",
                self.start, self.end
            ));
        }
        if self.dataset.as_str().trim().is_empty() {
            return Err("Dataset type cannot be empty".to_string());
        }
        Ok(())
    }

    /// Chronological chunk sequence for this job, restartable
    pub fn chunks(&self) -> Chunks {
        PeriodChunker::new(self.start, self.end, self.group.policy()).chunks()
    }
}

/// Dataset task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DatasetStatus {
    /// Not started yet
    #[default]
    Pending,
    /// Chunks are being processed
    InProgress,
    /// Every chunk was attempted
    Completed,
    /// The dataset type has no formatting group, nothing was attempted
    Unsupported,
    /// The task ended abnormally before finishing its chunks
    Failed,
}

impl std::fmt::Display for DatasetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DatasetStatus::Pending => "pending",
            DatasetStatus::InProgress => "in progress",
            DatasetStatus::Completed => "completed",
            DatasetStatus::Unsupported => "unsupported",
            DatasetStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// What happened to one chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Body fetched and stored
    Written(Artifact),
    /// A stage failed; the chunk was skipped
    Skipped {
        /// Failing stage (`format`, `url`, `fetch`, `write`)
        stage: String,
        /// Error message
        reason: String,
    },
}

/// Outcome of one chunk, labelled by its period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkOutcome {
    /// Chunk period as displayed in logs (`2022-01-01..2022-12-31`, `03/2023`)
    pub chunk: String,
    /// Result
    #[serde(flatten)]
    pub kind: OutcomeKind,
}

impl ChunkOutcome {
    /// Successful write
    pub fn written(chunk: &Chunk, artifact: Artifact) -> Self {
        Self {
            chunk: chunk.to_string(),
            kind: OutcomeKind::Written(artifact),
        }
    }

    /// Skipped chunk
    pub fn skipped(chunk: &Chunk, stage: &str, reason: impl Into<String>) -> Self {
        Self {
            chunk: chunk.to_string(),
            kind: OutcomeKind::Skipped {
                stage: stage.to_string(),
                reason: reason.into(),
            },
        }
    }

    /// Whether the artifact was written
    pub fn is_written(&self) -> bool {
        matches!(self.kind, OutcomeKind::Written(_))
    }
}

/// Per-dataset summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetReport {
    /// Dataset type
    pub dataset: DatasetType,
    /// Final status
    pub status: DatasetStatus,
    /// Chunks produced for the window
    pub chunks_total: u64,
    /// Chunks written
    pub written: u64,
    /// Chunks skipped
    pub skipped: u64,
    /// Bytes written across all artifacts
    pub bytes_written: u64,
    /// Why the dataset ended `Unsupported` or `Failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-chunk outcomes in chronological order
    pub outcomes: Vec<ChunkOutcome>,
}

impl DatasetReport {
    /// Empty report in `Pending` state
    pub fn new(dataset: DatasetType) -> Self {
        Self {
            dataset,
            status: DatasetStatus::Pending,
            chunks_total: 0,
            written: 0,
            skipped: 0,
            bytes_written: 0,
            error: None,
            outcomes: Vec::new(),
        }
    }

    /// Report for a dataset that ended before processing chunks
    pub fn ended(dataset: DatasetType, status: DatasetStatus, error: impl Into<String>) -> Self {
        Self {
            status,
            error: Some(error.into()),
            ..Self::new(dataset)
        }
    }

    /// Append a chunk outcome and update counters
    pub fn push(&mut self, outcome: ChunkOutcome) {
        match &outcome.kind {
            OutcomeKind::Written(artifact) => {
                self.written += 1;
                self.bytes_written += artifact.bytes;
            }
            OutcomeKind::Skipped { .. } => self.skipped += 1,
        }
        self.outcomes.push(outcome);
    }
}

/// Whole-run summary, datasets in configured order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct RunReport {
    /// One report per configured dataset type
    pub datasets: Vec<DatasetReport>,
}

impl RunReport {
    /// Artifacts written across all datasets
    pub fn artifacts_written(&self) -> u64 {
        self.datasets.iter().map(|d| d.written).sum()
    }

    /// Chunks skipped across all datasets
    pub fn chunks_skipped(&self) -> u64 {
        self.datasets.iter().map(|d| d.skipped).sum()
    }

    /// Bytes written across all datasets
    pub fn bytes_written(&self) -> u64 {
        self.datasets.iter().map(|d| d.bytes_written).sum()
    }

    /// Whether every dataset completed and no chunk was skipped
    pub fn is_clean(&self) -> bool {
        self.datasets
            .iter()
            .all(|d| d.status == DatasetStatus::Completed && d.skipped == 0)
    }
}
