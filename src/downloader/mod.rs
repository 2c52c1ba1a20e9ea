//! Download orchestration
//!
//! The downloader drives every configured dataset type through the chunk
//! pipeline:
//!
//! 1. **Job creation**: [`job::DatasetJob`] pairs a dataset type with its
//!    formatting group and the global date window
//! 2. **Execution**: [`executor::DownloadExecutor`] walks the job's chunks in
//!    chronological order, running format, URL build, fetch and write for each
//! 3. **Reporting**: every chunk ends up as a [`job::ChunkOutcome`], collected
//!    into a [`job::DatasetReport`] and finally a [`job::RunReport`]
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use transparency_data_downloader::downloader::DownloadExecutor;
//! use transparency_data_downloader::DatasetType;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = Arc::new(DownloadExecutor::new("./dados")?.with_unit_code("2"));
//! let report = executor
//!     .run(
//!         vec![DatasetType::new("despesa")],
//!         NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
//!     )
//!     .await;
//! assert_eq!(report.datasets.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Errors raised while processing one chunk are [`DownloadError`]s. They never
//! escape the executor: each one becomes a skipped chunk and the loop moves on.
//! Only [`DownloadError::Validation`] is raised to callers, from setup.

use crate::fetcher::{FetcherError, QueryError};
use crate::output::OutputError;

pub mod config;
pub mod executor;
pub mod job;
pub mod progress;

pub use executor::DownloadExecutor;
pub use job::{ChunkOutcome, DatasetJob, DatasetReport, DatasetStatus, OutcomeKind, RunReport};
pub use progress::DatasetProgress;

/// Download errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DownloadError {
    /// Query formatting or URL construction failed
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// HTTP request failed
    #[error("fetch error: {0}")]
    Fetch(#[from] FetcherError),

    /// Snapshot could not be written
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// Invalid executor setup or run arguments
    #[error("validation error: {0}")]
    Validation(String),
}

impl DownloadError {
    /// Pipeline stage that raised the error, used as a report and metrics label
    pub fn stage(&self) -> &'static str {
        match self {
            DownloadError::Query(QueryError::UnsupportedDatasetType { .. }) => "format",
            DownloadError::Query(QueryError::MalformedUrl { .. }) => "url",
            DownloadError::Fetch(_) => "fetch",
            DownloadError::Output(_) => "write",
            DownloadError::Validation(_) => "validation",
        }
    }
}
