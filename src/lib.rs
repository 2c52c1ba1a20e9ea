//! # Transparency Data Downloader Library
//!
//! Retrieves public-finance datasets (expenditures, budgetary expenditures,
//! revenues) from a municipal transparency portal's REST API and persists each
//! response as a local JSON snapshot, one file per dataset and period.
//!
//! ## Features
//!
//! - **Period partitioning**: any date window is split into gap-free annual
//!   ranges or single month references, depending on the dataset's contract
//! - **Per-dataset wire formats**: month ranges, day ranges and month
//!   references, each with its own parameter names
//! - **Failure isolation**: a failed request or write skips one period and the
//!   run moves on to the next
//! - **Parallel datasets**: every dataset type runs as its own task while its
//!   periods are fetched strictly in chronological order
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use transparency_data_downloader::downloader::DownloadExecutor;
//! use transparency_data_downloader::DatasetType;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = Arc::new(DownloadExecutor::new("./dados")?);
//! let report = executor
//!     .run(
//!         vec![DatasetType::new("despesa"), DatasetType::new("despesaOrcamentaria")],
//!         NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
//!     )
//!     .await;
//! println!("{} artifacts written", report.artifacts_written());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`period`] - Splits a date window into [`Chunk`]s
//! - [`registry`] - Catalog of dataset types and their [`FormattingGroup`]
//! - [`fetcher`] - Query formatting, URL building and the HTTP fetcher
//! - [`output`] - Artifact naming and snapshot writing
//! - [`downloader`] - Per-dataset jobs and the run orchestration
//! - [`metrics`] - Prometheus-compatible counters

#![warn(missing_docs)]
#![warn(clippy::all)]

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// CLI command implementations
pub mod cli;

/// Download orchestration
pub mod downloader;

/// Query formatting, URL building and HTTP fetching
pub mod fetcher;

/// Process metrics
pub mod metrics;

/// Artifact naming and snapshot writing
pub mod output;

/// Period partitioning
pub mod period;

/// Dataset catalog with formatting groups
pub mod registry;

pub use period::PeriodChunker;
pub use registry::DatasetRegistry;

/// Inclusive calendar date range with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if start > end {
            return Err(format!(
                "Range start ({start}) must not be after range end ({end})"
            ));
        }
        Ok(Self { start, end })
    }

    /// First day of the range
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, both ends included
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `date` falls inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A single calendar month used as a reference period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthReference {
    /// Year (e.g., 2024)
    pub year: i32,
    /// Month (1-12)
    pub month: u32,
}

impl MonthReference {
    /// Month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The following calendar month
    pub fn next(&self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl std::fmt::Display for MonthReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// One unit of date coverage handed to the fetch pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chunk {
    /// Calendar range, used by the annual policy
    Range(DateRange),
    /// Single month, used by the monthly policy
    Reference(MonthReference),
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chunk::Range(range) => write!(f, "{range}"),
            Chunk::Reference(month) => write!(f, "{month}"),
        }
    }
}

/// How a date window is partitioned into chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChunkPolicy {
    /// Ranges of at most 12 months
    Annual,
    /// One month reference per calendar month
    Monthly,
}

/// Date format and parameter contract a dataset type expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormattingGroup {
    /// `periodo_inicial`/`periodo_final` as `MM/YYYY` (expenditures, revenues)
    #[serde(rename = "month_range")]
    MonthRange,
    /// `periodo_inicial`/`periodo_final` as `DD/MM/YYYY` (procurement, contracts)
    #[serde(rename = "day_range")]
    DayRange,
    /// `referencia` as `MM/YYYY` (personnel)
    #[serde(rename = "month_reference")]
    MonthReference,
}

impl FormattingGroup {
    /// Chunking policy implied by the group
    pub fn policy(&self) -> ChunkPolicy {
        match self {
            FormattingGroup::MonthRange | FormattingGroup::DayRange => ChunkPolicy::Annual,
            FormattingGroup::MonthReference => ChunkPolicy::Monthly,
        }
    }
}

impl std::fmt::Display for FormattingGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FormattingGroup::MonthRange => "month_range",
            FormattingGroup::DayRange => "day_range",
            FormattingGroup::MonthReference => "month_reference",
        };
        write!(f, "{s}")
    }
}

impl FromStr for FormattingGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month_range" => Ok(FormattingGroup::MonthRange),
            "day_range" => Ok(FormattingGroup::DayRange),
            "month_reference" => Ok(FormattingGroup::MonthReference),
            _ => Err(format!("Invalid formatting group: {s}")),
        }
    }
}

/// Portal resource identifier, used verbatim as the URL path segment
/// and as the first component of artifact names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetType(String);

impl DatasetType {
    /// Wrap an identifier such as `"despesa"`
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as sent to the portal
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DatasetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DatasetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Dataset type cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }
}
