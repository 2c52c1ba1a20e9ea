//! Download command implementation

use crate::downloader::config::{default_window, DEFAULT_UNIT_CODE, DEFAULT_YEARS_BACK};
use crate::downloader::{
    DatasetProgress, DatasetReport, DownloadExecutor, OutcomeKind, RunReport,
};
use crate::fetcher::url::DEFAULT_BASE_URL;
use crate::output::SnapshotWriter;
use crate::registry::DatasetRegistry;
use crate::{DatasetType, FormattingGroup};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use super::CliError;

/// Parse a `YYYY-MM-DD` date flag
fn parse_date(input: &str, flag: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| CliError::InvalidArgument(format!("Invalid {flag} '{input}': {e}")))
}

/// Transparency Data Downloader CLI
#[derive(Parser, Debug)]
#[command(name = "transparency-data-downloader")]
#[command(
    about = "Download public-finance snapshots from a municipal transparency portal",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json or human)
    #[arg(long, global = true, default_value = "human")]
    pub output_format: OutputFormat,

    /// Serve Prometheus metrics on this address (e.g. 127.0.0.1:9090)
    #[arg(long, global = true)]
    pub metrics_addr: Option<SocketAddr>,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download dataset snapshots
    Download(DownloadArgs),

    /// List known dataset types and their formatting groups
    Datasets(super::DatasetsCommand),
}

/// Download command arguments
#[derive(Parser, Debug)]
pub struct DownloadArgs {
    /// Dataset type to download (repeatable; defaults to the registry's default set)
    #[arg(long = "dataset")]
    pub datasets: Vec<DatasetType>,

    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day of the window (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Full years before the current one covered when --start-date is omitted
    #[arg(long, default_value_t = DEFAULT_YEARS_BACK)]
    pub years_back: u32,

    /// Portal API base URL
    #[arg(long, env = "PORTAL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Administrative unit code sent as `codigo_unidade`
    #[arg(long, env = "PORTAL_UNIT_CODE", default_value = DEFAULT_UNIT_CODE)]
    pub unit_code: String,

    /// Directory snapshots are written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Register a dataset type queried by single reference month (repeatable)
    #[arg(long = "reference-dataset")]
    pub reference_datasets: Vec<DatasetType>,

    /// Register a dataset type queried by day-precision range (repeatable)
    #[arg(long = "day-range-dataset")]
    pub day_range_datasets: Vec<DatasetType>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Human,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

impl DownloadArgs {
    /// Resolve the date window against `today`
    pub fn resolve_window(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), CliError> {
        let end = match &self.end_date {
            Some(input) => parse_date(input, "--end-date")?,
            None => today,
        };
        let start = match &self.start_date {
            Some(input) => parse_date(input, "--start-date")?,
            None => default_window(end, self.years_back)
                .map(|(start, _)| start)
                .ok_or_else(|| {
                    CliError::InvalidArgument(format!(
                        "--years-back {} is out of range",
                        self.years_back
                    ))
                })?,
        };

        if start > end {
            return Err(CliError::InvalidArgument(format!(
                "Start date ({start}) must not be after end date ({end})"
            )));
        }
        Ok((start, end))
    }

    /// Registry extended with the ad-hoc reserved-group types
    pub fn build_registry(&self, base: DatasetRegistry) -> DatasetRegistry {
        let registry = self
            .reference_datasets
            .iter()
            .fold(base, |registry, id| {
                registry.with_dataset(id.clone(), FormattingGroup::MonthReference)
            });
        self.day_range_datasets.iter().fold(registry, |registry, id| {
            registry.with_dataset(id.clone(), FormattingGroup::DayRange)
        })
    }

    /// Dataset types to run, in order.
    ///
    /// Explicit `--dataset` values, or the registry defaults, followed by any
    /// ad-hoc registered types not already listed.
    pub fn resolve_datasets(&self, registry: &DatasetRegistry) -> Result<Vec<DatasetType>, CliError> {
        let mut datasets = if self.datasets.is_empty() {
            registry.default_datasets().to_vec()
        } else {
            self.datasets.clone()
        };

        for extra in self
            .reference_datasets
            .iter()
            .chain(self.day_range_datasets.iter())
        {
            if !datasets.contains(extra) {
                datasets.push(extra.clone());
            }
        }

        if datasets.is_empty() {
            return Err(CliError::ConfigurationError(
                "No dataset types to download".to_string(),
            ));
        }
        Ok(datasets)
    }

    /// Run the download and print the report
    pub async fn execute(&self, cli: &Cli) -> Result<RunReport, CliError> {
        let today = Local::now().date_naive();
        let (start, end) = self.resolve_window(today)?;

        let base = DatasetRegistry::load()
            .map_err(|e| CliError::ConfigurationError(e.to_string()))?
            .clone();
        let registry = self.build_registry(base);
        let datasets = self.resolve_datasets(&registry)?;

        SnapshotWriter::new(&self.output_dir).ensure_directory()?;

        let progress = match cli.output_format {
            OutputFormat::Human => DatasetProgress::visible(),
            OutputFormat::Json => DatasetProgress::hidden(),
        };

        let executor = DownloadExecutor::new(&self.output_dir)?
            .with_base_url(self.base_url.clone())
            .with_unit_code(self.unit_code.clone())
            .with_registry(registry)
            .with_progress(progress);

        info!(
            output_dir = %self.output_dir.display(),
            base_url = %self.base_url,
            "Download configured"
        );

        let report = Arc::new(executor).run(datasets, start, end).await;

        match cli.output_format {
            OutputFormat::Json => output_json(&report)?,
            OutputFormat::Human => output_human(&report),
        }

        Ok(report)
    }
}

/// Output the run report as one JSON document
fn output_json(report: &RunReport) -> Result<(), CliError> {
    println!("{}", serde_json::to_string(report)?);
    Ok(())
}

/// Output the run report in human-readable format
fn output_human(report: &RunReport) {
    for dataset in &report.datasets {
        for line in dataset_lines(dataset) {
            println!("{line}");
        }
    }
    println!(
        "\nArtifacts written: {} ({} bytes), chunks skipped: {}",
        report.artifacts_written(),
        report.bytes_written(),
        report.chunks_skipped()
    );
}

/// Report block for one dataset: a header line, then one line per chunk
fn dataset_lines(dataset: &DatasetReport) -> Vec<String> {
    let mut lines = vec![format!(
        "\n{}: {} ({}/{} written, {} skipped)",
        dataset.dataset, dataset.status, dataset.written, dataset.chunks_total, dataset.skipped
    )];
    if let Some(error) = &dataset.error {
        lines.push(format!("  Error: {error}"));
    }
    lines.extend(dataset.outcomes.iter().map(|outcome| match &outcome.kind {
        OutcomeKind::Written(artifact) => {
            format!("  {} -> {} ({} bytes)", outcome.chunk, artifact.name, artifact.bytes)
        }
        OutcomeKind::Skipped { stage, reason } => {
            format!("  {} skipped at {stage}: {reason}", outcome.chunk)
        }
    }));
    lines
}
