//! Download executor
//!
//! Runs each dataset type as an independent tokio task. Inside a task the
//! chunks are processed one after another in chronological order; a failure
//! in any stage skips that chunk only.

use crate::downloader::job::{ChunkOutcome, DatasetJob, DatasetReport, DatasetStatus, RunReport};
use crate::downloader::progress::DatasetProgress;
use crate::downloader::DownloadError;
use crate::fetcher::{
    PortalHttpFetcher, QueryError, QueryFormatter, SnapshotFetcher, UrlBuilder,
};
use crate::metrics::{self, RequestMetrics};
use crate::output::{Artifact, SnapshotWriter};
use crate::registry::DatasetRegistry;
use crate::{Chunk, DatasetType};
use chrono::NaiveDate;
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

use super::config::DEFAULT_UNIT_CODE;

/// Drives dataset jobs through format, URL build, fetch and write
pub struct DownloadExecutor {
    fetcher: Arc<dyn SnapshotFetcher>,
    writer: SnapshotWriter,
    registry: DatasetRegistry,
    url_builder: UrlBuilder,
    unit_code: String,
    progress: DatasetProgress,
}

impl DownloadExecutor {
    /// Create an executor writing into `output_dir` with the HTTP fetcher.
    ///
    /// The directory must already exist; see [`SnapshotWriter::ensure_directory`].
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self, DownloadError> {
        let fetcher = PortalHttpFetcher::new()?;
        Self::with_fetcher(output_dir, Arc::new(fetcher))
    }

    /// Create an executor with a caller-supplied fetcher
    pub fn with_fetcher<P: AsRef<Path>>(
        output_dir: P,
        fetcher: Arc<dyn SnapshotFetcher>,
    ) -> Result<Self, DownloadError> {
        let writer = SnapshotWriter::new(output_dir);
        let registry = DatasetRegistry::load_embedded()
            .map_err(|e| DownloadError::Validation(e.to_string()))?;

        Ok(Self {
            fetcher,
            writer,
            registry,
            url_builder: UrlBuilder::default(),
            unit_code: DEFAULT_UNIT_CODE.to_string(),
            progress: DatasetProgress::hidden(),
        })
    }

    /// Override the portal base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.url_builder = UrlBuilder::new(base_url);
        self
    }

    /// Override the administrative unit code
    pub fn with_unit_code(mut self, unit_code: impl Into<String>) -> Self {
        self.unit_code = unit_code.into();
        self
    }

    /// Replace the dataset registry, e.g. one extended with reserved-group types
    pub fn with_registry(mut self, registry: DatasetRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Override progress bar rendering
    pub fn with_progress(mut self, progress: DatasetProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Build the job for `dataset`, resolving its formatting group
    pub fn job_for(
        &self,
        dataset: DatasetType,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DatasetJob, DownloadError> {
        let group = self.registry.group_of(&dataset).ok_or_else(|| {
            QueryError::UnsupportedDatasetType {
                dataset: dataset.to_string(),
                reason: "not a member of any formatting group".to_string(),
            }
        })?;

        let job = DatasetJob::new(dataset, group, start, end);
        job.validate().map_err(DownloadError::Validation)?;
        Ok(job)
    }

    /// Run every dataset type over `[start, end]`.
    ///
    /// One task per dataset type; the returned report lists datasets in the
    /// order given. A task that panics is reported as `Failed` without
    /// affecting the others.
    pub async fn run(
        self: &Arc<Self>,
        datasets: Vec<DatasetType>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RunReport {
        info!(
            datasets = datasets.len(),
            start = %start,
            end = %end,
            "Starting download run"
        );

        let handles: Vec<_> = datasets
            .iter()
            .map(|dataset| {
                let executor = Arc::clone(self);
                let span = info_span!("dataset_job", dataset = %dataset);
                let dataset = dataset.clone();
                tokio::spawn(
                    async move { executor.run_dataset(dataset, start, end).await }
                        .instrument(span),
                )
            })
            .collect();

        let results = join_all(handles).await;

        let mut report = RunReport::default();
        for (dataset, result) in datasets.into_iter().zip(results) {
            let dataset_report = match result {
                Ok(dataset_report) => dataset_report,
                Err(e) => {
                    error!(dataset = %dataset, error = %e, "Dataset task aborted");
                    DatasetReport::ended(dataset, DatasetStatus::Failed, e.to_string())
                }
            };
            report.datasets.push(dataset_report);
        }

        info!(
            artifacts = report.artifacts_written(),
            skipped = report.chunks_skipped(),
            bytes = report.bytes_written(),
            "Download run finished"
        );

        report
    }

    async fn run_dataset(
        &self,
        dataset: DatasetType,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DatasetReport {
        match self.job_for(dataset.clone(), start, end) {
            Ok(job) => self.execute(job).await,
            Err(e) => {
                let status = match e {
                    DownloadError::Query(QueryError::UnsupportedDatasetType { .. }) => {
                        DatasetStatus::Unsupported
                    }
                    _ => DatasetStatus::Failed,
                };
                warn!(error = %e, status = %status, "Dataset not processed");
                DatasetReport::ended(dataset, status, e.to_string())
            }
        }
    }

    /// Process every chunk of `job` in chronological order
    pub async fn execute(&self, job: DatasetJob) -> DatasetReport {
        let chunks_total = job.chunks().count() as u64;

        let mut report = DatasetReport::new(job.dataset.clone());
        report.chunks_total = chunks_total;
        report.status = DatasetStatus::InProgress;

        info!(
            group = %job.group,
            start = %job.start,
            end = %job.end,
            chunks = chunks_total,
            "Starting dataset job"
        );

        let pb = self.progress.bar(&job.dataset, chunks_total);

        for chunk in job.chunks() {
            pb.set_message(chunk.to_string());

            let outcome = match self.process_chunk(&job.dataset, &chunk).await {
                Ok(artifact) => {
                    info!(
                        chunk = %chunk,
                        artifact = %artifact.name,
                        bytes = artifact.bytes,
                        "Chunk written"
                    );
                    metrics::record_artifact(&job.dataset, artifact.bytes);
                    ChunkOutcome::written(&chunk, artifact)
                }
                Err(e) => {
                    warn!(chunk = %chunk, stage = e.stage(), error = %e, "Chunk skipped");
                    metrics::record_skip(&job.dataset, e.stage());
                    ChunkOutcome::skipped(&chunk, e.stage(), e.to_string())
                }
            };

            report.push(outcome);
            pb.inc(1);
        }

        pb.finish_with_message("done");
        report.status = DatasetStatus::Completed;

        info!(
            written = report.written,
            skipped = report.skipped,
            bytes = report.bytes_written,
            "Dataset job completed"
        );

        report
    }

    async fn process_chunk(
        &self,
        dataset: &DatasetType,
        chunk: &Chunk,
    ) -> Result<Artifact, DownloadError> {
        let query = QueryFormatter::new(&self.registry, &self.unit_code).format(dataset, chunk)?;
        let url = self.url_builder.build(dataset, &query)?;
        debug!(url = %url, query = %query, "Fetching chunk");

        let request = RequestMetrics::start(dataset);
        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => {
                request.record("ok");
                body
            }
            Err(e) => {
                request.record(e.kind());
                return Err(e.into());
            }
        };

        let artifact = self.writer.write(dataset, chunk, &body).await?;
        Ok(artifact)
    }
}
