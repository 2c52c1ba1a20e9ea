//! Process metrics for the snapshot downloader
//!
//! Recording goes through the `metrics` facade and is a no-op until
//! [`init_metrics`] installs the Prometheus exporter.
//!
//! | Metric | Kind | Labels |
//! |---|---|---|
//! | `portal_requests_total` | counter | `dataset`, `status` |
//! | `portal_request_duration_seconds` | histogram | `dataset` |
//! | `artifacts_written_total` | counter | `dataset` |
//! | `artifact_bytes_total` | counter | `dataset` |
//! | `chunks_skipped_total` | counter | `dataset`, `stage` |

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::Lazy;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::DatasetType;

static METRICS_INITIALIZED: Lazy<Arc<RwLock<bool>>> = Lazy::new(|| Arc::new(RwLock::new(false)));

/// Metrics exporter setup errors
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// The Prometheus exporter could not be installed or bound
    #[error("failed to install Prometheus exporter on {addr}: {reason}")]
    Install {
        /// Requested listen address
        addr: SocketAddr,
        /// Exporter error message
        reason: String,
    },
}

/// Install the Prometheus exporter listening on `addr`.
///
/// Idempotent: a second call is a no-op.
pub async fn init_metrics(addr: SocketAddr) -> Result<(), MetricsError> {
    let mut initialized = METRICS_INITIALIZED.write().await;
    if *initialized {
        debug!("Metrics already initialized, skipping");
        return Ok(());
    }

    info!("Initializing metrics system on {}", addr);

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| MetricsError::Install {
            addr,
            reason: e.to_string(),
        })?;

    describe_counter!(
        "portal_requests_total",
        Unit::Count,
        "Requests made to the transparency portal"
    );
    describe_histogram!(
        "portal_request_duration_seconds",
        Unit::Seconds,
        "Portal request duration including body read"
    );
    describe_counter!(
        "artifacts_written_total",
        Unit::Count,
        "Snapshot files written"
    );
    describe_counter!(
        "artifact_bytes_total",
        Unit::Bytes,
        "Bytes written to snapshot files"
    );
    describe_counter!(
        "chunks_skipped_total",
        Unit::Count,
        "Chunks skipped after a failure, by failing stage"
    );

    *initialized = true;
    Ok(())
}

/// Timing and outcome of one portal request
pub struct RequestMetrics {
    dataset: String,
    start_time: Instant,
}

impl RequestMetrics {
    /// Start timing a request for `dataset`
    pub fn start(dataset: &DatasetType) -> Self {
        Self {
            dataset: dataset.to_string(),
            start_time: Instant::now(),
        }
    }

    /// Record the request outcome; `status` is `"ok"` or a failure kind
    pub fn record(&self, status: &'static str) {
        let duration = self.start_time.elapsed();

        counter!(
            "portal_requests_total",
            "dataset" => self.dataset.clone(),
            "status" => status,
        )
        .increment(1);

        histogram!(
            "portal_request_duration_seconds",
            "dataset" => self.dataset.clone(),
        )
        .record(duration.as_secs_f64());

        debug!(
            dataset = %self.dataset,
            status = status,
            duration_ms = duration.as_millis(),
            "Portal request recorded"
        );
    }
}

/// Record a snapshot write
pub fn record_artifact(dataset: &DatasetType, bytes: u64) {
    counter!("artifacts_written_total", "dataset" => dataset.to_string()).increment(1);
    counter!("artifact_bytes_total", "dataset" => dataset.to_string()).increment(bytes);
}

/// Record a skipped chunk and the stage that failed
pub fn record_skip(dataset: &DatasetType, stage: &'static str) {
    counter!(
        "chunks_skipped_total",
        "dataset" => dataset.to_string(),
        "stage" => stage,
    )
    .increment(1);
}
