//! Per-dataset progress bars
//!
//! Human output renders one bar per dataset type under a shared
//! [`MultiProgress`], counting chunks. JSON output and library callers get
//! hidden bars, so the executor can always drive a bar unconditionally.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::DatasetType;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks {prefix} {msg}";

/// Hands out one progress bar per dataset task
#[derive(Debug, Clone, Default)]
pub struct DatasetProgress {
    multi: Option<MultiProgress>,
}

impl DatasetProgress {
    /// Visible bars drawn to stderr
    pub fn visible() -> Self {
        Self {
            multi: Some(MultiProgress::new()),
        }
    }

    /// No bars are drawn
    pub fn hidden() -> Self {
        Self { multi: None }
    }

    /// Whether bars are drawn
    pub fn is_visible(&self) -> bool {
        self.multi.is_some()
    }

    /// Create the bar for `dataset` with `total_chunks` steps
    pub fn bar(&self, dataset: &DatasetType, total_chunks: u64) -> ProgressBar {
        let Some(multi) = &self.multi else {
            return ProgressBar::with_draw_target(Some(total_chunks), ProgressDrawTarget::hidden());
        };

        let pb = multi.add(ProgressBar::new(total_chunks));
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_prefix(dataset.to_string());
        pb
    }
}
