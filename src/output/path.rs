//! Artifact name derivation
//!
//! Artifacts are named `"{dataset} - {period}.json"`:
//!
//! - range chunks render the period as `"{startMonth} a {endMonth} - {year}"`
//!   with unpadded months and the range's start year
//! - month references render it as `"MM/YYYY"`
//!
//! Every `/` is then removed from the whole name, so `despesa - 03/2023.json`
//! is stored as `despesa - 032023.json`. Downstream tooling keys off these
//! names; the format must not drift.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use transparency_data_downloader::output::artifact_name;
//! use transparency_data_downloader::{Chunk, DatasetType, DateRange};
//!
//! let chunk = Chunk::Range(DateRange::new(
//!     NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
//! ).unwrap());
//! assert_eq!(artifact_name(&DatasetType::new("despesa"), &chunk), "despesa - 1 a 12 - 2022.json");
//! ```

use crate::{Chunk, DatasetType};
use chrono::Datelike;

/// File extension of every artifact
pub const ARTIFACT_EXTENSION: &str = "json";

/// Period label as it appears inside artifact names, before `/` stripping
pub fn human_readable_period(chunk: &Chunk) -> String {
    match chunk {
        Chunk::Range(range) => format!(
            "{} a {} - {}",
            range.start().month(),
            range.end().month(),
            range.start().year()
        ),
        Chunk::Reference(month) => month.to_string(),
    }
}

/// File name for the artifact of `(dataset, chunk)`
pub fn artifact_name(dataset: &DatasetType, chunk: &Chunk) -> String {
    let name = format!(
        "{} - {}.{}",
        dataset,
        human_readable_period(chunk),
        ARTIFACT_EXTENSION
    );
    strip_slashes(&name)
}

fn strip_slashes(name: &str) -> String {
    name.replace('/', "")
}
