//! CLI command implementations

pub mod datasets;
pub mod download;
pub mod error;

pub use datasets::DatasetsCommand;
pub use download::{Cli, Commands, DownloadArgs, OutputFormat};
pub use error::CliError;
