//! Query formatting, URL building and fetching
//!
//! A chunk becomes a request in three steps:
//!
//! 1. [`query::QueryFormatter`] maps `(dataset type, chunk)` to wire parameters
//! 2. [`url::UrlBuilder`] joins base URL, dataset path segment and parameters
//! 3. a [`SnapshotFetcher`] performs the GET and returns the raw body

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Url;

pub mod portal_http;
pub mod query;
pub mod url;

pub use portal_http::PortalHttpFetcher;
pub use query::{Query, QueryError, QueryFormatter};
pub use url::UrlBuilder;

/// Fetcher errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetcherError {
    /// Connection could not be opened, or the portal answered with a non-2xx status
    #[error("connect failure: {0}")]
    ConnectFailure(String),

    /// Connection opened but the body could not be read completely
    #[error("read failure: {0}")]
    ReadFailure(String),

    /// HTTP client could not be constructed
    #[error("client setup error: {0}")]
    ClientSetup(String),
}

impl FetcherError {
    /// Short label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            FetcherError::ConnectFailure(_) => "connect",
            FetcherError::ReadFailure(_) => "read",
            FetcherError::ClientSetup(_) => "setup",
        }
    }
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// Outcome of one GET: the verbatim body or a typed failure
pub type FetchResult = FetcherResult<Bytes>;

/// Retrieves one response body per request URL
///
/// Implementations perform exactly one attempt; a failure is reported to the
/// caller once and never retried here.
#[async_trait]
pub trait SnapshotFetcher: Send + Sync {
    /// GET `url` and read the whole body into memory
    async fn fetch(&self, url: &Url) -> FetchResult;
}
