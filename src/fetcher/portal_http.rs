//! HTTP fetcher for the transparency portal
//!
//! One GET per chunk, body read fully into memory. The client keeps no idle
//! connections, so every request opens its own connection and releases it
//! when the response is dropped, whichever way the request ends.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::{FetchResult, FetcherError, FetcherResult, SnapshotFetcher};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("transparency-data-downloader/", env!("CARGO_PKG_VERSION"));

/// Fetches snapshot bodies over HTTP(S)
#[derive(Debug, Clone)]
pub struct PortalHttpFetcher {
    client: Client,
}

impl PortalHttpFetcher {
    /// Create a fetcher with an unpooled client and transport-default timeouts
    pub fn new() -> FetcherResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| FetcherError::ClientSetup(e.to_string()))?;
        Ok(Self { client })
    }

    /// Create with a caller-supplied client (for testing)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SnapshotFetcher for PortalHttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        debug!(url = %url, "Making GET request");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetcherError::ConnectFailure(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetcherError::ConnectFailure(format!(
                "{url}: HTTP {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetcherError::ReadFailure(format!("{url}: {e}")))?;

        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "Response body read");
        Ok(body)
    }
}
