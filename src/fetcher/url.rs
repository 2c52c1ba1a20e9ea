//! Request URL composition

use reqwest::Url;

use super::query::{Query, QueryError};
use crate::DatasetType;

/// Public API root of the Assú transparency portal
pub const DEFAULT_BASE_URL: &str =
    "https://transparencia.e-publica.net/epublica-portal/rest/assu/api/v1";

/// Composes `{base}/{dataset}?{params}` request URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base_url: String,
}

impl UrlBuilder {
    /// Create a builder for `base_url`. The base is only parsed in [`UrlBuilder::build`].
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Build the request URL for one query.
    ///
    /// Exactly one `/` separates the base and the dataset segment whether or
    /// not the base ends with a slash. Parameters are form-encoded in
    /// insertion order.
    pub fn build(&self, dataset: &DatasetType, query: &Query) -> Result<Url, QueryError> {
        let malformed = |reason: String| QueryError::MalformedUrl {
            url: format!("{}/{}", self.base_url.trim_end_matches('/'), dataset),
            reason,
        };

        if dataset.as_str().is_empty() {
            return Err(malformed("dataset path segment is empty".to_string()));
        }

        let mut url = Url::parse(&self.base_url).map_err(|e| malformed(e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(malformed(format!("unsupported scheme {}", url.scheme())));
        }
        if !url.has_host() {
            return Err(malformed("missing host".to_string()));
        }

        url.path_segments_mut()
            .map_err(|_| malformed("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(dataset.as_str());

        url.query_pairs_mut()
            .clear()
            .extend_pairs(query.params().iter().map(|(k, v)| (*k, v.as_str())));

        Ok(url)
    }
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
