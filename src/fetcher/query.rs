//! Wire-format query parameters per formatting group
//!
//! | Group | Parameters | Date format |
//! |---|---|---|
//! | month range | `periodo_inicial`, `periodo_final` | `MM/YYYY` |
//! | day range | `periodo_inicial`, `periodo_final` | `DD/MM/YYYY` |
//! | month reference | `referencia` | `MM/YYYY` |
//!
//! Every query ends with the `codigo_unidade` parameter selecting the
//! administrative unit.

use crate::registry::DatasetRegistry;
use crate::{Chunk, DatasetType, FormattingGroup};

/// Start-of-period parameter for range groups
pub const PARAM_PERIOD_START: &str = "periodo_inicial";
/// End-of-period parameter for range groups
pub const PARAM_PERIOD_END: &str = "periodo_final";
/// Reference-month parameter for the month-reference group
pub const PARAM_REFERENCE: &str = "referencia";
/// Administrative unit parameter appended to every query
pub const PARAM_UNIT_CODE: &str = "codigo_unidade";

const MONTH_FORMAT: &str = "%m/%Y";
const DAY_FORMAT: &str = "%d/%m/%Y";

/// Errors raised while turning a chunk into a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Dataset type is not in any known group, or the chunk shape does not fit its group
    #[error("unsupported dataset type {dataset}: {reason}")]
    UnsupportedDatasetType {
        /// Offending dataset identifier
        dataset: String,
        /// Why it cannot be formatted
        reason: String,
    },

    /// Base URL, path segment and parameters do not form an absolute URL
    #[error("malformed URL {url}: {reason}")]
    MalformedUrl {
        /// The URL text that failed
        url: String,
        /// Parser or validation message
        reason: String,
    },
}

/// Query parameters for one request, in wire order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    dataset: DatasetType,
    params: Vec<(&'static str, String)>,
}

impl Query {
    /// Dataset the query targets
    pub fn dataset(&self) -> &DatasetType {
        &self.dataset
    }

    /// Parameters in insertion order
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Value of a parameter, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Unencoded `name=value&...` rendering for logs
impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// Maps `(dataset type, chunk)` to a [`Query`]
#[derive(Debug, Clone, Copy)]
pub struct QueryFormatter<'a> {
    registry: &'a DatasetRegistry,
    unit_code: &'a str,
}

impl<'a> QueryFormatter<'a> {
    /// Create a formatter resolving groups through `registry`
    pub fn new(registry: &'a DatasetRegistry, unit_code: &'a str) -> Self {
        Self {
            registry,
            unit_code,
        }
    }

    /// Format the parameters for one chunk. Pure; no I/O.
    pub fn format(&self, dataset: &DatasetType, chunk: &Chunk) -> Result<Query, QueryError> {
        let group = self.registry.group_of(dataset).ok_or_else(|| {
            QueryError::UnsupportedDatasetType {
                dataset: dataset.to_string(),
                reason: "not a member of any formatting group".to_string(),
            }
        })?;

        let mut params = match (group, chunk) {
            (FormattingGroup::MonthRange, Chunk::Range(range)) => vec![
                (PARAM_PERIOD_START, range.start().format(MONTH_FORMAT).to_string()),
                (PARAM_PERIOD_END, range.end().format(MONTH_FORMAT).to_string()),
            ],
            (FormattingGroup::DayRange, Chunk::Range(range)) => vec![
                (PARAM_PERIOD_START, range.start().format(DAY_FORMAT).to_string()),
                (PARAM_PERIOD_END, range.end().format(DAY_FORMAT).to_string()),
            ],
            (FormattingGroup::MonthReference, Chunk::Reference(month)) => {
                vec![(PARAM_REFERENCE, month.to_string())]
            }
            (group, chunk) => {
                return Err(QueryError::UnsupportedDatasetType {
                    dataset: dataset.to_string(),
                    reason: format!("{group} datasets cannot be queried by chunk {chunk}"),
                })
            }
        };
        params.push((PARAM_UNIT_CODE, self.unit_code.to_string()));

        Ok(Query {
            dataset: dataset.clone(),
            params,
        })
    }
}
