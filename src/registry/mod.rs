//! Dataset registry for the transparency portal
//!
//! The registry maps every known dataset type to the [`FormattingGroup`] that
//! decides its date format and parameter names. The built-in catalog is
//! embedded at compile time; callers can register extra identifiers for the
//! reserved groups on an owned copy.

use crate::{DatasetType, FormattingGroup};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Embedded registry data
const REGISTRY_JSON: &str = include_str!("datasets.json");

/// Catalog schema major version this build understands
const SCHEMA_MAJOR: &str = "1";

/// Global registry instance (loaded once)
static REGISTRY: Lazy<Result<DatasetRegistry, RegistryError>> =
    Lazy::new(|| DatasetRegistry::from_json(REGISTRY_JSON));

/// Registry of dataset types the portal serves
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    defaults: Vec<DatasetType>,
    entries_map: BTreeMap<DatasetType, RegistryEntry>,
}

impl DatasetRegistry {
    /// Load the embedded registry
    ///
    /// This is a singleton operation - the registry is loaded once and cached.
    pub fn load() -> Result<&'static Self, &'static RegistryError> {
        REGISTRY.as_ref()
    }

    /// Load embedded registry, returning an owned copy
    pub fn load_embedded() -> Result<Self, RegistryError> {
        Self::from_json(REGISTRY_JSON)
    }

    /// Parse registry from JSON string
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawRegistry = serde_json::from_str(json)
            .map_err(|e| RegistryError::ParseError(format!("Failed to parse registry: {e}")))?;

        if raw.schema_version.split('.').next() != Some(SCHEMA_MAJOR) {
            return Err(RegistryError::UnsupportedSchema(raw.schema_version));
        }

        let mut entries_map = BTreeMap::new();
        for entry in raw.datasets {
            if entries_map.contains_key(&entry.id) {
                return Err(RegistryError::Duplicate(entry.id.to_string()));
            }
            entries_map.insert(entry.id.clone(), entry);
        }

        for default in &raw.default_datasets {
            if !entries_map.contains_key(default) {
                return Err(RegistryError::NotFound(format!(
                    "Default dataset {default} is not registered"
                )));
            }
        }

        Ok(Self {
            defaults: raw.default_datasets,
            entries_map,
        })
    }

    /// Register an additional dataset type, replacing any entry with the same id
    pub fn with_dataset(mut self, id: DatasetType, group: FormattingGroup) -> Self {
        let entry = RegistryEntry {
            id: id.clone(),
            group,
            description: "Registered at runtime".to_string(),
        };
        self.entries_map.insert(id, entry);
        self
    }

    /// Get all registry entries, ordered by identifier
    pub fn entries(&self) -> Vec<&RegistryEntry> {
        self.entries_map.values().collect()
    }

    /// Get a specific entry
    pub fn get_entry(&self, id: &DatasetType) -> Option<&RegistryEntry> {
        self.entries_map.get(id)
    }

    /// Formatting group of a dataset type, if it is registered
    pub fn group_of(&self, id: &DatasetType) -> Option<FormattingGroup> {
        self.get_entry(id).map(RegistryEntry::group)
    }

    /// Dataset types fetched when the caller names none
    pub fn default_datasets(&self) -> &[DatasetType] {
        &self.defaults
    }

    /// Entries belonging to `group`
    pub fn in_group(&self, group: FormattingGroup) -> Vec<&RegistryEntry> {
        self.entries_map
            .values()
            .filter(|entry| entry.group == group)
            .collect()
    }
}

/// A single entry in the dataset registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEntry {
    id: DatasetType,
    group: FormattingGroup,
    description: String,
}

impl RegistryEntry {
    /// Dataset identifier
    pub fn id(&self) -> &DatasetType {
        &self.id
    }

    /// Formatting group
    pub fn group(&self) -> FormattingGroup {
        self.group
    }

    /// Human description
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Raw registry structure for deserialization
#[derive(Debug, Deserialize)]
struct RawRegistry {
    schema_version: String,
    default_datasets: Vec<DatasetType>,
    datasets: Vec<RegistryEntry>,
}

/// Errors that can occur when working with the registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Failed to parse registry JSON
    #[error("registry parse error: {0}")]
    ParseError(String),

    /// Dataset not found in registry
    #[error("dataset not found: {0}")]
    NotFound(String),

    /// Catalog written for a schema this build cannot read
    #[error("unsupported registry schema version: {0}")]
    UnsupportedSchema(String),

    /// Dataset registered twice
    #[error("duplicate dataset in registry: {0}")]
    Duplicate(String),
}
