//! Unit tests for the embedded dataset registry

use transparency_data_downloader::registry::RegistryError;
use transparency_data_downloader::{ChunkPolicy, DatasetRegistry, DatasetType, FormattingGroup};

#[test]
fn test_embedded_catalog() {
    let registry = DatasetRegistry::load().unwrap();
    let ids: Vec<&str> = registry.entries().iter().map(|e| e.id().as_str()).collect();
    assert_eq!(
        ids,
        vec!["contrato", "despesa", "despesaOrcamentaria", "licitacao", "receita"]
    );
}

#[test]
fn test_groups_imply_policies() {
    let registry = DatasetRegistry::load().unwrap();
    for entry in registry.entries() {
        let expected = match entry.group() {
            FormattingGroup::MonthRange | FormattingGroup::DayRange => ChunkPolicy::Annual,
            FormattingGroup::MonthReference => ChunkPolicy::Monthly,
        };
        assert_eq!(entry.group().policy(), expected, "{}", entry.id());
        assert!(!entry.description().is_empty());
    }
}

#[test]
fn test_with_dataset_replaces_group() {
    let registry = DatasetRegistry::load_embedded()
        .unwrap()
        .with_dataset(DatasetType::new("receita"), FormattingGroup::DayRange);
    assert_eq!(
        registry.group_of(&DatasetType::new("receita")),
        Some(FormattingGroup::DayRange)
    );
    // The process-wide copy is untouched
    assert_eq!(
        DatasetRegistry::load()
            .unwrap()
            .group_of(&DatasetType::new("receita")),
        Some(FormattingGroup::MonthRange)
    );
}

#[test]
fn test_malformed_json_is_parse_error() {
    assert!(matches!(
        DatasetRegistry::from_json("{not json"),
        Err(RegistryError::ParseError(_))
    ));
}

#[test]
fn test_unknown_group_is_parse_error() {
    let json = r#"{
        "schema_version": "1.0",
        "last_updated": "2024-01-01",
        "default_datasets": [],
        "datasets": [{"id": "despesa", "group": "weekly", "description": "x"}]
    }"#;
    assert!(matches!(
        DatasetRegistry::from_json(json),
        Err(RegistryError::ParseError(_))
    ));
}
