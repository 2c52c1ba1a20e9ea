//! CLI command for listing known dataset types

use crate::registry::{DatasetRegistry, RegistryEntry};
use crate::FormattingGroup;
use clap::Args;
use serde_json::json;

use super::{CliError, OutputFormat};

/// Datasets subcommand
#[derive(Debug, Args)]
pub struct DatasetsCommand {
    /// Only list dataset types in this formatting group
    /// (month_range, day_range, month_reference)
    #[arg(long)]
    pub group: Option<FormattingGroup>,
}

impl DatasetsCommand {
    /// Print the catalog
    pub fn execute(&self, format: OutputFormat) -> Result<(), CliError> {
        let registry =
            DatasetRegistry::load().map_err(|e| CliError::ConfigurationError(e.to_string()))?;

        let entries = self.select(registry);

        match format {
            OutputFormat::Json => {
                let rows: Vec<_> = entries
                    .iter()
                    .map(|entry| {
                        json!({
                            "id": entry.id(),
                            "group": entry.group(),
                            "policy": entry.group().policy(),
                            "default": registry.default_datasets().contains(entry.id()),
                            "description": entry.description(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            OutputFormat::Human => {
                println!("Found {} dataset types:\n", entries.len());
                for entry in entries {
                    let marker = if registry.default_datasets().contains(entry.id()) {
                        " (default)"
                    } else {
                        ""
                    };
                    println!(
                        "{} | {} | {}{}",
                        entry.id(),
                        entry.group(),
                        entry.description(),
                        marker
                    );
                }
            }
        }

        Ok(())
    }

    /// Registry entries matching the group filter, ordered by identifier
    pub fn select<'a>(&self, registry: &'a DatasetRegistry) -> Vec<&'a RegistryEntry> {
        match self.group {
            Some(group) => registry.in_group(group),
            None => registry.entries(),
        }
    }
}
