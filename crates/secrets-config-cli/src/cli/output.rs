//! Output formatting for the secrets inspector
//!
//! Renders loaded keys as a plain table or as JSON for machine processing.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use secrets_config_core::SecretsProvider;

/// Placeholder printed instead of a secret value
pub const MASK: &str = "***";

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
}

/// Keys loaded from one secrets directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyListing {
    /// Directory that was read
    pub directory: String,
    /// Number of keys loaded
    pub count: usize,
    /// Loaded entries, ordered by key
    pub entries: Vec<KeyEntry>,
}

/// One loaded key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyEntry {
    pub key: String,
    /// Value, or [`MASK`] when values are hidden
    pub value: String,
    /// Length of the real value in bytes
    pub length: usize,
}

impl KeyListing {
    /// Collect the entries of a loaded provider
    pub fn from_provider(provider: &SecretsProvider, show_values: bool) -> Self {
        let entries: Vec<KeyEntry> = provider
            .data()
            .iter()
            .map(|(key, value)| KeyEntry {
                key: key.to_string(),
                value: if show_values {
                    value.to_string()
                } else {
                    MASK.to_string()
                },
                length: value.len(),
            })
            .collect();

        Self {
            directory: provider.source().directory().display().to_string(),
            count: entries.len(),
            entries,
        }
    }

    /// Write the listing in the requested format
    pub fn render(&self, format: OutputFormat, out: &mut impl Write) -> io::Result<()> {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)
            }
            OutputFormat::Table => self.render_table(out),
        }
    }

    fn render_table(&self, out: &mut impl Write) -> io::Result<()> {
        if self.entries.is_empty() {
            return writeln!(out, "No secrets loaded from {}", self.directory);
        }

        let key_width = self
            .entries
            .iter()
            .map(|e| e.key.len())
            .max()
            .unwrap_or(0)
            .max("KEY".len());

        writeln!(out, "{:<width$}  {:>6}  VALUE", "KEY", "BYTES", width = key_width)?;
        for entry in &self.entries {
            writeln!(
                out,
                "{:<width$}  {:>6}  {}",
                entry.key,
                entry.length,
                entry.value,
                width = key_width
            )?;
        }
        writeln!(out)?;
        writeln!(out, "{} key(s) from {}", self.count, self.directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrets_config_core::{MemoryFileProvider, SecretsSource};

    fn provider() -> SecretsProvider {
        let mut provider = SecretsSource::new()
            .with_directory("/run/secrets")
            .with_file_provider(
                MemoryFileProvider::new()
                    .with_file("smtp__password", "pw")
                    .with_file("api_key", "abcdef"),
            )
            .build();
        provider.load().unwrap();
        provider
    }

    #[test]
    fn test_listing_masks_values() {
        let listing = KeyListing::from_provider(&provider(), false);
        assert_eq!(listing.count, 2);
        assert_eq!(listing.entries[0].key, "api_key");
        assert_eq!(listing.entries[0].value, MASK);
        assert_eq!(listing.entries[0].length, 6);
        assert_eq!(listing.entries[1].key, "smtp:password");
    }

    #[test]
    fn test_json_output() {
        let listing = KeyListing::from_provider(&provider(), true);
        let mut out = Vec::new();
        listing.render(OutputFormat::Json, &mut out).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["directory"], "/run/secrets");
        assert_eq!(parsed["count"], 2);
        assert_eq!(parsed["entries"][1]["value"], "pw");
    }

    #[test]
    fn test_table_output() {
        let listing = KeyListing::from_provider(&provider(), false);
        let mut out = Vec::new();
        listing.render(OutputFormat::Table, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("KEY"));
        assert!(text.contains("smtp:password"));
        assert!(text.contains("2 key(s) from /run/secrets"));
        assert!(!text.contains("abcdef"));
    }

    #[test]
    fn test_empty_table_output() {
        let listing = KeyListing {
            directory: "/run/secrets".to_string(),
            count: 0,
            entries: Vec::new(),
        };
        let mut out = Vec::new();
        listing.render(OutputFormat::Table, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No secrets loaded from /run/secrets\n");
    }
}
