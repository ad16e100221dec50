//! Layered Configuration
//!
//! Combines configuration sources into one view. Sources are registered in
//! order; when several providers hold the same key, the one registered
//! **last** wins, so later, more specific sources (secrets, command line)
//! override earlier defaults.
//!
//! # Example
//!
//! ```rust
//! use secrets_config_core::providers::MemorySource;
//! use secrets_config_core::ConfigurationBuilder;
//!
//! let config = ConfigurationBuilder::new()
//!     .with_source(MemorySource::new().with_entry("db:host", "localhost"))
//!     .with_source(MemorySource::new().with_entry("db:host", "db.internal"))
//!     .build()?;
//!
//! assert_eq!(config.get("DB:HOST"), Some("db.internal"));
//! # Ok::<(), secrets_config_core::SecretsError>(())
//! ```

use crate::error::{SecretsError, SecretsResult};
use crate::key::fold_key;
use crate::providers::{ConfigurationProvider, ConfigurationSource};
use std::collections::BTreeMap;
use tracing::debug;

/// Ordered set of configuration sources
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    sources: Vec<Box<dyn ConfigurationSource>>,
}

impl ConfigurationBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source (builder pattern)
    ///
    /// Sources added later take precedence.
    pub fn with_source<S: ConfigurationSource + 'static>(mut self, source: S) -> Self {
        self.add(source);
        self
    }

    /// Add a source
    pub fn add<S: ConfigurationSource + 'static>(&mut self, source: S) -> &mut Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Add a pre-boxed source
    pub fn add_boxed(&mut self, source: Box<dyn ConfigurationSource>) -> &mut Self {
        self.sources.push(source);
        self
    }

    /// Registered sources in registration order
    pub fn sources(&self) -> &[Box<dyn ConfigurationSource>] {
        &self.sources
    }

    /// Get the number of registered sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if no source is registered
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Build and load a provider for every source, in registration order.
    ///
    /// Stops at the first provider that fails to load.
    pub fn build(&self) -> SecretsResult<Configuration> {
        let mut providers = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let mut provider = source.build();
            provider.load()?;
            debug!(
                provider = provider.name(),
                keys = provider.keys().len(),
                "Loaded configuration provider"
            );
            providers.push(provider);
        }
        Ok(Configuration { providers })
    }
}

/// Loaded, layered configuration
#[derive(Debug)]
pub struct Configuration {
    providers: Vec<Box<dyn ConfigurationProvider>>,
}

impl Configuration {
    /// Look up a key (case-insensitive); the last registered provider
    /// holding it wins
    pub fn get(&self, key: &str) -> Option<&str> {
        self.providers
            .iter()
            .rev()
            .find_map(|provider| provider.try_get(key))
    }

    /// Look up a key that must be present
    pub fn get_required(&self, key: &str) -> SecretsResult<&str> {
        self.get(key).ok_or_else(|| {
            SecretsError::configuration(format!("required configuration key '{}' is missing", key))
        })
    }

    /// Name of the provider that currently supplies `key`
    pub fn source_of(&self, key: &str) -> Option<&str> {
        self.providers
            .iter()
            .rev()
            .find(|provider| provider.try_get(key).is_some())
            .map(|provider| provider.name())
    }

    /// Every key across providers, case-insensitively unique, sorted. The
    /// casing shown is the winning provider's.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = BTreeMap::new();
        for provider in &self.providers {
            for key in provider.keys() {
                keys.insert(fold_key(key), key);
            }
        }
        keys.into_values().collect()
    }

    /// Get a list of provider names in registration order
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Reload every provider in registration order
    pub fn reload(&mut self) -> SecretsResult<()> {
        for provider in &mut self.providers {
            provider.load()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_provider::MemoryFileProvider;
    use crate::providers::{MemorySource, SecretsSource};

    #[test]
    fn test_empty_configuration() {
        let config = ConfigurationBuilder::new().build().unwrap();
        assert_eq!(config.get("anything"), None);
        assert!(config.keys().is_empty());
        assert!(config.provider_names().is_empty());
    }

    #[test]
    fn test_last_source_wins() {
        let config = ConfigurationBuilder::new()
            .with_source(
                MemorySource::new()
                    .with_entry("db:host", "localhost")
                    .with_entry("db:port", "5432"),
            )
            .with_source(SecretsSource::new().with_file_provider(
                MemoryFileProvider::new().with_file("DB__HOST", "db.internal"),
            ))
            .build()
            .unwrap();

        assert_eq!(config.get("db:host"), Some("db.internal"));
        assert_eq!(config.get("db:port"), Some("5432"));
        assert_eq!(config.source_of("db:host"), Some("secrets"));
        assert_eq!(config.source_of("db:port"), Some("memory"));
        assert_eq!(config.keys(), vec!["DB:HOST", "db:port"]);
        assert_eq!(config.provider_names(), vec!["memory", "secrets"]);
    }

    #[test]
    fn test_build_stops_at_first_failure() {
        let result = ConfigurationBuilder::new()
            .with_source(MemorySource::new().with_entry("a", "1"))
            .with_source(SecretsSource::new().with_file_provider(MemoryFileProvider::missing()))
            .build();

        assert!(matches!(result, Err(SecretsError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_get_required() {
        let config = ConfigurationBuilder::new()
            .with_source(MemorySource::new().with_entry("a", "1"))
            .build()
            .unwrap();

        assert_eq!(config.get_required("A").unwrap(), "1");
        assert!(matches!(
            config.get_required("b"),
            Err(SecretsError::Configuration(_))
        ));
    }

    #[test]
    fn test_reload() {
        let mut config = ConfigurationBuilder::new()
            .with_source(MemorySource::new().with_entry("a", "1"))
            .build()
            .unwrap();

        config.reload().unwrap();
        assert_eq!(config.get("a"), Some("1"));
    }

    #[test]
    fn test_builder_len() {
        let mut builder = ConfigurationBuilder::new();
        assert!(builder.is_empty());
        builder.add(MemorySource::new()).add(MemorySource::new());
        builder.add_boxed(Box::new(SecretsSource::new()));
        assert_eq!(builder.len(), 3);
        assert_eq!(builder.sources().len(), 3);
    }
}
