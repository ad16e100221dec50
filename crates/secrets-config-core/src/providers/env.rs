//! Environment Variable Configuration Provider
//!
//! Loads the process environment as configuration, so secrets can be layered
//! over (or under) plain environment settings.
//!
//! # Key Naming Convention
//!
//! - Section separators are written as `__` and become `:`
//! - With a prefix, only variables starting with it (case-insensitively) are
//!   loaded, and the prefix is stripped
//! - Example: prefix `MYAPP_`, variable `MYAPP_DATABASE__HOST` -> key
//!   `DATABASE:HOST`
//!
//! # Example
//!
//! ```rust,ignore
//! use secrets_config_core::providers::EnvironmentSource;
//!
//! let env = EnvironmentSource::with_prefix("MYAPP_");
//! ```

use super::traits::{ConfigurationProvider, ConfigurationSource};
use crate::data::ConfigData;
use crate::error::SecretsResult;
use crate::key::{normalize_key, ENCODED_DELIMITER};
use tracing::debug;

/// Configuration for environment variable naming
#[derive(Debug, Clone)]
pub struct EnvNamingConfig {
    /// Encoded section separator (default: "__")
    pub separator: String,
    /// Prefix for considered variables (optional)
    pub prefix: Option<String>,
}

impl Default for EnvNamingConfig {
    fn default() -> Self {
        Self {
            separator: ENCODED_DELIMITER.to_string(),
            prefix: None,
        }
    }
}

impl EnvNamingConfig {
    /// Create a naming config with a prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Default::default()
        }
    }

    /// Map a variable name to a configuration key, or `None` if the variable
    /// does not belong to this configuration
    pub fn key_for(&self, name: &str) -> Option<String> {
        let name = match self.prefix.as_deref() {
            Some(prefix) => strip_prefix_ignore_case(name, prefix)?,
            None => name,
        };
        if name.is_empty() {
            return None;
        }

        if self.separator == ENCODED_DELIMITER {
            Some(normalize_key(name))
        } else {
            Some(name.replace(&self.separator, crate::key::KEY_DELIMITER))
        }
    }
}

fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&name[prefix.len()..])
    } else {
        None
    }
}

/// Source for system environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvironmentSource {
    naming: EnvNamingConfig,
}

impl EnvironmentSource {
    /// Load every environment variable
    pub fn new() -> Self {
        Self::default()
    }

    /// Only load variables starting with `prefix`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            naming: EnvNamingConfig::with_prefix(prefix),
        }
    }

    /// Create a source with custom naming configuration
    pub fn with_config(naming: EnvNamingConfig) -> Self {
        Self { naming }
    }

    pub fn naming(&self) -> &EnvNamingConfig {
        &self.naming
    }
}

impl ConfigurationSource for EnvironmentSource {
    fn build(&self) -> Box<dyn ConfigurationProvider> {
        Box::new(EnvironmentProvider::new(self.naming.clone()))
    }
}

/// Provider holding a snapshot of the process environment
///
/// The environment is read on `load`; later changes are not seen until the
/// next load.
#[derive(Debug)]
pub struct EnvironmentProvider {
    naming: EnvNamingConfig,
    data: ConfigData,
}

impl EnvironmentProvider {
    pub fn new(naming: EnvNamingConfig) -> Self {
        Self {
            naming,
            data: ConfigData::new(),
        }
    }
}

impl ConfigurationProvider for EnvironmentProvider {
    fn name(&self) -> &str {
        "env"
    }

    fn load(&mut self) -> SecretsResult<()> {
        let mut data = ConfigData::new();
        for (name, value) in std::env::vars_os() {
            let (Some(name), Some(value)) = (name.to_str(), value.to_str()) else {
                debug!("Skipping environment variable that is not valid UTF-8");
                continue;
            };
            if let Some(key) = self.naming.key_for(name) {
                // Variables differing only in case: last one wins
                data.insert(key, value);
            }
        }
        self.data = data;
        Ok(())
    }

    fn try_get(&self, key: &str) -> Option<&str> {
        self.data.get(key)
    }

    fn keys(&self) -> Vec<&str> {
        self.data.keys().collect()
    }
}
