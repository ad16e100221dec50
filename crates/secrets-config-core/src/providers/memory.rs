//! In-memory configuration, typically used for built-in defaults registered
//! ahead of environment and secrets sources.

use super::traits::{ConfigurationProvider, ConfigurationSource};
use crate::data::ConfigData;
use crate::error::SecretsResult;

/// Fixed key/value pairs
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Vec<(String, String)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder pattern). Later entries replace earlier ones
    /// with the same key.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MemorySource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigurationSource for MemorySource {
    fn build(&self) -> Box<dyn ConfigurationProvider> {
        Box::new(MemoryProvider {
            entries: self.entries.clone(),
            data: ConfigData::new(),
        })
    }
}

#[derive(Debug)]
pub struct MemoryProvider {
    entries: Vec<(String, String)>,
    data: ConfigData,
}

impl ConfigurationProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&mut self) -> SecretsResult<()> {
        let mut data = ConfigData::new();
        for (key, value) in &self.entries {
            data.insert(key.as_str(), value.as_str());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_provider() {
        let mut provider = MemorySource::new()
            .with_entry("Logging:Level", "info")
            .with_entry("logging:level", "debug")
            .build();

        assert_eq!(provider.try_get("logging:level"), None);
        provider.load().unwrap();
        assert_eq!(provider.try_get("LOGGING:LEVEL"), Some("debug"));
        assert_eq!(provider.keys().len(), 1);
    }

    #[test]
    fn test_from_iterator() {
        let source: MemorySource = [("a", "1"), ("b", "2")].into_iter().collect();
        let mut provider = source.build();
        provider.load().unwrap();
        assert_eq!(provider.keys(), vec!["a", "b"]);
    }
}
