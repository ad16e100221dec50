//! Case-insensitive key/value store backing every configuration provider

use crate::error::{SecretsError, SecretsResult};
use crate::key::fold_key;
use std::collections::BTreeMap;
use std::fmt;

/// Loaded configuration entries.
///
/// Keys compare case-insensitively but keep the casing they were inserted
/// with. Folding is Unicode lowercasing (`str::to_lowercase`), not an
/// ordinal per-character comparison: ASCII and most scripts behave the same
/// either way, but a few characters fold onto others (the Kelvin sign U+212A
/// matches `k`, `İ` lowercases to `i̇`). Values are never printed by the
/// `Debug` impl.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConfigData {
    /// Folded key -> (original key, value)
    entries: BTreeMap<String, (String, String)>,
}

impl ConfigData {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key that must not already be present.
    ///
    /// Fails with [`SecretsError::DuplicateKey`] instead of overwriting, so
    /// colliding sources surface rather than silently dropping a value.
    pub fn try_insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> SecretsResult<()> {
        let key = key.into();
        let folded = fold_key(&key);
        if self.entries.contains_key(&folded) {
            return Err(SecretsError::duplicate_key(key));
        }
        self.entries.insert(folded, (key, value.into()));
        Ok(())
    }

    /// Insert or overwrite a key, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        self.entries
            .insert(fold_key(&key), (key, value.into()))
            .map(|(_, previous)| previous)
    }

    /// Case-insensitive exact lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&fold_key(key)).map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&fold_key(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in their original casing, ordered by folded key
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(key, _)| key.as_str())
    }

    /// Key/value pairs, ordered by folded key
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl fmt::Debug for ConfigData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigData")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut data = ConfigData::new();
        data.try_insert("Database:Password", "hunter2").unwrap();

        assert_eq!(data.get("database:password"), Some("hunter2"));
        assert_eq!(data.get("DATABASE:PASSWORD"), Some("hunter2"));
        assert_eq!(data.get("database"), None);
        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["Database:Password"]);
    }

    #[test]
    fn test_non_ascii_keys_fold() {
        let mut data = ConfigData::new();
        data.insert("Größe:Straße", "1");
        data.insert("\u{212a}elvin", "2");

        assert_eq!(data.get("GRÖSSE:STRASSE"), None);
        assert_eq!(data.get("größe:straße"), Some("1"));
        assert_eq!(data.get("GRÖßE:STRAßE"), Some("1"));
        assert_eq!(data.get("kelvin"), Some("2"));
    }

    #[test]
    fn test_try_insert_rejects_duplicates() {
        let mut data = ConfigData::new();
        data.try_insert("a:b", "first").unwrap();

        let err = data.try_insert("A:B", "second").unwrap_err();
        assert!(matches!(err, SecretsError::DuplicateKey { ref key } if key == "A:B"));
        assert_eq!(data.get("a:b"), Some("first"));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut data = ConfigData::new();
        assert_eq!(data.insert("key", "one"), None);
        assert_eq!(data.insert("KEY", "two"), Some("one".to_string()));
        assert_eq!(data.get("key"), Some("two"));
        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["KEY"]);
    }

    #[test]
    fn test_debug_hides_values() {
        let mut data = ConfigData::new();
        data.insert("api:token", "s3cr3t");
        let rendered = format!("{:?}", data);
        assert!(rendered.contains("api:token"));
        assert!(!rendered.contains("s3cr3t"));
    }
}
