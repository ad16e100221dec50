//! Registration helpers for adding secrets sources to a
//! [`ConfigurationBuilder`]

use crate::configuration::ConfigurationBuilder;
use crate::providers::SecretsSource;
use std::path::PathBuf;

/// Shorthands for registering a [`SecretsSource`]
pub trait SecretsConfigurationExt {
    /// Add `/run/secrets`, failing on load if it is missing
    fn add_secrets(&mut self) -> &mut Self;

    /// Add a secrets directory, failing on load if it is missing
    fn add_secrets_dir(&mut self, directory: impl Into<PathBuf>) -> &mut Self;

    /// Add a secrets directory that may be missing when `optional` is set
    fn add_secrets_dir_optional(&mut self, directory: impl Into<PathBuf>, optional: bool) -> &mut Self;

    /// Add `/run/secrets`, tolerating its absence when `optional` is set
    fn add_secrets_optional(&mut self, optional: bool) -> &mut Self;

    /// Add a source configured by `configure`, starting from the defaults
    fn add_secrets_with<F>(&mut self, configure: F) -> &mut Self
    where
        F: FnOnce(&mut SecretsSource);
}

impl SecretsConfigurationExt for ConfigurationBuilder {
    fn add_secrets(&mut self) -> &mut Self {
        self.add_secrets_with(|_| {})
    }

    fn add_secrets_dir(&mut self, directory: impl Into<PathBuf>) -> &mut Self {
        let directory = directory.into();
        self.add_secrets_with(|source| source.set_directory(directory))
    }

    fn add_secrets_dir_optional(&mut self, directory: impl Into<PathBuf>, optional: bool) -> &mut Self {
        let directory = directory.into();
        self.add_secrets_with(|source| {
            source.set_directory(directory);
            source.set_optional(optional);
        })
    }

    fn add_secrets_optional(&mut self, optional: bool) -> &mut Self {
        self.add_secrets_with(|source| source.set_optional(optional))
    }

    fn add_secrets_with<F>(&mut self, configure: F) -> &mut Self
    where
        F: FnOnce(&mut SecretsSource),
    {
        let mut source = SecretsSource::new();
        configure(&mut source);
        self.add(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SecretsError;
    use crate::file_provider::MemoryFileProvider;
    use std::path::Path;

    fn only_source(builder: &ConfigurationBuilder) -> String {
        assert_eq!(builder.len(), 1);
        format!("{:?}", builder.sources()[0])
    }

    #[test]
    fn test_add_secrets_uses_defaults() {
        let mut builder = ConfigurationBuilder::new();
        builder.add_secrets();
        let rendered = only_source(&builder);
        assert!(rendered.contains("/run/secrets"));
        assert!(rendered.contains("optional: false"));
    }

    #[test]
    fn test_add_secrets_dir_missing_fails() {
        let temp = tempfile::tempdir().unwrap();
        let mut builder = ConfigurationBuilder::new();
        builder.add_secrets_dir(temp.path().join("missing"));

        assert!(matches!(
            builder.build(),
            Err(SecretsError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_add_secrets_dir_optional() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("api__key"), "k").unwrap();

        let mut builder = ConfigurationBuilder::new();
        builder
            .add_secrets_dir_optional(temp.path().join("missing"), true)
            .add_secrets_dir_optional(temp.path(), false);
        let config = builder.build().unwrap();

        assert_eq!(config.get("api:key"), Some("k"));
    }

    #[test]
    fn test_add_secrets_optional() {
        let mut builder = ConfigurationBuilder::new();
        builder.add_secrets_optional(true);
        let rendered = only_source(&builder);
        assert!(rendered.contains("optional: true"));
    }

    #[test]
    fn test_add_secrets_with_configurator() {
        let mut builder = ConfigurationBuilder::new();
        builder.add_secrets_with(|source| {
            source.set_directory(Path::new("/elsewhere"));
            source.set_ignore_prefix(Some("skip.".to_string()));
            source.set_file_provider(std::sync::Arc::new(
                MemoryFileProvider::new()
                    .with_file("skip.me", "x")
                    .with_file("ignore.kept", "y"),
            ));
        });

        let config = builder.build().unwrap();
        assert_eq!(config.get("skip.me"), None);
        assert_eq!(config.get("ignore.kept"), Some("y"));
    }
}
