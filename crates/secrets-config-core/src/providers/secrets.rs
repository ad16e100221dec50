//! Secrets Directory Provider
//!
//! Loads configuration from a container secrets mount: a directory whose
//! immediate children are one file per key, the file content being the
//! value. Nested configuration paths cannot contain `:` in file names on
//! *nix hosts, so they are written with a double underscore and normalized
//! on load (`logging__level` becomes `logging:level`).
//!
//! # Loading rules
//!
//! - Only the top level is read; nested directories are skipped.
//! - Entries whose name matches the ignore condition are skipped. By default
//!   that is any name starting with `ignore.`.
//! - A missing directory is an error unless the source is optional.
//! - Two entries that normalize to the same key (case-insensitively) fail
//!   the load with [`SecretsError::DuplicateKey`]. Collisions are treated as
//!   misconfiguration instead of letting one secret shadow another.
//!
//! # Example
//!
//! ```rust,no_run
//! use secrets_config_core::providers::SecretsSource;
//!
//! let mut provider = SecretsSource::new()
//!     .with_directory("/run/secrets")
//!     .with_optional(true)
//!     .build();
//! provider.load()?;
//! let password = provider.try_get("database:password");
//! # Ok::<(), secrets_config_core::SecretsError>(())
//! ```

use super::traits::{ConfigurationProvider, ConfigurationSource};
use crate::data::ConfigData;
use crate::error::{SecretsError, SecretsResult};
use crate::file_provider::{DirectoryContents, FileInfo, FileProvider, PhysicalFileProvider};
use crate::key::normalize_key;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default secrets mount used by Docker and Kubernetes
pub const DEFAULT_SECRETS_DIRECTORY: &str = "/run/secrets";

/// Entries starting with this prefix are skipped by default
pub const DEFAULT_IGNORE_PREFIX: &str = "ignore.";

/// Custom ignore predicate over raw entry names
pub type IgnorePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// How a source decides which entries to skip
#[derive(Clone)]
pub enum IgnoreCondition {
    /// Skip names starting with the source's ignore prefix, read at call time
    Prefix,
    /// Skip names for which the predicate returns true
    Custom(IgnorePredicate),
}

impl fmt::Debug for IgnoreCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreCondition::Prefix => f.write_str("Prefix"),
            IgnoreCondition::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Describes a secrets directory and how to read it
#[derive(Clone)]
pub struct SecretsSource {
    /// Directory used when no file provider is set
    secrets_directory: PathBuf,
    /// Whether a missing directory is tolerated
    optional: bool,
    /// Prefix for the default ignore condition; `None` ignores nothing
    ignore_prefix: Option<String>,
    ignore_condition: IgnoreCondition,
    /// Storage to list instead of `secrets_directory`
    file_provider: Option<Arc<dyn FileProvider>>,
}

impl SecretsSource {
    /// Source for `/run/secrets`, required, ignoring `ignore.*`
    pub fn new() -> Self {
        Self {
            secrets_directory: PathBuf::from(DEFAULT_SECRETS_DIRECTORY),
            optional: false,
            ignore_prefix: Some(DEFAULT_IGNORE_PREFIX.to_string()),
            ignore_condition: IgnoreCondition::Prefix,
            file_provider: None,
        }
    }

    /// Set the secrets directory (builder pattern)
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.set_directory(directory);
        self
    }

    /// Set whether the directory may be missing (builder pattern)
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.set_optional(optional);
        self
    }

    /// Set the ignore prefix (builder pattern)
    pub fn with_ignore_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.set_ignore_prefix(Some(prefix.into()));
        self
    }

    /// Replace the ignore condition with a predicate (builder pattern)
    pub fn with_ignore_condition<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.set_ignore_condition(predicate);
        self
    }

    /// Read from `provider` instead of the filesystem (builder pattern)
    pub fn with_file_provider<P: FileProvider + 'static>(mut self, provider: P) -> Self {
        self.set_file_provider(Arc::new(provider));
        self
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.secrets_directory = directory.into();
    }

    pub fn set_optional(&mut self, optional: bool) {
        self.optional = optional;
    }

    /// Set or clear the ignore prefix. Only affects the default condition.
    pub fn set_ignore_prefix(&mut self, prefix: Option<String>) {
        self.ignore_prefix = prefix;
    }

    /// Replace the ignore condition. The prefix is no longer consulted.
    pub fn set_ignore_condition<F>(&mut self, predicate: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.ignore_condition = IgnoreCondition::Custom(Arc::new(predicate));
    }

    /// Go back to prefix-based ignoring
    pub fn reset_ignore_condition(&mut self) {
        self.ignore_condition = IgnoreCondition::Prefix;
    }

    pub fn set_file_provider(&mut self, provider: Arc<dyn FileProvider>) {
        self.file_provider = Some(provider);
    }

    pub fn directory(&self) -> &Path {
        &self.secrets_directory
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn ignore_prefix(&self) -> Option<&str> {
        self.ignore_prefix.as_deref()
    }

    pub fn ignore_condition(&self) -> &IgnoreCondition {
        &self.ignore_condition
    }

    pub fn file_provider(&self) -> Option<&dyn FileProvider> {
        self.file_provider.as_deref()
    }

    /// Whether an entry with this raw name is skipped
    pub fn should_ignore(&self, name: &str) -> bool {
        match &self.ignore_condition {
            IgnoreCondition::Prefix => self
                .ignore_prefix
                .as_deref()
                .is_some_and(|prefix| name.starts_with(prefix)),
            IgnoreCondition::Custom(predicate) => predicate(name),
        }
    }

    /// Create an unloaded provider over a snapshot of this source
    pub fn build(&self) -> SecretsProvider {
        SecretsProvider::new(Arc::new(self.clone()))
    }
}

impl Default for SecretsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretsSource")
            .field("secrets_directory", &self.secrets_directory)
            .field("optional", &self.optional)
            .field("ignore_prefix", &self.ignore_prefix)
            .field("ignore_condition", &self.ignore_condition)
            .field("file_provider", &self.file_provider.is_some())
            .finish()
    }
}

impl ConfigurationSource for SecretsSource {
    fn build(&self) -> Box<dyn ConfigurationProvider> {
        Box::new(SecretsSource::build(self))
    }
}

/// Provider holding the entries of one secrets directory
#[derive(Debug)]
pub struct SecretsProvider {
    source: Arc<SecretsSource>,
    data: ConfigData,
    loaded: bool,
}

impl SecretsProvider {
    /// Create an unloaded provider
    pub fn new(source: Arc<SecretsSource>) -> Self {
        Self {
            source,
            data: ConfigData::new(),
            loaded: false,
        }
    }

    /// Create a provider from a source that may be absent, e.g. one looked
    /// up by name at runtime
    pub fn try_from_source(source: Option<Arc<SecretsSource>>) -> SecretsResult<Self> {
        source
            .map(Self::new)
            .ok_or_else(|| SecretsError::configuration("secrets source is required"))
    }

    pub fn source(&self) -> &SecretsSource {
        &self.source
    }

    /// Whether the last `load` completed successfully
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Entries from the last successful load
    pub fn data(&self) -> &ConfigData {
        &self.data
    }

    /// Scan the secrets directory, replacing any previously loaded entries.
    ///
    /// On error the provider is left empty and unloaded.
    pub fn load(&mut self) -> SecretsResult<()> {
        self.data = ConfigData::new();
        self.loaded = false;

        let data = self.scan()?;
        info!(
            directory = %self.source.directory().display(),
            entries = data.len(),
            "Loaded secrets"
        );
        self.data = data;
        self.loaded = true;
        Ok(())
    }

    /// Case-insensitive exact lookup
    pub fn try_get(&self, key: &str) -> Option<&str> {
        self.data.get(key)
    }

    fn scan(&self) -> SecretsResult<ConfigData> {
        let source = &self.source;
        let physical;
        let file_provider: &dyn FileProvider = match source.file_provider() {
            Some(provider) => provider,
            None => {
                if !source.directory().is_dir() {
                    return self.directory_missing();
                }
                debug!(
                    directory = %source.directory().display(),
                    "Binding filesystem provider for secrets directory"
                );
                physical = PhysicalFileProvider::new(source.directory());
                &physical
            }
        };

        // Checked again: a supplied provider has not been validated yet
        let entries = match file_provider.directory_contents()? {
            DirectoryContents::Found(entries) => entries,
            DirectoryContents::NotFound => return self.directory_missing(),
        };

        let mut data = ConfigData::new();
        for entry in entries {
            if entry.is_directory() {
                debug!(name = entry.name(), "Skipping nested directory");
                continue;
            }
            if source.should_ignore(entry.name()) {
                debug!(name = entry.name(), "Skipping ignored secret");
                continue;
            }

            let key = normalize_key(entry.name());
            let value = read_entry(entry.as_ref())?;
            data.try_insert(key, value)?;
        }

        Ok(data)
    }

    fn directory_missing(&self) -> SecretsResult<ConfigData> {
        let directory = self.source.directory();
        if self.source.is_optional() {
            warn!(
                directory = %directory.display(),
                "Optional secrets directory not found, no secrets loaded"
            );
            Ok(ConfigData::new())
        } else {
            Err(SecretsError::directory_not_found(directory))
        }
    }
}

/// Byte-order mark some editors write at the start of UTF-8 files
const UTF8_BOM: char = '\u{feff}';

/// Read an entry to the end; its reader is dropped before returning.
///
/// Content is decoded lossily: invalid UTF-8 sequences become U+FFFD, so a
/// binary file in the mount never fails the load. A leading BOM is dropped.
fn read_entry(entry: &dyn FileInfo) -> SecretsResult<String> {
    let mut bytes = Vec::new();
    entry.open_read()?.read_to_end(&mut bytes)?;
    let value = String::from_utf8_lossy(&bytes);
    Ok(match value.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => value.into_owned(),
    })
}

impl ConfigurationProvider for SecretsProvider {
    fn name(&self) -> &str {
        "secrets"
    }

    fn load(&mut self) -> SecretsResult<()> {
        SecretsProvider::load(self)
    }

    fn try_get(&self, key: &str) -> Option<&str> {
        SecretsProvider::try_get(self, key)
    }

    fn keys(&self) -> Vec<&str> {
        self.data.keys().collect()
    }
}
