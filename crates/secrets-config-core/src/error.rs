//! Error types for secrets configuration loading
//!
//! Every failure of a load pass is fatal to that pass. The only defined
//! non-errors are the two "directory missing but optional" cases, which the
//! provider handles before any of these variants are produced.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or loading configuration sources
#[derive(Error, Debug)]
pub enum SecretsError {
    /// A source or setting was unusable before any I/O took place
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The secrets directory is absent and the source is not optional
    #[error("Secrets directory not found and not optional: {}", path.display())]
    DirectoryNotFound {
        path: PathBuf,
    },

    /// Two entries normalized to the same configuration key
    #[error("Duplicate configuration key: {key}")]
    DuplicateKey {
        key: String,
    },

    /// I/O error from the file-access layer, passed through unchanged
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SecretsError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        SecretsError::Configuration(msg.into())
    }

    /// Create a directory-not-found error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        SecretsError::DirectoryNotFound { path: path.into() }
    }

    /// Create a duplicate-key error
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        SecretsError::DuplicateKey { key: key.into() }
    }
}

/// Result type alias for secrets configuration operations
pub type SecretsResult<T> = std::result::Result<T, SecretsError>;
