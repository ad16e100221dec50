//! Secrets Config Core
//!
//! Loads container secrets mounts into layered application configuration.
//!
//! Docker and Kubernetes expose secrets as a directory (by default
//! `/run/secrets`) holding one file per secret. This crate reads such a
//! directory into configuration keys, turning `__` in file names into the
//! `:` section separator, and layers it with other sources.
//!
//! ## Architecture
//!
//! 1. **Sources and providers** (`providers/`): a source describes where
//!    configuration comes from; its provider loads and serves it. The
//!    secrets directory source lives in `providers/secrets.rs`.
//!
//! 2. **File access** (`file_provider`): the listing/reading capability the
//!    secrets provider runs against, with filesystem and in-memory
//!    implementations.
//!
//! 3. **Configuration** (`configuration`): the layered container; the last
//!    registered source wins.
//!
//! 4. **Registration** (`registration`, `host`): shorthands for adding
//!    secrets sources, including "everywhere except Development".
//!
//! ## Example
//!
//! ```rust,no_run
//! use secrets_config_core::{ConfigurationBuilder, SecretsConfigurationExt};
//!
//! let mut builder = ConfigurationBuilder::new();
//! builder.add_secrets_optional(true);
//! let config = builder.build()?;
//!
//! if let Some(password) = config.get("database:password") {
//!     // ...
//! #   let _ = password;
//! }
//! # Ok::<(), secrets_config_core::SecretsError>(())
//! ```

pub mod configuration;
pub mod data;
pub mod error;
pub mod file_provider;
pub mod host;
pub mod key;
pub mod providers;
pub mod registration;

pub use configuration::{Configuration, ConfigurationBuilder};
pub use data::ConfigData;
pub use error::{SecretsError, SecretsResult};
pub use file_provider::{
    DirectoryContents, FileInfo, FileProvider, MemoryFileInfo, MemoryFileProvider,
    PhysicalFileProvider,
};
pub use host::{HostBuilder, HostContext, HostEnvironment};
pub use key::{normalize_key, KEY_DELIMITER};
pub use providers::{
    ConfigurationProvider, ConfigurationSource, SecretsProvider, SecretsSource,
    DEFAULT_IGNORE_PREFIX, DEFAULT_SECRETS_DIRECTORY,
};
pub use registration::SecretsConfigurationExt;
