//! Configuration Sources and Providers
//!
//! Every source implements [`ConfigurationSource`] and produces a
//! [`ConfigurationProvider`], which the configuration container loads once
//! and then queries.
//!
//! # Supported Sources
//!
//! - **Secrets directory**: one file per key, as mounted by Docker and
//!   Kubernetes (`/run/secrets`)
//! - **Environment variables**: the process environment, optionally
//!   filtered by prefix
//! - **Memory**: fixed key/value pairs, for defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use secrets_config_core::providers::{EnvironmentSource, SecretsSource};
//! use secrets_config_core::ConfigurationBuilder;
//!
//! let config = ConfigurationBuilder::new()
//!     .with_source(EnvironmentSource::with_prefix("MYAPP_"))
//!     .with_source(SecretsSource::new().with_optional(true))
//!     .build()?;
//!
//! // Secrets were registered last, so they win over the environment
//! let password = config.get("database:password");
//! # Ok::<(), secrets_config_core::SecretsError>(())
//! ```

pub mod traits;
pub mod secrets;
pub mod env;
pub mod memory;

// Re-export core types
pub use traits::{ConfigurationProvider, ConfigurationSource};

// Re-export provider implementations
pub use secrets::{
    IgnoreCondition, IgnorePredicate, SecretsProvider, SecretsSource,
    DEFAULT_IGNORE_PREFIX, DEFAULT_SECRETS_DIRECTORY,
};
pub use env::{EnvNamingConfig, EnvironmentProvider, EnvironmentSource};
pub use memory::{MemoryProvider, MemorySource};
