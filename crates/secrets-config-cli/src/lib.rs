//! Secrets Config CLI
//!
//! Command-line inspector for container secrets mounts. It loads a secrets
//! directory exactly as an application using `secrets-config-core` would
//! and reports the resulting configuration keys.
//!
//! ## CLI Usage
//!
//! ```bash
//! # List keys from the default /run/secrets mount (values masked)
//! secrets-config list
//!
//! # List keys from another directory as JSON, with values
//! secrets-config --dir ./secrets list --format json --show-values
//!
//! # Print one value
//! secrets-config get database:password
//! ```

pub mod cli;

pub use cli::{run, ExitCode, SecretsCli, SecretsCommands};
