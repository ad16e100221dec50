//! CLI command definitions for the secrets inspector
//!
//! Loads a secrets directory with the same rules an application would use
//! and reports what it contributes to configuration.

use clap::{Parser, Subcommand};
use secrets_config_core::{
    SecretsError, SecretsProvider, SecretsSource, DEFAULT_IGNORE_PREFIX, DEFAULT_SECRETS_DIRECTORY,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use super::output::{KeyListing, OutputFormat};
use super::ExitCode;

/// Secrets directory inspector
///
/// Shows the configuration keys a secrets mount produces, after ignore rules
/// and `__` -> `:` normalization.
#[derive(Parser, Debug)]
#[command(name = "secrets-config")]
#[command(about = "Inspect the configuration keys loaded from a secrets directory", long_about = None)]
#[command(version)]
pub struct SecretsCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Secrets directory to read
    #[arg(long, global = true, env = "SECRETS_DIR", default_value = DEFAULT_SECRETS_DIRECTORY)]
    pub dir: PathBuf,

    /// Treat a missing directory as empty instead of an error
    #[arg(
        long,
        global = true,
        env = "SECRETS_OPTIONAL",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub optional: bool,

    /// Skip entries whose file name starts with this prefix
    #[arg(
        long,
        global = true,
        env = "SECRETS_IGNORE_PREFIX",
        default_value = DEFAULT_IGNORE_PREFIX,
        conflicts_with = "no_ignore_prefix"
    )]
    pub ignore_prefix: String,

    /// Load every entry regardless of its name
    #[arg(long, global = true)]
    pub no_ignore_prefix: bool,

    #[command(subcommand)]
    pub command: SecretsCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum SecretsCommands {
    /// List the loaded configuration keys
    ///
    /// Values are masked unless --show-values is given.
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Print secret values instead of masking them
        #[arg(long)]
        show_values: bool,
    },

    /// Print the value of one key (case-insensitive)
    Get {
        /// Configuration key, e.g. database:password
        key: String,
    },
}

impl SecretsCli {
    /// Build the secrets source described by the global options
    pub fn source(&self) -> Result<SecretsSource, SecretsError> {
        if self.dir.as_os_str().is_empty() {
            return Err(SecretsError::configuration("secrets directory must not be empty"));
        }

        let mut source = SecretsSource::new()
            .with_directory(&self.dir)
            .with_optional(self.optional);
        if self.no_ignore_prefix || self.ignore_prefix.is_empty() {
            source.set_ignore_prefix(None);
        } else {
            source.set_ignore_prefix(Some(self.ignore_prefix.clone()));
        }
        debug!(?source, "Resolved secrets source");
        Ok(source)
    }
}

/// Load `source` into a provider
pub fn load(source: &SecretsSource) -> Result<SecretsProvider, SecretsError> {
    let mut provider = source.build();
    provider.load()?;
    Ok(provider)
}

/// Execute the list command
pub fn execute_list(
    provider: &SecretsProvider,
    format: OutputFormat,
    show_values: bool,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let listing = KeyListing::from_provider(provider, show_values);
    listing.render(format, out)?;
    Ok(ExitCode::Success)
}

/// Execute the get command
pub fn execute_get(provider: &SecretsProvider, key: &str, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    match provider.try_get(key) {
        Some(value) => {
            writeln!(out, "{}", value)?;
            Ok(ExitCode::Success)
        }
        None => {
            debug!(key, "Key not present in secrets directory");
            Ok(ExitCode::KeyNotFound)
        }
    }
}
