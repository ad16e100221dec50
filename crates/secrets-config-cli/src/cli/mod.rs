//! CLI module for the secrets inspector
//!
//! Loads a secrets directory with the library's rules and lists the keys it
//! produces, or prints a single value.

pub mod commands;
pub mod output;

pub use commands::{SecretsCli, SecretsCommands};
pub use output::{KeyListing, OutputFormat};

use secrets_config_core::SecretsError;
use std::io::Write;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution
    Success = 0,
    /// The requested key is not present
    KeyNotFound = 1,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// Secrets directory not found and not optional
    DirectoryNotFound = 4,
    /// Two entries normalize to the same key
    DuplicateKey = 5,
    /// I/O or internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine the exit code for a failed run
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<SecretsError>() {
            Some(SecretsError::Configuration(_)) => ExitCode::InvalidInput,
            Some(SecretsError::DirectoryNotFound { .. }) => ExitCode::DirectoryNotFound,
            Some(SecretsError::DuplicateKey { .. }) => ExitCode::DuplicateKey,
            Some(SecretsError::Io(_)) | None => ExitCode::InternalError,
        }
    }
}

/// Run the CLI with the given arguments, writing results to `out`
pub fn run(cli: SecretsCli, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    let source = cli.source()?;
    let provider = commands::load(&source)?;

    match cli.command {
        SecretsCommands::List {
            format,
            show_values,
        } => commands::execute_list(&provider, format, show_values, out),
        SecretsCommands::Get { key } => commands::execute_get(&provider, &key, out),
    }
}
