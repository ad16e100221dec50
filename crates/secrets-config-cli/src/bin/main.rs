//! Secrets Config CLI
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Requested key not found
//! - 3: Invalid input or arguments
//! - 4: Secrets directory not found and not optional
//! - 5: Duplicate configuration key
//! - 10: I/O or internal error

use clap::Parser;
use secrets_config_cli::{run, ExitCode, SecretsCli};
use std::io::Write;

fn main() {
    let cli = SecretsCli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut stdout = std::io::stdout().lock();
    let exit_code = match run(cli, &mut stdout) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from_error(&err)
        }
    };
    // process::exit skips destructors
    let _ = stdout.flush();
    std::process::exit(exit_code.into());
}
