//! eip712-typegen command line entrypoint.
//!
//! Reads a Cosmos transaction payload as JSON, generates the EIP-712 `types`
//! object for its messages, and prints it to stdout.
//!
//! Input:
//! - `--input <file>` or stdin
//! - `--flatten` moves the `msgs` array of a sign doc into `msg<i>` slots
//! - `--num-messages` overrides the number of slots counted in the payload
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `CONFIG` points at a JSON configuration file
//! - `MAX_DUPL_TYPEDEFS`, `PRETTY` override configuration defaults
//! - `RUST_LOG` controls log verbosity (logs go to stderr)
//!
//! Failures are logged once and end the process with a non-zero exit code.

mod config;
mod run;
mod telemetry;

use clap::Parser;
use dotenvy::dotenv;
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;

use crate::config::CliArgs;
use crate::telemetry::Telemetry;

fn main() -> ExitCode {
    // Load .env variables
    dotenv().ok();

    Telemetry::new()
        .with_default_level(LevelFilter::WARN)
        .register();

    let args = CliArgs::parse();
    match run::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
