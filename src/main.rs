//! Mordant: configuration loader and auditor for software-analytics
//! pipeline deployments.
//!
//! This is the main entry point for the `mordant` CLI. It parses
//! arguments, dispatches to the appropriate command handler, and handles
//! errors with proper exit codes.

mod cli;
mod commands;
pub mod aliases;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod panels;
pub mod parser;
pub mod projects;
pub mod report;
pub mod schema;
pub mod sources;
pub mod studies;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
