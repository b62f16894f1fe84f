//! Implementation of the `mordant validate` command.

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{MordantError, Result};

/// Execute the `mordant validate` command.
///
/// Parses and resolves the configuration, prints the findings report, and
/// fails with exit code 2 when errors (or, under `--strict`, warnings)
/// remain.
pub fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    let report = config.validate();

    println!("Configuration: {}", args.config.display());
    println!("Sections:      {}", config.raw().sections.len());
    println!("Data sources:  {}", config.sources.len());
    println!();

    if report.findings.is_empty() {
        println!("No findings. The configuration is ready to run.");
        return Ok(());
    }

    println!("{}", report.render());
    println!();
    println!("Summary: {}", report.summary());

    if report.is_blocking(args.strict) {
        if args.strict && !report.has_errors() {
            return Err(MordantError::ValidationError(format!(
                "{} (strict mode treats warnings as failures)",
                report.summary()
            )));
        }
        return Err(MordantError::ValidationError(report.summary()));
    }

    Ok(())
}
