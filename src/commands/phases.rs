//! Implementation of the `mordant phases` command.

use crate::cli::PhasesArgs;
use crate::config::Config;
use crate::error::Result;

/// Execute the `mordant phases` command.
pub fn cmd_phases(args: PhasesArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    let phases = config.phases;

    println!("Phases:");
    for (name, enabled) in [
        ("collection", phases.collection),
        ("identities", phases.identities),
        ("enrichment", phases.enrichment),
        ("panels", phases.panels),
    ] {
        println!("  {:11} {}", name, if enabled { "on" } else { "off" });
    }

    if phases.is_empty() {
        println!();
        println!("No phase is enabled; a run would do nothing.");
    }

    Ok(())
}
