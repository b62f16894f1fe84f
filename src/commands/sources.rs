//! Implementation of the `mordant sources` command.

use crate::cli::SourcesArgs;
use crate::config::Config;
use crate::error::Result;

/// Execute the `mordant sources` command.
///
/// Lists every declared data source with its indices, passthrough
/// parameters, and studies.
pub fn cmd_sources(args: SourcesArgs) -> Result<()> {
    let config = Config::load(&args.config)?;

    if config.sources.is_empty() {
        println!("No data sources declared.");
        return Ok(());
    }

    println!("Data sources ({}):", config.sources.len());
    println!();

    for source in &config.sources {
        println!("  {}", source.name);
        println!(
            "    raw index:       {}",
            source.raw_index.as_deref().unwrap_or("(not set)")
        );
        println!(
            "    enriched index:  {}",
            source.enriched_index.as_deref().unwrap_or("(not set)")
        );
        if !source.studies.is_empty() {
            println!("    studies:         {}", source.studies.join(", "));
        }
        if !source.params.is_empty() {
            let keys: Vec<&str> = source.params.keys().map(String::as_str).collect();
            println!("    parameters:      {}", keys.join(", "));
        }
        println!();
    }

    let backends = config.backends();
    println!("Backends: {}", backends.join(", "));

    Ok(())
}
