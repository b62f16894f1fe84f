//! Implementation of the `mordant aliases` command.

use crate::aliases::{alias_plan, alias_plans, AliasPlan};
use crate::cli::AliasesArgs;
use crate::config::Config;
use crate::error::{MordantError, Result};

/// Execute the `mordant aliases` command.
///
/// Prints the read aliases the dashboards expect on the raw and enriched
/// indices, for one data source or for all of them.
pub fn cmd_aliases(args: AliasesArgs) -> Result<()> {
    let config = Config::load(&args.config)?;

    let plans: Vec<AliasPlan> = match &args.section {
        Some(name) => {
            let source = config.source(name).ok_or_else(|| {
                MordantError::UserError(format!(
                    "no data source `{}` in '{}'. Declared sources: {}",
                    name,
                    args.config.display(),
                    config.data_sources().join(", ")
                ))
            })?;
            vec![alias_plan(source)]
        }
        None => alias_plans(&config),
    };

    if plans.is_empty() {
        println!("No data sources declared.");
        return Ok(());
    }

    for plan in &plans {
        println!("[{}]", plan.source);
        for entry in &plan.raw {
            println!("  raw       {:24} on {}", entry.alias, entry.index);
        }
        for entry in &plan.enriched {
            println!("  enriched  {:24} on {}", entry.alias, entry.index);
        }
        if plan.raw.is_empty() && plan.enriched.is_empty() {
            println!("  (no indices set)");
        }
        println!();
    }

    Ok(())
}
