//! Implementation of the `mordant menu` command.

use crate::cli::MenuArgs;
use crate::config::Config;
use crate::error::{MordantError, Result};
use crate::panels;

/// Execute the `mordant menu` command.
///
/// Composes the ordered dashboard menu from the configuration and a menu
/// description file.
pub fn cmd_menu(args: MenuArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    let menu = panels::load_menu(&args.menu)?;
    let composed = panels::compose_menu(&config, &menu);

    if args.json {
        let rendered = serde_json::to_string_pretty(&composed)
            .map_err(|e| MordantError::UserError(format!("failed to serialize menu: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("Menu for {}:", composed.title);
    println!();
    for entry in &composed.entries {
        println!("  {}", entry.name);
        for panel in &entry.panels {
            println!("    - {} ({})", panel.name, panel.panel);
        }
    }

    Ok(())
}
