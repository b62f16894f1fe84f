//! Command implementations for mordant.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, one module per command.

mod aliases;
mod menu;
mod phases;
mod projects;
mod show;
mod sources;
mod validate;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Validate(args) => validate::cmd_validate(args),
        Command::Show(args) => show::cmd_show(args),
        Command::Sources(args) => sources::cmd_sources(args),
        Command::Phases(args) => phases::cmd_phases(args),
        Command::Aliases(args) => aliases::cmd_aliases(args),
        Command::Menu(args) => menu::cmd_menu(args),
        Command::Projects(args) => projects::cmd_projects(args),
    }
}
