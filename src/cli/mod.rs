//! CLI argument parsing for mordant.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mordant: configuration loader and auditor for software-analytics
/// pipeline deployments.
///
/// A deployment is described by one INI-style file: runtime settings,
/// search-backend endpoints, identity-resolution settings, phase toggles,
/// one section per tracked data source, and study parameter sections.
/// Mordant parses, validates, and inspects those files.
#[derive(Parser, Debug)]
#[command(name = "mordant")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for mordant.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a deployment configuration.
    ///
    /// Parses the file, resolves the typed model, and reports every
    /// error and warning a run would trip over.
    Validate(ValidateArgs),

    /// Show the resolved configuration.
    ///
    /// Prints the typed view of the whole file or of one section, with
    /// defaults applied.
    Show(ShowArgs),

    /// List the declared data sources.
    ///
    /// Shows each source's raw and enriched indices and its studies.
    Sources(SourcesArgs),

    /// Show the phase toggles.
    ///
    /// Lists the pipeline phases with on/off markers.
    Phases(PhasesArgs),

    /// Show the index alias plan.
    ///
    /// Prints the read aliases the dashboards expect, for one data
    /// source or for all of them.
    Aliases(AliasesArgs),

    /// Compose the dashboard menu.
    ///
    /// Combines a menu description file with the enabled data sources
    /// into the ordered menu the dashboard layer shows.
    Menu(MenuArgs),

    /// List the projects in the project registry.
    ///
    /// Reads the JSON registry named by `projects.projects_file`.
    Projects(ProjectsArgs),
}

/// Arguments for the `validate` command.
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the deployment configuration file.
    pub config: PathBuf,

    /// Treat warnings (including `???` placeholders) as failures.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Path to the deployment configuration file.
    pub config: PathBuf,

    /// Show only this section (e.g. `general`, `git`, `enrich_onion:git`).
    #[arg(long)]
    pub section: Option<String>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `sources` command.
#[derive(Parser, Debug)]
pub struct SourcesArgs {
    /// Path to the deployment configuration file.
    pub config: PathBuf,
}

/// Arguments for the `phases` command.
#[derive(Parser, Debug)]
pub struct PhasesArgs {
    /// Path to the deployment configuration file.
    pub config: PathBuf,
}

/// Arguments for the `aliases` command.
#[derive(Parser, Debug)]
pub struct AliasesArgs {
    /// Path to the deployment configuration file.
    pub config: PathBuf,

    /// Only the plan for this data source section.
    pub section: Option<String>,
}

/// Arguments for the `menu` command.
#[derive(Parser, Debug)]
pub struct MenuArgs {
    /// Path to the deployment configuration file.
    pub config: PathBuf,

    /// Path to the menu description YAML file.
    #[arg(long)]
    pub menu: PathBuf,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `projects` command.
#[derive(Parser, Debug)]
pub struct ProjectsArgs {
    /// Path to the deployment configuration file.
    pub config: PathBuf,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
