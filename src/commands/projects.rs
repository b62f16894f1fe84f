//! Implementation of the `mordant projects` command.

use crate::cli::ProjectsArgs;
use crate::config::Config;
use crate::error::{MordantError, Result};
use crate::projects::ProjectRegistry;
use std::path::PathBuf;

/// Execute the `mordant projects` command.
///
/// Reads the registry named by `projects.projects_file` (resolved
/// relative to the configuration file) and lists its projects.
pub fn cmd_projects(args: ProjectsArgs) -> Result<()> {
    let config = Config::load(&args.config)?;

    let registry_path = resolve_registry_path(&args.config, &config.projects.projects_file);
    let registry = ProjectRegistry::load(&registry_path)?.ok_or_else(|| {
        MordantError::UserError(format!(
            "projects file '{}' does not exist.\n\
             Fix: create it, or point projects.projects_file at the right path.",
            registry_path.display()
        ))
    })?;

    println!("Projects ({}):", registry.projects.len());
    println!();
    for (name, entry) in &registry.projects {
        let backends: Vec<&str> = entry.seeds.keys().map(String::as_str).collect();
        println!(
            "  {:24} {} seed(s): {}",
            name,
            entry.seed_count(),
            backends.join(", ")
        );
    }

    Ok(())
}

/// A relative `projects_file` is resolved against the configuration
/// file's directory, so the CLI works from anywhere.
fn resolve_registry_path(config_path: &std::path::Path, projects_file: &str) -> PathBuf {
    let projects_file = PathBuf::from(projects_file);
    if projects_file.is_absolute() {
        return projects_file;
    }
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(projects_file),
        _ => projects_file,
    }
}
