//! Implementation of the `mordant show` command.
//!
//! Prints the resolved configuration (defaults applied) as text or JSON,
//! whole or one section at a time.

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::{MordantError, Result};
use serde_json::Value;

/// Execute the `mordant show` command.
pub fn cmd_show(args: ShowArgs) -> Result<()> {
    let config = Config::load(&args.config)?;

    match &args.section {
        Some(name) => {
            let value = section_value(&config, name).ok_or_else(|| {
                MordantError::UserError(format!(
                    "no section `{}` in '{}'. Known sections: {}",
                    name,
                    args.config.display(),
                    config.raw().section_names().join(", ")
                ))
            })?;
            if args.json {
                println!("{}", to_pretty(&value)?);
            } else {
                print_section(name, &value);
            }
        }
        None => {
            if args.json {
                let value = to_value(&config)?;
                println!("{}", to_pretty(&value)?);
            } else {
                print_config(&config)?;
            }
        }
    }

    Ok(())
}

/// Resolve one section of the typed model into a JSON value.
fn section_value(config: &Config, name: &str) -> Option<Value> {
    let value = match name {
        "general" => to_value(&config.general).ok()?,
        "projects" => to_value(&config.projects).ok()?,
        "es_collection" => to_value(&config.es_collection).ok()?,
        "es_enrichment" => to_value(&config.es_enrichment).ok()?,
        "sortinghat" => to_value(config.sortinghat.as_ref()?).ok()?,
        "panels" => to_value(config.panels.as_ref()?).ok()?,
        "phases" => to_value(&config.phases).ok()?,
        _ => {
            if let Some(source) = config.source(name) {
                to_value(source).ok()?
            } else {
                to_value(config.study_section(name)?).ok()?
            }
        }
    };
    Some(value)
}

fn print_config(config: &Config) -> Result<()> {
    for name in [
        "general",
        "projects",
        "es_collection",
        "es_enrichment",
        "sortinghat",
        "panels",
        "phases",
    ] {
        if let Some(value) = section_value(config, name) {
            print_section(name, &value);
            println!();
        }
    }

    for source in &config.sources {
        if let Some(value) = section_value(config, &source.name) {
            print_section(&source.name, &value);
            println!();
        }
    }

    for study in &config.studies {
        if let Some(value) = section_value(config, &study.name) {
            print_section(&study.name, &value);
            println!();
        }
    }

    Ok(())
}

/// Print one resolved section as aligned `key value` lines.
fn print_section(name: &str, value: &Value) {
    println!("[{}]", name);
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                if key == "name" {
                    continue; // already in the header
                }
                println!("  {:22} {}", key, render_value(value));
            }
        }
        other => println!("  {}", render_value(other)),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| MordantError::UserError(format!("failed to serialize configuration: {}", e)))
}

fn to_pretty(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| MordantError::UserError(format!("failed to serialize configuration: {}", e)))
}
