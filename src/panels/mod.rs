//! Dashboard panel sets and menu composition.
//!
//! A deployment ships a YAML *menu description*: one entry per data
//! source, naming the dashboards that source contributes. The composed
//! menu shown to users is derived from that description and the
//! configuration: only enabled sources appear, `Overview` always comes
//! first, `Data Status` and `About` always close the menu, and the
//! community / kafka dashboard groups are appended when their toggles in
//! `[panels]` are set.

use crate::config::Config;
use crate::error::{MordantError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Panels uploaded for every deployment, independent of data sources.
pub const COMMON_PANELS: &[&str] = &[
    "panels/json/overview.json",
    "panels/json/data_status.json",
    "panels/json/about.json",
];

/// Common panels that embed visualizations from several data sources and
/// therefore must be filtered to the enabled source set.
pub const MULTI_SOURCE_PANELS: &[&str] = &[
    "panels/json/overview.json",
    "panels/json/data_status.json",
];

const ONION_PANEL_OVERALL: &str = "panels/json/onion_overall.json";
const ONION_PANEL_PROJECTS: &str = "panels/json/onion_projects.json";
const ONION_PANEL_ORGS: &str = "panels/json/onion_organizations.json";
const ONION_INDEX_PATTERN: &str = "panels/json/all_onion-index-pattern.json";

const KAFKA_PANEL: &str = "panels/json/kip.json";
const KAFKA_INDEX_PATTERN: &str = "panels/json/kafka-index-pattern.json";

/// One data source's block in the menu description file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSource {
    /// Display name of the menu group.
    pub name: String,
    /// Data source the group belongs to (section name or backend).
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Index-pattern files uploaded alongside the dashboards.
    #[serde(rename = "index-patterns", default, skip_serializing_if = "Vec::is_empty")]
    pub index_patterns: Vec<String>,
    /// Dashboards in display order.
    #[serde(default)]
    pub menu: Vec<MenuEntry>,
}

/// One dashboard inside a menu group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    pub panel: String,
}

/// The composed dashboard menu, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedMenu {
    /// Title shown on top of the menu, from `general.short_name`.
    pub title: String,
    pub entries: Vec<ComposedEntry>,
}

/// One top-level menu group with its dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct ComposedEntry {
    pub name: String,
    pub panels: Vec<MenuEntry>,
}

/// Panel files one source contributes, for the uploader.
#[derive(Debug, Clone, Serialize)]
pub struct PanelSet {
    pub source: String,
    pub files: Vec<String>,
}

/// Parse a menu description from YAML text.
pub fn parse_menu(yaml: &str) -> Result<Vec<MenuSource>> {
    serde_yaml::from_str(yaml)
        .map_err(|e| MordantError::UserError(format!("failed to parse menu description: {}", e)))
}

/// Load a menu description from a YAML file.
pub fn load_menu<P: AsRef<Path>>(path: P) -> Result<Vec<MenuSource>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        MordantError::UserError(format!(
            "failed to read menu file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_menu(&content)
}

/// The synthetic community menu group (onion dashboards).
fn community_menu() -> MenuSource {
    MenuSource {
        name: "Community".to_string(),
        source: "community".to_string(),
        icon: None,
        index_patterns: vec![ONION_INDEX_PATTERN.to_string()],
        menu: vec![
            MenuEntry {
                name: "Overall".to_string(),
                panel: ONION_PANEL_OVERALL.to_string(),
            },
            MenuEntry {
                name: "Projects".to_string(),
                panel: ONION_PANEL_PROJECTS.to_string(),
            },
            MenuEntry {
                name: "Organizations".to_string(),
                panel: ONION_PANEL_ORGS.to_string(),
            },
        ],
    }
}

/// The synthetic kafka menu group.
fn kafka_menu() -> MenuSource {
    MenuSource {
        name: "KIP".to_string(),
        source: "kafka".to_string(),
        icon: None,
        index_patterns: vec![KAFKA_INDEX_PATTERN.to_string()],
        menu: vec![MenuEntry {
            name: "Overview".to_string(),
            panel: KAFKA_PANEL.to_string(),
        }],
    }
}

/// True if a menu group's source is enabled by this configuration.
fn source_enabled(config: &Config, source: &str) -> bool {
    match source {
        "community" => config.panels.as_ref().is_some_and(|p| p.community),
        "kafka" => config.panels.as_ref().is_some_and(|p| p.kafka),
        _ => config
            .sources
            .iter()
            .any(|s| s.name == source || s.backend() == source),
    }
}

/// Menu groups enabled by the configuration, description order first,
/// community and kafka appended when toggled.
fn enabled_groups(config: &Config, menu: &[MenuSource]) -> Vec<MenuSource> {
    let mut groups: Vec<MenuSource> = menu
        .iter()
        .filter(|entry| source_enabled(config, &entry.source))
        .cloned()
        .collect();

    if source_enabled(config, "community") {
        groups.push(community_menu());
    }
    if source_enabled(config, "kafka") {
        groups.push(kafka_menu());
    }
    groups
}

/// Compose the ordered dashboard menu for a configuration.
pub fn compose_menu(config: &Config, menu: &[MenuSource]) -> ComposedMenu {
    let mut entries = Vec::new();

    entries.push(ComposedEntry {
        name: "Overview".to_string(),
        panels: vec![MenuEntry {
            name: "Overview".to_string(),
            panel: COMMON_PANELS[0].to_string(),
        }],
    });

    for group in enabled_groups(config, menu) {
        entries.push(ComposedEntry {
            name: group.name.clone(),
            panels: group.menu.clone(),
        });
    }

    entries.push(ComposedEntry {
        name: "Data Status".to_string(),
        panels: vec![MenuEntry {
            name: "Data Status".to_string(),
            panel: COMMON_PANELS[1].to_string(),
        }],
    });
    entries.push(ComposedEntry {
        name: "About".to_string(),
        panels: vec![MenuEntry {
            name: "About".to_string(),
            panel: COMMON_PANELS[2].to_string(),
        }],
    });

    let title = if config.general.short_name.is_empty() {
        "Analytics".to_string()
    } else {
        config.general.short_name.clone()
    };

    ComposedMenu { title, entries }
}

/// Panel files to upload, per enabled source, commons first.
///
/// The common set is listed under the pseudo-source `common`; its
/// multi-source members are parameterized by the enabled source set at
/// upload time.
pub fn panel_sets(config: &Config, menu: &[MenuSource]) -> Vec<PanelSet> {
    let mut sets = vec![PanelSet {
        source: "common".to_string(),
        files: COMMON_PANELS.iter().map(|p| p.to_string()).collect(),
    }];

    for group in enabled_groups(config, menu) {
        let mut files: Vec<String> = group.menu.iter().map(|e| e.panel.clone()).collect();
        files.extend(group.index_patterns.iter().cloned());
        sets.push(PanelSet {
            source: group.source.clone(),
            files,
        });
    }

    sets
}
