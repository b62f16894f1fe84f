//! The resolved configuration model.

use super::types::*;
use crate::parser::RawConfig;
use crate::sources::DataSource;
use crate::studies::StudySection;
use serde::Serialize;

/// A fully resolved deployment configuration.
///
/// Built from a parsed [`RawConfig`] by `Config::from_raw`. Resolution is
/// lenient: wrong-typed or `???` values fall back to defaults so that the
/// file can always be inspected, and `Config::validate` reports everything
/// a careful operator would want fixed before a run.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub general: General,
    pub projects: Projects,
    pub es_collection: EsCollection,
    pub es_enrichment: EsEnrichment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortinghat: Option<SortingHat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panels: Option<PanelsConfig>,
    pub phases: Phases,
    /// Data sources in declaration order.
    pub sources: Vec<DataSource>,
    /// Study parameter sections in declaration order.
    pub studies: Vec<StudySection>,
    /// The raw parse the config was resolved from.
    #[serde(skip)]
    pub(crate) raw: RawConfig,
}

impl Config {
    /// The raw parse underlying this configuration.
    pub fn raw(&self) -> &RawConfig {
        &self.raw
    }

    /// Look up a data source by its section name.
    pub fn source(&self, name: &str) -> Option<&DataSource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Look up a study parameter section by its full name
    /// (`enrich_onion:git`).
    pub fn study_section(&self, name: &str) -> Option<&StudySection> {
        self.studies.iter().find(|s| s.name == name)
    }

    /// Data-source section names in declaration order.
    pub fn data_sources(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name.as_str()).collect()
    }

    /// Backends with at least one declared data source, deduplicated,
    /// in declaration order (`github:issues` and `github:pulls` both
    /// contribute `github` once).
    pub fn backends(&self) -> Vec<&str> {
        let mut backends: Vec<&str> = Vec::new();
        for source in &self.sources {
            let backend = source.backend();
            if !backends.contains(&backend) {
                backends.push(backend);
            }
        }
        backends
    }
}
