//! Per-section configuration types and defaults.
//!
//! Each reserved section of the deployment file resolves to one of the
//! structs below. Defaults match what the pipeline runtime assumes when an
//! optional key is absent.

use crate::error::{MordantError, Result};
use serde::Serialize;

/// Runtime settings from the `[general]` section.
#[derive(Debug, Clone, Serialize)]
pub struct General {
    /// Short project name shown on dashboards.
    pub short_name: String,
    /// Keep running in a refresh loop instead of a single pass.
    pub update: bool,
    /// Minimum seconds between refresh passes.
    pub min_update_delay: i64,
    /// Debug-level logging.
    pub debug: bool,
    /// Directory for execution logs.
    pub logs_dir: String,
    /// Items per bulk write to the search backend.
    pub bulk_size: i64,
    /// Items per scroll read from the search backend.
    pub scroll_size: i64,
}

impl Default for General {
    fn default() -> Self {
        Self {
            short_name: String::new(),
            update: false,
            min_update_delay: default_min_update_delay(),
            debug: true,
            logs_dir: default_logs_dir(),
            bulk_size: default_bulk_size(),
            scroll_size: default_scroll_size(),
        }
    }
}

/// The `[projects]` section: where the project registry lives.
#[derive(Debug, Clone, Serialize)]
pub struct Projects {
    /// Path to the JSON registry of tracked projects.
    pub projects_file: String,
}

impl Default for Projects {
    fn default() -> Self {
        Self {
            projects_file: default_projects_file(),
        }
    }
}

/// The `[es_collection]` section: endpoint for raw indices.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EsCollection {
    pub url: Option<String>,
}

impl EsCollection {
    /// The endpoint URL, or an error when it is missing or still `???`.
    pub fn require_url(&self) -> Result<&str> {
        self.url.as_deref().ok_or_else(|| {
            MordantError::UserError("es_collection.url is not set".to_string())
        })
    }
}

/// The `[es_enrichment]` section: endpoint for enriched indices.
#[derive(Debug, Clone, Serialize)]
pub struct EsEnrichment {
    pub url: Option<String>,
    /// Refresh enriched indices after identity updates.
    pub autorefresh: bool,
}

impl Default for EsEnrichment {
    fn default() -> Self {
        Self {
            url: None,
            autorefresh: true,
        }
    }
}

impl EsEnrichment {
    /// The endpoint URL, or an error when it is missing or still `???`.
    pub fn require_url(&self) -> Result<&str> {
        self.url.as_deref().ok_or_else(|| {
            MordantError::UserError("es_enrichment.url is not set".to_string())
        })
    }
}

/// The `[sortinghat]` section: identity resolution service settings.
#[derive(Debug, Clone, Serialize)]
pub struct SortingHat {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub load_orgs: bool,
    pub orgs_file: Option<String>,
    pub identities_file: Vec<String>,
    pub identities_api_token: Option<String>,
    /// Affiliate identities to organizations.
    pub affiliate: bool,
    /// Identity matching criteria, in application order.
    pub matching: Vec<String>,
    /// Seconds between identity refresh passes.
    pub sleep_for: i64,
    /// Profile names treated as bots.
    pub bots_names: Vec<String>,
    /// Profile names excluded from bot treatment.
    pub no_bots_names: Vec<String>,
    /// Data sources used to seed profiles, in priority order.
    pub autoprofile: Vec<String>,
    /// Organization bucket for unaffiliated identities.
    pub unaffiliated_group: String,
}

impl Default for SortingHat {
    fn default() -> Self {
        Self {
            host: String::new(),
            user: String::new(),
            password: String::new(),
            database: String::new(),
            load_orgs: false,
            orgs_file: None,
            identities_file: Vec::new(),
            identities_api_token: None,
            affiliate: true,
            matching: Vec::new(),
            sleep_for: default_sleep_for(),
            bots_names: Vec::new(),
            no_bots_names: Vec::new(),
            autoprofile: Vec::new(),
            unaffiliated_group: default_unaffiliated_group(),
        }
    }
}

/// The `[panels]` section: dashboard provisioning settings.
#[derive(Debug, Clone, Serialize)]
pub struct PanelsConfig {
    /// Default start of the dashboard time picker.
    pub kibiter_time_from: String,
    /// Default index pattern selected in the dashboard UI.
    pub kibiter_default_index: String,
    pub kibiter_url: Option<String>,
    pub kibiter_version: Option<String>,
    /// Include the community (onion) dashboards.
    pub community: bool,
    /// Include the kafka dashboards.
    pub kafka: bool,
}

impl Default for PanelsConfig {
    fn default() -> Self {
        Self {
            kibiter_time_from: default_kibiter_time_from(),
            kibiter_default_index: default_kibiter_default_index(),
            kibiter_url: None,
            kibiter_version: None,
            community: false,
            kafka: false,
        }
    }
}

/// The `[phases]` section: which pipeline stages run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Phases {
    pub collection: bool,
    pub identities: bool,
    pub enrichment: bool,
    pub panels: bool,
}

impl Phases {
    /// Names of the active phases, in pipeline order.
    pub fn active(&self) -> Vec<&'static str> {
        let mut active = Vec::new();
        if self.collection {
            active.push("collection");
        }
        if self.identities {
            active.push("identities");
        }
        if self.enrichment {
            active.push("enrichment");
        }
        if self.panels {
            active.push("panels");
        }
        active
    }

    /// True if no phase is enabled.
    pub fn is_empty(&self) -> bool {
        !(self.collection || self.identities || self.enrichment || self.panels)
    }
}

// Default value functions, shared by Default impls and the loader.
pub(crate) fn default_min_update_delay() -> i64 {
    60
}
pub(crate) fn default_logs_dir() -> String {
    "logs".to_string()
}
pub(crate) fn default_bulk_size() -> i64 {
    1000
}
pub(crate) fn default_scroll_size() -> i64 {
    100
}
pub(crate) fn default_projects_file() -> String {
    "projects.json".to_string()
}
pub(crate) fn default_sleep_for() -> i64 {
    3600
}
pub(crate) fn default_unaffiliated_group() -> String {
    "Unknown".to_string()
}
pub(crate) fn default_kibiter_time_from() -> String {
    "now-90d".to_string()
}
pub(crate) fn default_kibiter_default_index() -> String {
    "git".to_string()
}
