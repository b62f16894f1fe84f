//! Section and option schema for the deployment configuration.
//!
//! Section names fall into three groups:
//!
//! - reserved sections consumed by the pipeline runtime (`general`,
//!   `projects`, `es_collection`, `es_enrichment`, `sortinghat`, `panels`,
//!   `phases`),
//! - study parameter sections named `<family>:<source>`,
//! - everything else, which declares a data source (`git`, `github:issues`,
//!   `gitlab:merge`, ...).

/// Expected type of an option value, for schema checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedType {
    Str,
    Int,
    Bool,
    List,
    /// No type constraint (backend passthrough parameters).
    Any,
}

impl ExpectedType {
    /// Human-readable name used in validation messages.
    pub fn describe(self) -> &'static str {
        match self {
            ExpectedType::Str => "a string",
            ExpectedType::Int => "an integer",
            ExpectedType::Bool => "a boolean (true, True, False, false)",
            ExpectedType::List => "a list ([a, b, ...])",
            ExpectedType::Any => "any value",
        }
    }
}

/// Schema entry for one option of a reserved section.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub key: &'static str,
    pub expected: ExpectedType,
    pub required: bool,
}

const fn spec(key: &'static str, expected: ExpectedType, required: bool) -> OptionSpec {
    OptionSpec {
        key,
        expected,
        required,
    }
}

/// Sections consumed by the pipeline runtime itself.
pub const RESERVED_SECTIONS: &[&str] = &[
    "general",
    "projects",
    "es_collection",
    "es_enrichment",
    "sortinghat",
    "panels",
    "phases",
];

/// Study families recognized in `studies` lists and parameter sections.
pub const STUDY_FAMILIES: &[&str] = &[
    "enrich_demography",
    "enrich_areas_of_code",
    "enrich_onion",
];

const GENERAL: &[OptionSpec] = &[
    spec("short_name", ExpectedType::Str, true),
    spec("update", ExpectedType::Bool, false),
    spec("min_update_delay", ExpectedType::Int, false),
    spec("debug", ExpectedType::Bool, false),
    spec("logs_dir", ExpectedType::Str, false),
    spec("bulk_size", ExpectedType::Int, false),
    spec("scroll_size", ExpectedType::Int, false),
];

const PROJECTS: &[OptionSpec] = &[spec("projects_file", ExpectedType::Str, false)];

const ES_COLLECTION: &[OptionSpec] = &[spec("url", ExpectedType::Str, true)];

const ES_ENRICHMENT: &[OptionSpec] = &[
    spec("url", ExpectedType::Str, true),
    spec("autorefresh", ExpectedType::Bool, false),
];

const SORTINGHAT: &[OptionSpec] = &[
    spec("host", ExpectedType::Str, true),
    spec("user", ExpectedType::Str, true),
    spec("password", ExpectedType::Str, true),
    spec("database", ExpectedType::Str, true),
    spec("load_orgs", ExpectedType::Bool, false),
    spec("orgs_file", ExpectedType::Str, false),
    spec("identities_file", ExpectedType::List, false),
    spec("identities_api_token", ExpectedType::Str, false),
    spec("affiliate", ExpectedType::Bool, false),
    spec("matching", ExpectedType::List, false),
    spec("sleep_for", ExpectedType::Int, false),
    spec("bots_names", ExpectedType::List, false),
    spec("no_bots_names", ExpectedType::List, false),
    spec("autoprofile", ExpectedType::List, false),
    spec("unaffiliated_group", ExpectedType::Str, false),
];

const PANELS: &[OptionSpec] = &[
    spec("kibiter_time_from", ExpectedType::Str, false),
    spec("kibiter_default_index", ExpectedType::Str, false),
    spec("kibiter_url", ExpectedType::Str, false),
    spec("kibiter_version", ExpectedType::Str, false),
    spec("community", ExpectedType::Bool, false),
    spec("kafka", ExpectedType::Bool, false),
];

const PHASES: &[OptionSpec] = &[
    spec("collection", ExpectedType::Bool, false),
    spec("identities", ExpectedType::Bool, false),
    spec("enrichment", ExpectedType::Bool, false),
    spec("panels", ExpectedType::Bool, false),
];

/// Schema for the fixed keys of a data-source section. Everything not
/// listed here is a backend passthrough parameter.
pub const DATA_SOURCE: &[OptionSpec] = &[
    spec("raw_index", ExpectedType::Str, true),
    spec("enriched_index", ExpectedType::Str, true),
    spec("studies", ExpectedType::List, false),
];

/// Look up the option schema for a reserved section.
pub fn section_schema(name: &str) -> Option<&'static [OptionSpec]> {
    match name {
        "general" => Some(GENERAL),
        "projects" => Some(PROJECTS),
        "es_collection" => Some(ES_COLLECTION),
        "es_enrichment" => Some(ES_ENRICHMENT),
        "sortinghat" => Some(SORTINGHAT),
        "panels" => Some(PANELS),
        "phases" => Some(PHASES),
        _ => None,
    }
}

/// True if the section name is reserved for the pipeline runtime.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_SECTIONS.contains(&name)
}

/// True if the section name declares study parameters
/// (`enrich_demography:git`, `enrich_onion:github`, ...).
pub fn is_study_section(name: &str) -> bool {
    let family = name.split(':').next().unwrap_or(name);
    STUDY_FAMILIES.contains(&family)
}

/// True if the section name declares a data source.
pub fn is_data_source(name: &str) -> bool {
    !is_reserved(name) && !is_study_section(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_sections_have_schemas() {
        for name in RESERVED_SECTIONS {
            assert!(section_schema(name).is_some(), "missing schema for {}", name);
        }
        assert!(section_schema("git").is_none());
    }

    #[test]
    fn classifies_section_names() {
        assert!(is_reserved("general"));
        assert!(!is_reserved("git"));

        assert!(is_study_section("enrich_demography:git"));
        assert!(is_study_section("enrich_onion:github"));
        assert!(is_study_section("enrich_areas_of_code"));
        assert!(!is_study_section("github:issues"));

        assert!(is_data_source("git"));
        assert!(is_data_source("github:issues"));
        assert!(is_data_source("gitlab:merge"));
        assert!(!is_data_source("phases"));
        assert!(!is_data_source("enrich_onion:git"));
    }

    #[test]
    fn data_source_schema_requires_indices() {
        let required: Vec<&str> = DATA_SOURCE
            .iter()
            .filter(|s| s.required)
            .map(|s| s.key)
            .collect();
        assert_eq!(required, vec!["raw_index", "enriched_index"]);
    }
}
