//! Config loading, resolution, and validation.

use super::model::Config;
use super::types::*;
use crate::error::{MordantError, Result};
use crate::parser::{self, RawConfig, RawSection, Value};
use crate::report::{Finding, ValidationReport};
use crate::schema::{self, ExpectedType, OptionSpec};
use crate::sources::DataSource;
use crate::studies::{StudyRef, StudySection};
use regex::Regex;
use std::path::Path;

/// Index names the dashboards can actually address: lowercase, starting
/// with an alphanumeric, then alphanumerics plus `_`, `.`, `-`.
const INDEX_NAME_PATTERN: &str = r"^[a-z0-9][a-z0-9_.-]*$";

impl Config {
    /// Load a configuration from a file.
    ///
    /// # Errors
    ///
    /// * `MordantError::UserError` - the file cannot be read
    /// * `MordantError::ParseError` - a line violates the grammar
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            MordantError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_str(&content)
    }

    /// Parse a configuration from text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self> {
        Ok(Self::from_raw(parser::parse(input)?))
    }

    /// Resolve a raw parse into the typed model.
    ///
    /// Resolution never fails: wrong-typed or `???` values fall back to
    /// their defaults. `validate` reports every such fallback.
    pub fn from_raw(raw: RawConfig) -> Self {
        let general = raw.section("general");
        let projects = raw.section("projects");
        let es_collection = raw.section("es_collection");
        let es_enrichment = raw.section("es_enrichment");
        let phases = raw.section("phases");

        let sources: Vec<DataSource> = raw
            .sections
            .iter()
            .filter(|s| schema::is_data_source(&s.name))
            .map(DataSource::from_raw)
            .collect();

        let studies: Vec<StudySection> = raw
            .sections
            .iter()
            .filter(|s| schema::is_study_section(&s.name))
            .filter_map(StudySection::from_raw)
            .collect();

        Config {
            general: General {
                short_name: str_or(general, "short_name", String::new()),
                update: bool_or(general, "update", false),
                min_update_delay: int_or(general, "min_update_delay", default_min_update_delay()),
                debug: bool_or(general, "debug", true),
                logs_dir: str_or(general, "logs_dir", default_logs_dir()),
                bulk_size: int_or(general, "bulk_size", default_bulk_size()),
                scroll_size: int_or(general, "scroll_size", default_scroll_size()),
            },
            projects: Projects {
                projects_file: str_or(projects, "projects_file", default_projects_file()),
            },
            es_collection: EsCollection {
                url: str_opt(es_collection, "url"),
            },
            es_enrichment: EsEnrichment {
                url: str_opt(es_enrichment, "url"),
                autorefresh: bool_or(es_enrichment, "autorefresh", true),
            },
            sortinghat: raw.section("sortinghat").map(resolve_sortinghat),
            panels: raw.section("panels").map(resolve_panels),
            phases: Phases {
                collection: bool_or(phases, "collection", false),
                identities: bool_or(phases, "identities", false),
                enrichment: bool_or(phases, "enrichment", false),
                panels: bool_or(phases, "panels", false),
            },
            sources,
            studies,
            raw,
        }
    }

    /// Validate the configuration and collect findings.
    ///
    /// Errors make the configuration unusable for a run; warnings flag
    /// provisional values and latent inconsistencies. The CLI maps errors
    /// (and, under `--strict`, warnings) to a failing exit code.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        self.check_reserved_sections(&mut report);
        self.check_phase_prerequisites(&mut report);
        self.check_data_sources(&mut report);
        self.check_study_sections(&mut report);

        report
    }

    fn check_reserved_sections(&self, report: &mut ValidationReport) {
        // Sections every deployment must carry, plus the ones required by
        // the active phases.
        let mut required = vec!["general", "projects", "phases"];
        if self.phases.collection {
            required.push("es_collection");
        }
        if self.phases.enrichment || self.phases.panels {
            required.push("es_enrichment");
        }

        for name in required {
            if self.raw.section(name).is_none() {
                report.push(
                    Finding::error(format!("missing required section `[{}]`", name))
                        .in_section(name),
                );
            }
        }

        for name in schema::RESERVED_SECTIONS {
            if let Some(section) = self.raw.section(name) {
                if let Some(specs) = schema::section_schema(name) {
                    check_section_schema(section, specs, true, report);
                }
            }
        }

        if self.raw.section("general").is_some() && self.general.short_name.is_empty() {
            report.push(
                Finding::error("short_name must be set to the project's display name")
                    .in_section("general")
                    .for_option("short_name"),
            );
        }
    }

    fn check_phase_prerequisites(&self, report: &mut ValidationReport) {
        if self.phases.identities && self.sortinghat.is_none() {
            report.push(
                Finding::error(
                    "the identities phase is enabled but there is no [sortinghat] section",
                )
                .in_section("phases")
                .for_option("identities"),
            );
        }
        if self.phases.panels && self.panels.is_none() {
            report.push(
                Finding::error("the panels phase is enabled but there is no [panels] section")
                    .in_section("phases")
                    .for_option("panels"),
            );
        }
        if self.phases.is_empty() && self.raw.section("phases").is_some() {
            report.push(Finding::warning("no phase is enabled; a run would do nothing").in_section("phases"));
        }
    }

    fn check_data_sources(&self, report: &mut ValidationReport) {
        let index_name = Regex::new(INDEX_NAME_PATTERN).ok();

        let source_sections: Vec<&RawSection> = self
            .raw
            .sections
            .iter()
            .filter(|s| schema::is_data_source(&s.name))
            .collect();

        if source_sections.is_empty() {
            report.push(Finding::warning("no data sources declared"));
        }

        for section in &source_sections {
            if section.name.starts_with("enrich_") {
                report.push(
                    Finding::warning(
                        "section resembles a study parameter section, but its family is \
                         not a known study",
                    )
                    .in_section(section.name.as_str()),
                );
            }

            check_section_schema(section, schema::DATA_SOURCE, false, report);

            for key in ["raw_index", "enriched_index"] {
                if let Some(index) = section.get(key).and_then(Value::as_str) {
                    if let Some(re) = &index_name {
                        if !re.is_match(index) {
                            report.push(
                                Finding::warning(format!(
                                    "`{}` is not a plausible search index name \
                                     (lowercase alphanumerics, `_`, `.`, `-`)",
                                    index
                                ))
                                .in_section(section.name.as_str())
                                .for_option(key),
                            );
                        }
                    }
                }
            }

            self.check_studies_list(section, report);
        }
    }

    fn check_studies_list(&self, section: &RawSection, report: &mut ValidationReport) {
        let Some(entries) = section.get("studies").and_then(Value::as_list) else {
            return;
        };

        let mut seen: Vec<&str> = Vec::new();
        for entry in entries {
            if seen.contains(&entry.as_str()) {
                report.push(
                    Finding::warning(format!("study `{}` is listed more than once", entry))
                        .in_section(section.name.as_str())
                        .for_option("studies"),
                );
                continue;
            }
            seen.push(entry.as_str());

            let study = match StudyRef::parse(entry) {
                Ok(study) => study,
                Err(message) => {
                    report.push(
                        Finding::error(message)
                            .in_section(section.name.as_str())
                            .for_option("studies"),
                    );
                    continue;
                }
            };

            if study.known_family().is_none() {
                report.push(
                    Finding::error(format!(
                        "`{}` is not a known study (expected one of: {})",
                        study.family,
                        schema::STUDY_FAMILIES.join(", ")
                    ))
                    .in_section(section.name.as_str())
                    .for_option("studies"),
                );
                continue;
            }

            if !study.matches_source(&section.name) {
                report.push(
                    Finding::warning(format!(
                        "study `{}` names source `{}`, which is neither this section \
                         nor its backend",
                        entry,
                        study.source.as_deref().unwrap_or_default()
                    ))
                    .in_section(section.name.as_str())
                    .for_option("studies"),
                );
            }

            let params_name = match &study.source {
                Some(source) => format!("{}:{}", study.family, source),
                None => format!("{}:{}", study.family, section.name),
            };
            if self.study_section(&params_name).is_none() {
                report.push(
                    Finding::warning(format!(
                        "no `[{}]` section; the study will run on defaults",
                        params_name
                    ))
                    .in_section(section.name.as_str())
                    .for_option("studies"),
                );
            }
        }
    }

    fn check_study_sections(&self, report: &mut ValidationReport) {
        // A study-family section that failed to resolve has a malformed name.
        for section in &self.raw.sections {
            if schema::is_study_section(&section.name) && self.study_section(&section.name).is_none()
            {
                report.push(
                    Finding::error(
                        "study parameter sections must be named `family:source` \
                         (e.g. `enrich_onion:git`)",
                    )
                    .in_section(section.name.as_str()),
                );
            }
        }

        // Parameter sections nothing points at are dead weight.
        for study in &self.studies {
            let referenced = self.sources.iter().any(|source| {
                source.studies.iter().any(|entry| {
                    entry == &study.name
                        || StudyRef::parse(entry).is_ok_and(|r| {
                            r.source.is_none()
                                && r.family == study.family.as_str()
                                && study.source == source.name
                        })
                })
            });
            if !referenced {
                report.push(
                    Finding::warning("not referenced from any `studies` list")
                        .in_section(study.name.as_str()),
                );
            }
        }
    }
}

/// Check one section against its option schema.
///
/// `warn_unknown` is set for reserved sections, where an unrecognized key
/// is almost always a typo; data sources carry arbitrary passthrough
/// parameters, so unknown keys are fine there.
fn check_section_schema(
    section: &RawSection,
    specs: &[OptionSpec],
    warn_unknown: bool,
    report: &mut ValidationReport,
) {
    for spec in specs {
        match section.get(spec.key) {
            None => {
                if spec.required {
                    report.push(
                        Finding::error(format!("required option `{}` is missing", spec.key))
                            .in_section(section.name.as_str())
                            .for_option(spec.key),
                    );
                }
            }
            Some(Value::Unset) => {
                report.push(
                    Finding::warning(
                        "still set to the `???` placeholder. Fix: set a real value \
                         before the first run.",
                    )
                    .in_section(section.name.as_str())
                    .for_option(spec.key),
                );
            }
            Some(value) => {
                if !type_matches(spec.expected, value) {
                    report.push(
                        Finding::error(format!(
                            "expects {}, found {} (`{}`)",
                            spec.expected.describe(),
                            value.type_name(),
                            value.render()
                        ))
                        .in_section(section.name.as_str())
                        .for_option(spec.key),
                    );
                }
            }
        }
    }

    if warn_unknown {
        for option in &section.options {
            if !specs.iter().any(|s| s.key == option.key) {
                report.push(
                    Finding::warning("unknown option; is it misspelled?")
                        .in_section(section.name.as_str())
                        .for_option(option.key.as_str()),
                );
            }
        }
    }
}

fn type_matches(expected: ExpectedType, value: &Value) -> bool {
    match expected {
        ExpectedType::Str => matches!(value, Value::Str(_) | Value::Null),
        ExpectedType::Int => matches!(value, Value::Int(_)),
        ExpectedType::Bool => matches!(value, Value::Bool(_)),
        ExpectedType::List => matches!(value, Value::List(_)),
        ExpectedType::Any => true,
    }
}

fn resolve_sortinghat(section: &RawSection) -> SortingHat {
    let section = Some(section);
    SortingHat {
        host: str_or(section, "host", String::new()),
        user: str_or(section, "user", String::new()),
        password: str_or(section, "password", String::new()),
        database: str_or(section, "database", String::new()),
        load_orgs: bool_or(section, "load_orgs", false),
        orgs_file: str_opt(section, "orgs_file"),
        identities_file: list_or(section, "identities_file"),
        identities_api_token: str_opt(section, "identities_api_token"),
        affiliate: bool_or(section, "affiliate", true),
        matching: list_or(section, "matching"),
        sleep_for: int_or(section, "sleep_for", default_sleep_for()),
        bots_names: list_or(section, "bots_names"),
        no_bots_names: list_or(section, "no_bots_names"),
        autoprofile: list_or(section, "autoprofile"),
        unaffiliated_group: str_or(section, "unaffiliated_group", default_unaffiliated_group()),
    }
}

fn resolve_panels(section: &RawSection) -> PanelsConfig {
    let section = Some(section);
    PanelsConfig {
        kibiter_time_from: str_or(section, "kibiter_time_from", default_kibiter_time_from()),
        kibiter_default_index: str_or(
            section,
            "kibiter_default_index",
            default_kibiter_default_index(),
        ),
        kibiter_url: str_opt(section, "kibiter_url"),
        kibiter_version: str_opt(section, "kibiter_version"),
        community: bool_or(section, "community", false),
        kafka: bool_or(section, "kafka", false),
    }
}

// Lenient coercion helpers. Wrong types and `???` read as "not set";
// validation reports them separately.

fn str_opt(section: Option<&RawSection>, key: &str) -> Option<String> {
    section?
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn str_or(section: Option<&RawSection>, key: &str, default: String) -> String {
    str_opt(section, key).unwrap_or(default)
}

fn int_or(section: Option<&RawSection>, key: &str, default: i64) -> i64 {
    section
        .and_then(|s| s.get(key))
        .and_then(Value::as_int)
        .unwrap_or(default)
}

fn bool_or(section: Option<&RawSection>, key: &str, default: bool) -> bool {
    section
        .and_then(|s| s.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(default)
}

fn list_or(section: Option<&RawSection>, key: &str) -> Vec<String> {
    section
        .and_then(|s| s.get(key))
        .and_then(Value::as_list)
        .map(<[String]>::to_vec)
        .unwrap_or_default()
}
