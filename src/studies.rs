//! Study references and study parameter sections.
//!
//! Data sources opt into post-enrichment studies through an ordered
//! `studies` list (`studies = [enrich_demography:git, enrich_onion:git]`).
//! Each entry is a *reference*: a study family plus the source it runs
//! over. A section named after the reference
//! (`[enrich_areas_of_code:git]`) supplies that study's parameters; when
//! absent, the study runs on defaults.

use crate::parser::{RawSection, Value};
use serde::Serialize;
use std::collections::BTreeMap;

/// The study families the enrichment stage knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyFamily {
    /// Author activity spans: first/last contribution per identity.
    Demography,
    /// Touched-directory aggregation over commit data.
    AreasOfCode,
    /// Onion model: core / regular / casual contributor rings.
    Onion,
}

impl StudyFamily {
    /// Parse a family from its section-name form.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "enrich_demography" => Some(StudyFamily::Demography),
            "enrich_areas_of_code" => Some(StudyFamily::AreasOfCode),
            "enrich_onion" => Some(StudyFamily::Onion),
            _ => None,
        }
    }

    /// The section-name form of the family.
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyFamily::Demography => "enrich_demography",
            StudyFamily::AreasOfCode => "enrich_areas_of_code",
            StudyFamily::Onion => "enrich_onion",
        }
    }
}

impl std::fmt::Display for StudyFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed `studies` list entry: `family` or `family:source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyRef {
    pub family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl StudyRef {
    /// Parse a reference from its list-entry text.
    ///
    /// The `:source` suffix is optional; empty family or source text is
    /// rejected with a plain message (the caller knows the location).
    pub fn parse(entry: &str) -> Result<Self, String> {
        let entry = entry.trim();
        match entry.split_once(':') {
            Some((family, source)) => {
                if family.is_empty() || source.is_empty() {
                    return Err(format!("malformed study reference `{}`", entry));
                }
                Ok(StudyRef {
                    family: family.to_string(),
                    source: Some(source.to_string()),
                })
            }
            None => {
                if entry.is_empty() {
                    return Err("empty study reference".to_string());
                }
                Ok(StudyRef {
                    family: entry.to_string(),
                    source: None,
                })
            }
        }
    }

    /// The family as a known variant, if it is one.
    pub fn known_family(&self) -> Option<StudyFamily> {
        StudyFamily::from_name(&self.family)
    }

    /// True if the reference's source suffix is consistent with the data
    /// source declaring it: it must equal the section's full name or its
    /// backend (the text before `:`). A missing suffix always matches.
    pub fn matches_source(&self, section_name: &str) -> bool {
        let Some(source) = &self.source else {
            return true;
        };
        let backend = section_name.split(':').next().unwrap_or(section_name);
        source == section_name || source == backend
    }
}

impl std::fmt::Display for StudyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}:{}", self.family, source),
            None => write!(f, "{}", self.family),
        }
    }
}

/// Parameters declared by a `[family:source]` section.
#[derive(Debug, Clone, Serialize)]
pub struct StudySection {
    /// Full section name, e.g. `enrich_onion:git`.
    pub name: String,
    pub family: StudyFamily,
    /// The source suffix, e.g. `git`.
    pub source: String,
    /// Family-specific parameters, preserved as typed values.
    pub params: BTreeMap<String, Value>,
}

impl StudySection {
    /// Build from a raw section whose name has a known family prefix.
    ///
    /// Returns `None` when the name has no `:source` suffix or the family
    /// is unknown; validation reports those separately.
    pub fn from_raw(section: &RawSection) -> Option<Self> {
        let (family_name, source) = section.name.split_once(':')?;
        let family = StudyFamily::from_name(family_name)?;
        if source.is_empty() {
            return None;
        }

        let params = section
            .options
            .iter()
            .map(|o| (o.key.clone(), o.value.clone()))
            .collect();

        Some(StudySection {
            name: section.name.clone(),
            family,
            source: source.to_string(),
            params,
        })
    }

    /// The index the study reads from, when configured.
    pub fn in_index(&self) -> Option<&str> {
        self.params.get("in_index").and_then(Value::as_str)
    }

    /// The index the study writes to, when configured.
    pub fn out_index(&self) -> Option<&str> {
        self.params.get("out_index").and_then(Value::as_str)
    }
}
