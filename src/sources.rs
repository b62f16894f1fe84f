//! Data-source sections.
//!
//! Every section that is neither reserved nor a study parameter section
//! declares a tracked data source. The section name is `backend` or
//! `backend:category` (`git`, `github:issues`, `gitlab:merge`); the fixed
//! keys are the raw and enriched index names and the ordered `studies`
//! list, and everything else is passed through to the backend collector
//! untouched (API tokens, rate-limit switches, archive toggles, ...).

use crate::parser::{RawSection, Value};
use crate::schema;
use serde::Serialize;
use std::collections::BTreeMap;

/// A tracked data source, as declared by its configuration section.
#[derive(Debug, Clone, Serialize)]
pub struct DataSource {
    /// Full section name, e.g. `github:issues`.
    pub name: String,
    /// Index receiving collected items, when set.
    pub raw_index: Option<String>,
    /// Index receiving enriched items, when set.
    pub enriched_index: Option<String>,
    /// Ordered study references, verbatim from the `studies` list.
    pub studies: Vec<String>,
    /// Backend-specific passthrough parameters.
    pub params: BTreeMap<String, Value>,
}

impl DataSource {
    /// Build from a raw data-source section.
    pub fn from_raw(section: &RawSection) -> Self {
        let mut params = BTreeMap::new();
        for option in &section.options {
            if schema::DATA_SOURCE.iter().any(|s| s.key == option.key) {
                continue;
            }
            params.insert(option.key.clone(), option.value.clone());
        }

        DataSource {
            name: section.name.clone(),
            raw_index: section
                .get("raw_index")
                .and_then(Value::as_str)
                .map(str::to_string),
            enriched_index: section
                .get("enriched_index")
                .and_then(Value::as_str)
                .map(str::to_string),
            studies: section
                .get("studies")
                .and_then(Value::as_list)
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
            params,
        }
    }

    /// The backend name: the section name up to the first `:`.
    pub fn backend(&self) -> &str {
        self.name.split(':').next().unwrap_or(&self.name)
    }

    /// The section name with `:` flattened to `_`, the form used for
    /// default index aliases (`github:issues` -> `github_issues`).
    pub fn flat_name(&self) -> String {
        self.name.replace(':', "_")
    }
}
