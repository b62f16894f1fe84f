//! The project registry file.
//!
//! `projects.projects_file` names a JSON file mapping project names to the
//! repositories and endpoints each data source collects for that project:
//!
//! ```json
//! {
//!   "platform": {
//!     "meta": { "title": "Platform" },
//!     "git": ["https://example.org/platform.git"],
//!     "github": ["https://github.com/example/platform"]
//!   }
//! }
//! ```
//!
//! Keys other than `meta` name a data-source backend; their values are the
//! seed lists handed to that backend's collector.

use crate::error::{MordantError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One project's entry in the registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// Free-form project metadata (title, grouping, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, serde_json::Value>,

    /// Seed lists keyed by data-source backend.
    #[serde(flatten)]
    pub seeds: BTreeMap<String, Vec<String>>,
}

impl ProjectEntry {
    /// Total number of seeds across all backends.
    pub fn seed_count(&self) -> usize {
        self.seeds.values().map(Vec::len).sum()
    }
}

/// The whole registry: project name to entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectRegistry {
    #[serde(flatten)]
    pub projects: BTreeMap<String, ProjectEntry>,
}

impl ProjectRegistry {
    /// Load the registry from a JSON file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    /// Returns `Err` if the file exists but cannot be parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            MordantError::UserError(format!(
                "failed to read projects file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let registry = Self::from_json(&content)?;
        Ok(Some(registry))
    }

    /// Parse the registry from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| MordantError::UserError(format!("failed to parse projects file: {}", e)))
    }

    /// Backends referenced by at least one project.
    pub fn backends(&self) -> Vec<&str> {
        let mut backends: Vec<&str> = Vec::new();
        for entry in self.projects.values() {
            for backend in entry.seeds.keys() {
                if !backends.contains(&backend.as_str()) {
                    backends.push(backend);
                }
            }
        }
        backends.sort_unstable();
        backends
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY_JSON: &str = r#"{
        "platform": {
            "meta": {"title": "Platform"},
            "git": ["https://example.org/platform.git"],
            "github": ["https://github.com/example/platform"]
        },
        "website": {
            "git": ["https://example.org/www.git"]
        }
    }"#;

    #[test]
    fn parses_projects_with_meta_and_seeds() {
        let registry = ProjectRegistry::from_json(REGISTRY_JSON).unwrap();

        assert_eq!(registry.projects.len(), 2);
        let platform = &registry.projects["platform"];
        assert_eq!(platform.meta["title"], "Platform");
        assert_eq!(
            platform.seeds["git"],
            vec!["https://example.org/platform.git"]
        );
        assert_eq!(platform.seed_count(), 2);

        let website = &registry.projects["website"];
        assert!(website.meta.is_empty());
        assert_eq!(website.seed_count(), 1);
    }

    #[test]
    fn backends_are_deduplicated() {
        let registry = ProjectRegistry::from_json(REGISTRY_JSON).unwrap();
        assert_eq!(registry.backends(), vec!["git", "github"]);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(ProjectRegistry::from_json("{not json").is_err());
    }

    #[test]
    fn load_returns_none_for_missing_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = ProjectRegistry::load(dir.path().join("projects.json")).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn load_reads_existing_files() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("projects.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", REGISTRY_JSON).unwrap();

        let registry = ProjectRegistry::load(&path).unwrap().unwrap();
        assert_eq!(registry.projects.len(), 2);
    }
}
