//! Index alias plans for the dashboard layer.
//!
//! Dashboards address indices through read aliases rather than raw index
//! names. The default rule derives both aliases from the section name with
//! `:` flattened to `_` (`gitlab:merge` -> `gitlab_merge-raw` /
//! `gitlab_merge`). A fixed exception table overrides the rule for
//! sections whose panels expect richer alias sets.

use crate::config::Config;
use crate::sources::DataSource;
use serde::Serialize;

/// One alias to create on one index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEntry {
    pub index: String,
    pub alias: String,
}

/// The aliases one data source needs, split by storage side.
#[derive(Debug, Clone, Serialize)]
pub struct AliasPlan {
    /// Data-source section name.
    pub source: String,
    /// Aliases on the raw (collection) side.
    pub raw: Vec<AliasEntry>,
    /// Aliases on the enriched side.
    pub enriched: Vec<AliasEntry>,
}

/// Aliases that do not follow the `name-raw` / `name` rule, keyed by the
/// full section name.
const ALIAS_EXCEPTIONS: &[(&str, &[&str], &[&str])] = &[
    (
        "git",
        &["git-raw"],
        &["git", "git_author", "git_enrich"],
    ),
    (
        "github",
        &["github-raw"],
        &[
            "github_issues",
            "github_issues_enrich",
            "issues_closed",
            "issues_created",
            "issues_updated",
        ],
    ),
];

fn exception_for(section_name: &str) -> Option<(&'static [&'static str], &'static [&'static str])> {
    ALIAS_EXCEPTIONS
        .iter()
        .find(|(name, _, _)| *name == section_name)
        .map(|(_, raw, enriched)| (*raw, *enriched))
}

/// Compute the alias plan for one data source.
///
/// Sources with a missing index contribute no entries for that side; the
/// validation report covers the missing index itself.
pub fn alias_plan(source: &DataSource) -> AliasPlan {
    let exception = exception_for(&source.name);
    let flat = source.flat_name();

    let raw = match &source.raw_index {
        Some(index) => {
            let aliases: Vec<String> = match exception {
                Some((raw_aliases, _)) => raw_aliases.iter().map(|a| a.to_string()).collect(),
                None => vec![format!("{}-raw", flat)],
            };
            aliases
                .into_iter()
                .map(|alias| AliasEntry {
                    index: index.clone(),
                    alias,
                })
                .collect()
        }
        None => Vec::new(),
    };

    let enriched = match &source.enriched_index {
        Some(index) => {
            let aliases: Vec<String> = match exception {
                Some((_, enriched_aliases)) => {
                    enriched_aliases.iter().map(|a| a.to_string()).collect()
                }
                None => vec![flat.clone()],
            };
            aliases
                .into_iter()
                .map(|alias| AliasEntry {
                    index: index.clone(),
                    alias,
                })
                .collect()
        }
        None => Vec::new(),
    };

    AliasPlan {
        source: source.name.clone(),
        raw,
        enriched,
    }
}

/// Alias plans for every declared data source, in declaration order.
pub fn alias_plans(config: &Config) -> Vec<AliasPlan> {
    config.sources.iter().map(alias_plan).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn config() -> Config {
        Config::from_str(
            "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
             [git]\nraw_index = git_demo-raw\nenriched_index = git_demo\n\
             [github:issues]\nraw_index = gh-raw\nenriched_index = gh\n\
             [gitlab:merge]\nraw_index = gl_mrs-raw\nenriched_index = gl_mrs\n",
        )
        .unwrap()
    }

    #[test]
    fn git_uses_the_exception_table() {
        let config = config();
        let plan = alias_plan(config.source("git").unwrap());

        assert_eq!(
            plan.raw,
            vec![AliasEntry {
                index: "git_demo-raw".to_string(),
                alias: "git-raw".to_string()
            }]
        );
        let enriched: Vec<&str> = plan.enriched.iter().map(|e| e.alias.as_str()).collect();
        assert_eq!(enriched, vec!["git", "git_author", "git_enrich"]);
        assert!(plan.enriched.iter().all(|e| e.index == "git_demo"));
    }

    #[test]
    fn categorized_sections_use_the_default_rule() {
        let config = config();

        // The exception table is keyed by the full section name, so
        // `github:issues` (unlike a plain `github` section) follows the
        // default rule.
        let plan = alias_plan(config.source("github:issues").unwrap());
        assert_eq!(plan.raw[0].alias, "github_issues-raw");
        assert_eq!(plan.enriched[0].alias, "github_issues");

        let plan = alias_plan(config.source("gitlab:merge").unwrap());
        assert_eq!(plan.raw[0].alias, "gitlab_merge-raw");
        assert_eq!(plan.enriched[0].alias, "gitlab_merge");
    }

    #[test]
    fn plain_github_section_uses_the_exception_table() {
        let config = Config::from_str(
            "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
             [github]\nraw_index = gh-raw-idx\nenriched_index = gh-idx\n",
        )
        .unwrap();
        let plan = alias_plan(config.source("github").unwrap());

        let enriched: Vec<&str> = plan.enriched.iter().map(|e| e.alias.as_str()).collect();
        assert_eq!(
            enriched,
            vec![
                "github_issues",
                "github_issues_enrich",
                "issues_closed",
                "issues_created",
                "issues_updated"
            ]
        );
    }

    #[test]
    fn missing_indices_contribute_no_entries() {
        let config = Config::from_str(
            "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
             [gitlab:issue]\nenriched_index = gl\n",
        )
        .unwrap();
        let plan = alias_plan(config.source("gitlab:issue").unwrap());

        assert!(plan.raw.is_empty());
        assert_eq!(plan.enriched[0].alias, "gitlab_issue");
    }

    #[test]
    fn plans_follow_declaration_order() {
        let plans = alias_plans(&config());
        let sources: Vec<&str> = plans.iter().map(|p| p.source.as_str()).collect();
        assert_eq!(sources, vec!["git", "github:issues", "gitlab:merge"]);
    }
}
