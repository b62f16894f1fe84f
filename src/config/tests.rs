//! Tests for config resolution and validation.

use crate::config::Config;
use crate::report::Severity;

/// A complete deployment file exercising every section kind.
const FIXTURE: &str = "\
# Deployment configuration.
#
# Lists: [val1, val2, ...]  Integers: 5 or \"5\"  Null: None/none
# Booleans: true/True/False/false  Strings: value or \"value\"

[general]
short_name = Grimoire
update = false
min_update_delay = 10
debug = true
logs_dir = logs
bulk_size = 100
scroll_size = 100

[projects]
projects_file = test-projects.json

[es_collection]
url = http://localhost:9200

[es_enrichment]
url = http://localhost:9200
autorefresh = false

[sortinghat]
host = mariadb
user = root
password =
database = test_sh
load_orgs = true
orgs_file = data/orgs.json
identities_file = [data/identities.json]
identities_api_token = xxxx
affiliate = true
matching = [email]
sleep_for = 120
bots_names = [Beloved Bot]
unaffiliated_group = Unknown

[panels]
kibiter_time_from = now-90d
kibiter_default_index = git
community = true
kafka = false

[phases]
collection = true
identities = true
enrichment = true
panels = false

[git]
raw_index = test_git-raw
enriched_index = test_git
studies = [enrich_demography:git, enrich_areas_of_code:git, enrich_onion:git]

[enrich_demography:git]

[enrich_areas_of_code:git]
in_index = test_git-raw
out_index = test_git-aoc

[enrich_onion:git]
in_index = test_git
out_index = test_git-onion

[github:issues]
raw_index = test_github-raw
enriched_index = test_github
api-token = xxxx
sleep-for-rate = true
no-archive = true
studies = [enrich_onion:github]

[enrich_onion:github]
in_index = test_github
out_index = test_github-onion

[gitlab:issue]
raw_index = test_gitlab-raw
enriched_index = test_gitlab
no-archive = true

[gitlab:merge]
raw_index = test_gitlab_mrs-raw
enriched_index = test_gitlab_mrs
no-archive = true
";

fn fixture() -> Config {
    Config::from_str(FIXTURE).unwrap()
}

#[test]
fn resolves_the_canonical_fixture() {
    let config = fixture();

    assert_eq!(config.general.short_name, "Grimoire");
    assert_eq!(config.general.bulk_size, 100);
    assert_eq!(config.general.scroll_size, 100);
    assert!(!config.general.update);
    assert_eq!(config.general.min_update_delay, 10);

    let sortinghat = config.sortinghat.as_ref().unwrap();
    assert_eq!(sortinghat.matching, vec!["email"]);
    assert_eq!(sortinghat.password, "");
    assert_eq!(sortinghat.bots_names, vec!["Beloved Bot"]);
    assert_eq!(sortinghat.sleep_for, 120);

    let git = config.source("git").unwrap();
    assert_eq!(
        git.studies,
        vec![
            "enrich_demography:git",
            "enrich_areas_of_code:git",
            "enrich_onion:git"
        ]
    );
}

#[test]
fn resolves_phases_and_endpoints() {
    let config = fixture();

    assert!(config.phases.collection);
    assert!(config.phases.identities);
    assert!(config.phases.enrichment);
    assert!(!config.phases.panels);
    assert_eq!(
        config.phases.active(),
        vec!["collection", "identities", "enrichment"]
    );

    assert_eq!(
        config.es_collection.url.as_deref(),
        Some("http://localhost:9200")
    );
    assert!(!config.es_enrichment.autorefresh);
}

#[test]
fn collects_sources_and_studies_in_order() {
    let config = fixture();

    assert_eq!(
        config.data_sources(),
        vec!["git", "github:issues", "gitlab:issue", "gitlab:merge"]
    );
    assert_eq!(config.backends(), vec!["git", "github", "gitlab"]);

    let study_names: Vec<&str> = config.studies.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        study_names,
        vec![
            "enrich_demography:git",
            "enrich_areas_of_code:git",
            "enrich_onion:git",
            "enrich_onion:github"
        ]
    );

    let onion = config.study_section("enrich_onion:git").unwrap();
    assert_eq!(onion.in_index(), Some("test_git"));
    assert_eq!(onion.out_index(), Some("test_git-onion"));
}

#[test]
fn canonical_fixture_validates_without_errors() {
    let config = fixture();
    let report = config.validate();

    assert!(
        !report.has_errors(),
        "unexpected errors: {}",
        report.render()
    );
}

#[test]
fn defaults_apply_when_options_are_absent() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[es_collection]\nurl = http://es:9200\n\
         [es_enrichment]\nurl = http://es:9200\n[phases]\ncollection = true\n",
    )
    .unwrap();

    assert_eq!(config.general.min_update_delay, 60);
    assert_eq!(config.general.bulk_size, 1000);
    assert_eq!(config.general.logs_dir, "logs");
    assert!(config.general.debug);
    assert_eq!(config.projects.projects_file, "projects.json");
    assert!(config.es_enrichment.autorefresh);
    assert!(config.sortinghat.is_none());
    assert!(config.panels.is_none());
}

#[test]
fn unset_placeholders_resolve_to_defaults_and_warn() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[es_collection]\nurl = ???\n\
         [phases]\ncollection = true\n",
    )
    .unwrap();

    assert_eq!(config.es_collection.url, None);
    assert!(config.es_collection.require_url().is_err());

    let report = config.validate();
    assert!(!report.has_errors(), "{}", report.render());
    assert!(report
        .findings
        .iter()
        .any(|f| f.severity == Severity::Warning && f.message.contains("???")));
    // Strict runs refuse provisional values.
    assert!(report.is_blocking(true));
    assert!(!report.is_blocking(false));
}

#[test]
fn missing_required_sections_are_errors() {
    let config = Config::from_str("[general]\nshort_name = Demo\n").unwrap();
    let report = config.validate();

    assert!(report.has_errors());
    let rendered = report.render();
    assert!(rendered.contains("missing required section `[projects]`"));
    assert!(rendered.contains("missing required section `[phases]`"));
    // No phases enabled, so the endpoint sections are not demanded.
    assert!(!rendered.contains("`[es_collection]`"));
}

#[test]
fn active_phases_demand_their_sections() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[phases]\ncollection = true\n\
         identities = true\nenrichment = true\npanels = true\n",
    )
    .unwrap();
    let rendered = config.validate().render();

    assert!(rendered.contains("missing required section `[es_collection]`"));
    assert!(rendered.contains("missing required section `[es_enrichment]`"));
    assert!(rendered.contains("no [sortinghat] section"));
    assert!(rendered.contains("no [panels] section"));
}

#[test]
fn missing_short_name_is_an_error() {
    let config = Config::from_str(
        "[general]\ndebug = true\n[projects]\n[phases]\n",
    )
    .unwrap();
    let rendered = config.validate().render();
    assert!(rendered.contains("short_name"));
}

#[test]
fn type_mismatches_are_errors() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\nbulk_size = many\n[projects]\n[phases]\ncollection = yes\n",
    )
    .unwrap();

    // Lenient resolution falls back to defaults...
    assert_eq!(config.general.bulk_size, 1000);
    assert!(!config.phases.collection);

    // ...and validation reports both mismatches.
    let rendered = config.validate().render();
    assert!(rendered.contains("bulk_size: expects an integer, found string"));
    assert!(rendered.contains("collection: expects a boolean (true, True, False, false)"));
}

#[test]
fn missing_indices_are_errors() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
         [git]\nenriched_index = git\n",
    )
    .unwrap();
    let rendered = config.validate().render();
    assert!(rendered.contains("[git] raw_index: required option `raw_index` is missing"));
}

#[test]
fn unknown_study_family_is_an_error() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
         [git]\nraw_index = git-raw\nenriched_index = git\nstudies = [enrich_sentiment:git]\n",
    )
    .unwrap();
    let rendered = config.validate().render();
    assert!(rendered.contains("`enrich_sentiment` is not a known study"));
}

#[test]
fn dangling_study_reference_is_a_warning() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
         [git]\nraw_index = git-raw\nenriched_index = git\nstudies = [enrich_onion:git]\n",
    )
    .unwrap();
    let report = config.validate();

    assert!(!report.has_errors(), "{}", report.render());
    assert!(report
        .render()
        .contains("no `[enrich_onion:git]` section; the study will run on defaults"));
}

#[test]
fn unreferenced_study_section_is_a_warning() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
         [git]\nraw_index = git-raw\nenriched_index = git\n\
         [enrich_onion:git]\nin_index = git\nout_index = git-onion\n",
    )
    .unwrap();
    let rendered = config.validate().render();
    assert!(rendered.contains("[enrich_onion:git]: not referenced from any `studies` list"));
}

#[test]
fn mismatched_study_source_is_a_warning() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
         [github:issues]\nraw_index = gh-raw\nenriched_index = gh\n\
         studies = [enrich_onion:gitlab]\n\
         [enrich_onion:gitlab]\nin_index = gl\nout_index = gl-onion\n",
    )
    .unwrap();
    let rendered = config.validate().render();
    assert!(rendered.contains("neither this section nor its backend"));
}

#[test]
fn backend_suffix_matches_without_warning() {
    // `enrich_onion:github` under `[github:issues]` is the conventional
    // shorthand: the suffix names the backend.
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
         [github:issues]\nraw_index = gh-raw\nenriched_index = gh\n\
         studies = [enrich_onion:github]\n\
         [enrich_onion:github]\nin_index = gh\nout_index = gh-onion\n",
    )
    .unwrap();
    let rendered = config.validate().render();
    assert!(!rendered.contains("neither this section nor its backend"));
}

#[test]
fn duplicate_study_entries_are_warnings() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
         [git]\nraw_index = git-raw\nenriched_index = git\n\
         studies = [enrich_demography:git, enrich_demography:git]\n\
         [enrich_demography:git]\n",
    )
    .unwrap();
    let rendered = config.validate().render();
    assert!(rendered.contains("listed more than once"));
}

#[test]
fn implausible_index_names_are_warnings() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
         [git]\nraw_index = \"Git Raw\"\nenriched_index = git\n",
    )
    .unwrap();
    let rendered = config.validate().render();
    assert!(rendered.contains("not a plausible search index name"));
}

#[test]
fn unknown_reserved_options_are_warnings() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\nbulksize = 100\n[projects]\n[phases]\n",
    )
    .unwrap();
    let rendered = config.validate().render();
    assert!(rendered.contains("[general] bulksize: unknown option"));
}

#[test]
fn passthrough_source_params_are_not_warnings() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
         [github:issues]\nraw_index = gh-raw\nenriched_index = gh\napi-token = xxxx\n",
    )
    .unwrap();
    let rendered = config.validate().render();
    assert!(!rendered.contains("api-token"));
}

#[test]
fn malformed_study_section_names_are_errors() {
    let config = Config::from_str(
        "[general]\nshort_name = Demo\n[projects]\n[phases]\n\
         [git]\nraw_index = git-raw\nenriched_index = git\n\
         [enrich_onion]\nin_index = git\n",
    )
    .unwrap();
    let rendered = config.validate().render();
    assert!(rendered.contains("must be named `family:source`"));
}

#[test]
fn load_reads_from_disk() {
    use std::io::Write;

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("deploy.cfg");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}", FIXTURE).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.general.short_name, "Grimoire");
}

#[test]
fn load_reports_missing_files() {
    let err = Config::load("/no/such/deploy.cfg").unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn raw_round_trip_preserves_structure() {
    let config = fixture();
    let rendered = config.raw().render();
    let reparsed = Config::from_str(&rendered).unwrap();

    assert_eq!(config.raw(), reparsed.raw());
    assert_eq!(config.general.short_name, reparsed.general.short_name);
    assert_eq!(config.data_sources(), reparsed.data_sources());
}
