//! Typed configuration model for pipeline deployments.
//!
//! This module resolves a parsed configuration file into the `Config`
//! struct: reserved sections become typed structs with defaults, the
//! remaining sections become data sources and study parameter sections.
//! Resolution is lenient; `Config::validate` reports everything wrong or
//! provisional.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use types::{
    EsCollection, EsEnrichment, General, PanelsConfig, Phases, Projects, SortingHat,
};
