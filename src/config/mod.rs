//! Configuration loading and management for the projection engine.
//!
//! This module provides the assumption set that drives a projection and
//! the loader that reads a scenario directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use aba_proforma::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/baseline").unwrap();
//! println!("Loaded scenario: {}", config.scenario().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AssumptionSet, BillingRates, CaseloadParams, ClinicParams, FeatureFlags, FlatOverhead,
    ItemizedOverhead, PayRates, ProfitShareParams, ProjectionConfig, RoadmapConfig,
    ScenarioMetadata,
};
