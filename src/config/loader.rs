//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a projection
//! scenario from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::RoadmapRow;

use super::types::{AssumptionSet, ProjectionConfig, RoadmapConfig, ScenarioMetadata};

/// Loads and provides access to a projection scenario.
///
/// # Directory Structure
///
/// ```text
/// config/baseline/
/// ├── scenario.yaml     # Scenario name and description
/// ├── assumptions.yaml  # Business drivers (partial files overlay defaults)
/// └── roadmap.yaml      # Planned fixed-salary hires
/// ```
///
/// # Example
///
/// ```no_run
/// use aba_proforma::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/baseline").unwrap();
/// println!("Scenario: {}", loader.scenario().name);
/// println!("Planned hires: {}", loader.roadmap().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ProjectionConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the scenario directory (e.g., "./config/baseline")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ScenarioMetadata>(&path.join("scenario.yaml"))?;
        let assumptions = Self::load_yaml::<AssumptionSet>(&path.join("assumptions.yaml"))?;
        let roadmap = Self::load_yaml::<RoadmapConfig>(&path.join("roadmap.yaml"))?;

        info!(
            scenario = %metadata.name,
            hires = roadmap.hires.len(),
            clinic_division = assumptions.features.clinic_division,
            itemized_overhead = assumptions.features.itemized_overhead,
            "Loaded projection scenario"
        );

        Ok(Self {
            config: ProjectionConfig::new(metadata, assumptions, roadmap.hires),
        })
    }

    /// Builds a loader from in-memory parts, bypassing the filesystem.
    pub fn from_parts(
        metadata: ScenarioMetadata,
        assumptions: AssumptionSet,
        roadmap: Vec<RoadmapRow>,
    ) -> Self {
        Self {
            config: ProjectionConfig::new(metadata, assumptions, roadmap),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();
        debug!(path = %path_str, "Reading configuration file");

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying scenario configuration.
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Returns the scenario metadata.
    pub fn scenario(&self) -> &ScenarioMetadata {
        self.config.scenario()
    }

    /// Returns the baseline assumption set.
    pub fn assumptions(&self) -> &AssumptionSet {
        self.config.assumptions()
    }

    /// Returns the baseline hiring roadmap rows.
    pub fn roadmap(&self) -> &[RoadmapRow] {
        self.config.roadmap()
    }
}
