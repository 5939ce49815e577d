use crate::error::Result;
use crate::params::{GenerationParameters, DEFAULT_MAX_CAPACITY, DEFAULT_TARGET_TOTAL};
use crate::reconcile::ReconcileSettings;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Generator defaults read from a JSON file.
///
/// Every field is optional; anything missing falls back to the default
/// scenario. Command line flags override both.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_capacity: Option<f64>,
    pub target_total: Option<f64>,
    pub locations: Option<Vec<String>>,
    pub seed: Option<u64>,
    pub reconcile: ReconcileSettings,
}

impl GeneratorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Parameters from this config, unvalidated.
    pub fn parameters(&self) -> GenerationParameters {
        let defaults = GenerationParameters::default_scenario();
        GenerationParameters {
            start_date: self.start_date.unwrap_or(defaults.start_date),
            end_date: self.end_date.unwrap_or(defaults.end_date),
            max_capacity: self.max_capacity.unwrap_or(DEFAULT_MAX_CAPACITY),
            target_total: self.target_total.unwrap_or(DEFAULT_TARGET_TOTAL),
            locations: self.locations.clone().unwrap_or(defaults.locations),
        }
    }
}
