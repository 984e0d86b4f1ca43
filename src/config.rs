//! Test Configuration
//!
//! Parameters of a chi-square test of independence, with serde defaults so a
//! partial JSON document is a valid configuration.
use crate::constants::{DEFAULT_ALPHA, MIN_EXPECTED_COUNT};
use crate::errors::ContingencyError;
use crate::utils::{validate_alpha, validate_non_negative_parameter};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}
fn default_yates() -> bool {
    false
}
fn default_min_expected_count() -> f64 {
    MIN_EXPECTED_COUNT
}

/// Configuration for a `ChiSquareTest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    /// Significance level, strictly between 0 and 1.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Request the Yates continuity correction. Only honored for 2x2 tables.
    #[serde(default = "default_yates")]
    pub yates: bool,
    /// Expected counts below this value are reported as too small for the
    /// chi-square approximation.
    #[serde(default = "default_min_expected_count")]
    pub min_expected_count: f64,
}

impl Default for TestConfig {
    fn default() -> Self {
        TestConfig {
            alpha: default_alpha(),
            yates: default_yates(),
            min_expected_count: default_min_expected_count(),
        }
    }
}

impl TestConfig {
    /// Check every parameter is within its domain.
    pub fn validate(&self) -> Result<(), ContingencyError> {
        validate_alpha(self.alpha)?;
        validate_non_negative_parameter(self.min_expected_count, "min_expected_count")?;
        Ok(())
    }

    /// Set the significance level.
    /// * `alpha` - Value strictly between 0 and 1.
    pub fn set_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Request (or not) the Yates continuity correction.
    pub fn set_yates(mut self, yates: bool) -> Self {
        self.yates = yates;
        self
    }

    /// Set the rule-of-thumb threshold for expected counts.
    pub fn set_min_expected_count(mut self, min_expected_count: f64) -> Self {
        self.min_expected_count = min_expected_count;
        self
    }

    /// Dump the configuration as a json object
    pub fn json_dump(&self) -> Result<String, ContingencyError> {
        match serde_json::to_string(self) {
            Ok(s) => Ok(s),
            Err(e) => Err(ContingencyError::UnableToWrite(e.to_string())),
        }
    }

    /// Load a configuration from a json string, validating it.
    ///
    /// * `json_str` - String object, which can be serialized to json.
    pub fn from_json(json_str: &str) -> Result<Self, ContingencyError> {
        let cfg = match serde_json::from_str::<TestConfig>(json_str) {
            Ok(c) => Ok(c),
            Err(e) => Err(ContingencyError::UnableToRead(e.to_string())),
        }?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save the configuration as a json object to a file.
    ///
    /// * `path` - Path to save the configuration.
    pub fn save_config(&self, path: &str) -> Result<(), ContingencyError> {
        let cfg = self.json_dump()?;
        match fs::write(path, cfg) {
            Err(e) => Err(ContingencyError::UnableToWrite(e.to_string())),
            Ok(_) => Ok(()),
        }
    }

    /// Load a configuration from a path to a json object.
    ///
    /// * `path` - Path to load the configuration from.
    pub fn load_config(path: &str) -> Result<Self, ContingencyError> {
        let json_str = match fs::read_to_string(path) {
            Ok(s) => Ok(s),
            Err(e) => Err(ContingencyError::UnableToRead(e.to_string())),
        }?;
        Self::from_json(&json_str)
    }
}
