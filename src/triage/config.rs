//! Configuration for the triage module.
//!
//! Every knob has a default that reproduces the reference scanner exactly;
//! hosts may override them from JSON.

use crate::entropy::DEFAULT_WINDOW_SIZE;
use crate::error::{EntroscanError, Result};
#[cfg(feature = "python-ext")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Master configuration for the triage pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "python-ext", pyclass)]
pub struct TriageConfig {
    /// I/O configuration for file reading.
    pub io: IOConfig,
    /// Entropy profile configuration.
    pub entropy: EntropyConfig,
    /// Heuristic classifier thresholds.
    pub heuristics: HeuristicThresholds,
}

impl TriageConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Rejects caller contract violations before any scan runs.
    pub fn validate(&self) -> Result<()> {
        self.io.validate()?;
        self.entropy.validate()?;
        self.heuristics.validate()
    }
}

#[cfg(feature = "python-ext")]
#[pymethods]
impl TriageConfig {
    #[new]
    pub fn new() -> Self {
        Self::default()
    }

    #[getter]
    pub fn get_window_size(&self) -> usize {
        self.entropy.window_size
    }

    #[setter]
    pub fn set_window_size(&mut self, window_size: usize) {
        self.entropy.window_size = window_size;
    }

    #[getter]
    pub fn get_max_file_size(&self) -> u64 {
        self.io.max_file_size
    }

    #[setter]
    pub fn set_max_file_size(&mut self, max_file_size: u64) {
        self.io.max_file_size = max_file_size;
    }

    #[staticmethod]
    #[pyo3(name = "from_json")]
    pub fn from_json_py(json: &str) -> PyResult<Self> {
        Ok(Self::from_json_str(json)?)
    }
}

/// I/O configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IOConfig {
    /// Files larger than this are refused rather than truncated, since a
    /// partial read would change the measured entropy.
    pub max_file_size: u64,
}

impl Default for IOConfig {
    fn default() -> Self {
        Self {
            max_file_size: 100 * 1024 * 1024, // 100MB
        }
    }
}

impl IOConfig {
    fn validate(&self) -> Result<()> {
        if self.max_file_size == 0 {
            return Err(EntroscanError::InvalidConfiguration(
                "io.max_file_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Entropy profile configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntropyConfig {
    /// Block size for profiles, in bytes.
    pub window_size: usize,
    /// Blocks above this value are reported as high-entropy regions.
    pub high_entropy_block: f64,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            high_entropy_block: 0.875,
        }
    }
}

impl EntropyConfig {
    fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(EntroscanError::InvalidConfiguration(
                "entropy.window_size must be greater than 0".into(),
            ));
        }
        check_unit_interval("entropy.high_entropy_block", self.high_entropy_block)
    }
}

/// Thresholds for the heuristic classifier, on the normalized [0, 1] scale.
///
/// The defaults are 7/8 and 3/8 of the maximum, i.e. 7.0 and 3.0 bits per
/// byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicThresholds {
    /// Strictly above this is packed or encrypted.
    pub high_entropy: f64,
    /// Strictly below this, combined with a large size, is suspicious.
    pub low_entropy: f64,
    /// Strictly above this many bytes counts as large.
    pub large_file_bytes: u64,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            high_entropy: 7.0 / 8.0,
            low_entropy: 3.0 / 8.0,
            large_file_bytes: 10_000,
        }
    }
}

impl HeuristicThresholds {
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("heuristics.high_entropy", self.high_entropy)?;
        check_unit_interval("heuristics.low_entropy", self.low_entropy)?;
        if self.low_entropy > self.high_entropy {
            return Err(EntroscanError::InvalidConfiguration(format!(
                "heuristics.low_entropy ({}) exceeds heuristics.high_entropy ({})",
                self.low_entropy, self.high_entropy
            )));
        }
        Ok(())
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(EntroscanError::InvalidConfiguration(format!(
            "{name} must lie in [0, 1], got {value}"
        )));
    }
    Ok(())
}
