//! Feature vector handed to classifiers.

use crate::entropy::shannon_entropy;
#[cfg(feature = "python-ext")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Measurements a classifier decides on.
///
/// `size` is the length of the measured span; today that is always the whole
/// buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "python-ext", pyclass(frozen))]
pub struct FeatureVector {
    /// Normalized Shannon entropy in [0.0, 1.0].
    pub entropy: f64,
    /// Byte count of the measured span.
    pub size: u64,
}

impl FeatureVector {
    pub fn new(entropy: f64, size: u64) -> Self {
        Self { entropy, size }
    }

    /// Measures a whole buffer.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            entropy: shannon_entropy(data),
            size: data.len() as u64,
        }
    }

    /// The `[entropy, size]` layout trained models expect.
    pub fn as_array(&self) -> [f64; 2] {
        [self.entropy, self.size as f64]
    }
}

#[cfg(feature = "python-ext")]
#[pymethods]
impl FeatureVector {
    #[new]
    fn new_py(entropy: f64, size: u64) -> Self {
        Self::new(entropy, size)
    }
    #[getter]
    fn entropy(&self) -> f64 {
        self.entropy
    }
    #[getter]
    fn size(&self) -> u64 {
        self.size
    }
    fn __repr__(&self) -> String {
        format!("FeatureVector(entropy={:.4}, size={})", self.entropy, self.size)
    }
}
