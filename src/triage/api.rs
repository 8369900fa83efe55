//! Scan and profile entry points.
//!
//! [`Scanner`] holds the validated configuration and the classification
//! pipeline, both fixed for its lifetime. Byte-level operations never fail;
//! the path variants add file acquisition and can return I/O errors.

use crate::core::triage::{FeatureVector, ScanReport};
use crate::entropy::{block_entropy, BlockEntropyProfile};
use crate::error::Result;
use crate::hashing::sha256_digest;
use crate::triage::classifier::Model;
use crate::triage::config::TriageConfig;
use crate::triage::io::read_file;
use crate::triage::pipeline::ClassificationPipeline;
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, info_span};

/// Entropy scanner with an optional trained model.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: TriageConfig,
    pipeline: ClassificationPipeline,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            config: TriageConfig::default(),
            pipeline: ClassificationPipeline::default(),
        }
    }
}

impl Scanner {
    /// Validates `config` and wires up the pipeline.
    pub fn new(config: TriageConfig, model: Option<Arc<dyn Model>>) -> Result<Self> {
        config.validate()?;
        let pipeline = ClassificationPipeline::new(model, config.heuristics.clone());
        Ok(Self { config, pipeline })
    }

    /// Uses a pipeline built elsewhere, e.g. via
    /// [`ClassificationPipeline::from_load_result`].
    pub fn with_pipeline(config: TriageConfig, pipeline: ClassificationPipeline) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, pipeline })
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &ClassificationPipeline {
        &self.pipeline
    }

    /// Measures and classifies a buffer.
    pub fn scan_bytes(&self, data: &[u8]) -> ScanReport {
        let span = info_span!("scan", size = data.len());
        let _guard = span.enter();

        let features = FeatureVector::from_bytes(data);
        debug!(entropy = features.entropy, size = features.size, "measured buffer");

        let outcome = self.pipeline.classify(&features);
        info!(
            status = %outcome.verdict.status,
            confidence = outcome.verdict.confidence,
            source = %outcome.source,
            "scan complete"
        );

        ScanReport {
            verdict: outcome.verdict,
            features,
            source: outcome.source,
            fallback: outcome.fallback.map(|e| e.to_string()),
            sha256: sha256_digest(data),
        }
    }

    /// Reads and scans a file.
    pub fn scan_path<P: AsRef<Path>>(&self, path: P) -> Result<ScanReport> {
        let path = path.as_ref();
        info!("Scanning {:?}", path);
        let data = read_file(path, &self.config.io)?;
        Ok(self.scan_bytes(&data))
    }

    /// Scans independent buffers in parallel. Output order matches input.
    pub fn scan_many<B>(&self, buffers: &[B]) -> Vec<ScanReport>
    where
        B: AsRef<[u8]> + Sync,
    {
        buffers
            .par_iter()
            .map(|b| self.scan_bytes(b.as_ref()))
            .collect()
    }

    /// Per-block entropy profile using the configured window size.
    pub fn profile_bytes(&self, data: &[u8]) -> Result<BlockEntropyProfile> {
        let profile = block_entropy(data, self.config.entropy.window_size)?;
        debug!(
            blocks = profile.len(),
            window_size = profile.window_size,
            sentinel = profile.sentinel,
            "built entropy profile"
        );
        Ok(profile)
    }

    /// Reads a file and profiles it.
    pub fn profile_path<P: AsRef<Path>>(&self, path: P) -> Result<BlockEntropyProfile> {
        let data = read_file(path, &self.config.io)?;
        self.profile_bytes(&data)
    }

    /// Indices of profile blocks above the configured high-entropy level.
    pub fn high_entropy_regions(&self, profile: &BlockEntropyProfile) -> Vec<usize> {
        profile.high_entropy_blocks(self.config.entropy.high_entropy_block)
    }
}

/// Scans a buffer with default settings and no model.
pub fn scan_bytes(data: &[u8]) -> ScanReport {
    Scanner::default().scan_bytes(data)
}

/// Profiles a buffer with an explicit window size.
pub fn profile_bytes(data: &[u8], window_size: usize) -> Result<BlockEntropyProfile> {
    block_entropy(data, window_size)
}

#[cfg(feature = "python-ext")]
pub(crate) mod python {
    use super::*;
    use crate::triage::classifier::Prediction;
    use pyo3::prelude::*;
    use pyo3::types::PyList;

    /// Drives a Python object with scikit-learn style `predict` and optional
    /// `predict_proba`.
    pub struct PyModel {
        inner: Py<PyAny>,
        name: String,
    }

    impl PyModel {
        pub fn new(inner: Py<PyAny>) -> Self {
            let name = Python::attach(|py| {
                inner
                    .bind(py)
                    .get_type()
                    .name()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|_| "python".to_string())
            });
            Self { inner, name }
        }
    }

    fn to_plain<'py>(value: Bound<'py, PyAny>) -> PyResult<Bound<'py, PyAny>> {
        // numpy arrays and scalars convert to builtin lists and numbers.
        if value.hasattr("tolist")? {
            value.call_method0("tolist")
        } else {
            Ok(value)
        }
    }

    fn predict_py(model: &Bound<'_, PyAny>, features: &[f64; 2]) -> PyResult<Prediction> {
        let py = model.py();
        let rows = PyList::new(py, [PyList::new(py, features.iter().copied())?])?;

        let labels = to_plain(model.call_method1("predict", (rows.clone(),))?)?;
        let label: i64 = labels.get_item(0)?.extract()?;

        if model.hasattr("predict_proba")? {
            let probs = to_plain(model.call_method1("predict_proba", (rows,))?)?;
            let row: Vec<f64> = probs.get_item(0)?.extract()?;
            Ok(Prediction::with_probabilities(label, row))
        } else {
            Ok(Prediction::label(label))
        }
    }

    impl Model for PyModel {
        fn predict(&self, features: &[f64; 2]) -> anyhow::Result<Prediction> {
            Python::attach(|py| predict_py(self.inner.bind(py), features))
                .map_err(|e| anyhow::anyhow!("{e}"))
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn scanner(model: Option<Py<PyAny>>, config: Option<TriageConfig>) -> PyResult<Scanner> {
        let model = model.map(|m| Arc::new(PyModel::new(m)) as Arc<dyn Model>);
        Ok(Scanner::new(config.unwrap_or_default(), model)?)
    }

    #[pyfunction]
    #[pyo3(name = "scan_bytes", signature = (data, model=None, config=None))]
    pub fn scan_bytes_py(
        py: Python<'_>,
        data: Vec<u8>,
        model: Option<Py<PyAny>>,
        config: Option<TriageConfig>,
    ) -> PyResult<ScanReport> {
        let scanner = scanner(model, config)?;
        // Model calls reacquire the interpreter on their own.
        Ok(py.detach(|| scanner.scan_bytes(&data)))
    }

    #[pyfunction]
    #[pyo3(name = "scan_path", signature = (path, model=None, config=None))]
    pub fn scan_path_py(
        py: Python<'_>,
        path: std::path::PathBuf,
        model: Option<Py<PyAny>>,
        config: Option<TriageConfig>,
    ) -> PyResult<ScanReport> {
        let scanner = scanner(model, config)?;
        Ok(py.detach(|| scanner.scan_path(&path))?)
    }

    #[pyfunction]
    #[pyo3(name = "block_entropy", signature = (data, window_size=crate::entropy::DEFAULT_WINDOW_SIZE))]
    pub fn block_entropy_py(data: Vec<u8>, window_size: usize) -> PyResult<BlockEntropyProfile> {
        Ok(block_entropy(&data, window_size)?)
    }

    #[pyfunction]
    #[pyo3(name = "entropy")]
    pub fn entropy_py(data: Vec<u8>) -> f64 {
        crate::entropy::shannon_entropy(&data)
    }
}

#[cfg(feature = "python-ext")]
pub use python::PyModel;
