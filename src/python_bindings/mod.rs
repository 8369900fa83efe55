//! Python bindings for entroscan.
//!
//! Mirrors the Rust API: `entropy`, `block_entropy`, `scan_bytes` and
//! `scan_path`, where `model` may be any object with a scikit-learn style
//! `predict` (and optionally `predict_proba`).

use pyo3::prelude::*;

/// Register all Python bindings with the module.
pub fn register_python_bindings(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<crate::core::triage::VerdictStatus>()?;
    m.add_class::<crate::core::triage::VerdictSource>()?;
    m.add_class::<crate::core::triage::Verdict>()?;
    m.add_class::<crate::core::triage::FeatureVector>()?;
    m.add_class::<crate::core::triage::ScanReport>()?;
    m.add_class::<crate::entropy::BlockEntropyProfile>()?;
    m.add_class::<crate::triage::config::TriageConfig>()?;

    m.add_function(wrap_pyfunction!(crate::triage::api::python::entropy_py, m)?)?;
    m.add_function(wrap_pyfunction!(crate::triage::api::python::block_entropy_py, m)?)?;
    m.add_function(wrap_pyfunction!(crate::triage::api::python::scan_bytes_py, m)?)?;
    m.add_function(wrap_pyfunction!(crate::triage::api::python::scan_path_py, m)?)?;
    m.add_function(wrap_pyfunction!(crate::logging::init_logging, m)?)?;

    Ok(())
}
