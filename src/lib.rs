//! Entropy-based static file triage.
//!
//! `entroscan` measures the normalized Shannon entropy of a byte buffer and
//! turns it into a verdict, either through a host-supplied trained model or
//! through fixed heuristics when no usable model exists. It can also produce a
//! per-block entropy profile for plotting.
//!
//! ```
//! use entroscan::triage::{Scanner, VerdictStatus};
//!
//! let scanner = Scanner::default();
//! let report = scanner.scan_bytes(&vec![0u8; 20_000]);
//! assert_eq!(report.verdict.status, VerdictStatus::Suspicious);
//! ```

/// Core data types module
pub mod core;
pub mod entropy;
pub mod error;
pub mod hashing;
pub mod logging;
pub mod triage;

#[cfg(feature = "python-ext")]
pub mod python_bindings;

pub use error::{EntroscanError, Result};

#[cfg(feature = "python-ext")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python-ext")]
#[pymodule]
fn entroscan(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python_bindings::register_python_bindings(m)
}
