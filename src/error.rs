//! Error types for entroscan.
//!
//! Configuration misuse and file acquisition failures surface through
//! [`EntroscanError`]. Classification failures never reach callers; they are
//! typed as [`ClassifierError`](crate::core::triage::ClassifierError) and
//! absorbed by the pipeline.

use thiserror::Error;

/// Main error type for entroscan operations.
#[derive(Debug, Error)]
pub enum EntroscanError {
    /// Caller contract violation, e.g. a zero window size
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// File exceeds the configured size ceiling
    #[error("File too large: {size} bytes (limit: {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EntroscanError {
    fn from(err: serde_json::Error) -> Self {
        EntroscanError::Serialization(err.to_string())
    }
}

/// Result type alias for entroscan operations
pub type Result<T> = std::result::Result<T, EntroscanError>;

/// Convert entroscan errors to PyO3 exceptions
#[cfg(feature = "python-ext")]
impl From<EntroscanError> for pyo3::PyErr {
    fn from(err: EntroscanError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyIOError, PyValueError};

        match err {
            EntroscanError::Io(e) => PyIOError::new_err(e.to_string()),
            EntroscanError::FileTooLarge { .. } => PyIOError::new_err(err.to_string()),
            EntroscanError::InvalidConfiguration(msg) | EntroscanError::Serialization(msg) => {
                PyValueError::new_err(msg)
            }
        }
    }
}
