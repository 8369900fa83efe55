//! Error types for the classification path.

use thiserror::Error;

/// Why a classifier could not produce a verdict.
///
/// Neither variant is fatal; the pipeline answers both with the heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// No model was supplied, or the upstream loader failed.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// A model is loaded but its prediction failed.
    #[error("model inference failed: {0}")]
    InferenceFailed(String),
}
