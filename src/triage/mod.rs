//! Triage runtime: classifiers, the fallback pipeline, configuration and
//! the scanner facade.
//!
//! Raw bytes are measured into a [`FeatureVector`], the
//! [`ClassificationPipeline`] turns that into a [`Verdict`], and [`Scanner`]
//! packages both into a [`ScanReport`].

pub mod api;
pub mod classifier;
pub mod config;
pub mod heuristics;
pub mod io;
pub mod pipeline;

// Re-export key types from core for convenience
pub use crate::core::triage::{
    ClassifierError, FeatureVector, ScanReport, Verdict, VerdictSource, VerdictStatus,
};
pub use api::{profile_bytes, scan_bytes, Scanner};
pub use classifier::{Classifier, Model, ModelClassifier, Prediction};
pub use config::{EntropyConfig, HeuristicThresholds, IOConfig, TriageConfig};
pub use heuristics::HeuristicClassifier;
pub use pipeline::{Classification, ClassificationPipeline, PipelineStage};
