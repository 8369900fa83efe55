//! Core triage data types organized by submodule.

pub mod errors;
pub mod features;
pub mod verdict;

// Re-exports for convenient access under crate::core::triage::*
pub use errors::ClassifierError;
pub use features::FeatureVector;
pub use verdict::{ScanReport, Verdict, VerdictSource, VerdictStatus, MAX_CONFIDENCE};
