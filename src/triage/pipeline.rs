//! Ordered classifier fallback.
//!
//! The pipeline is a small state machine:
//!
//! ```text
//! Start ──model present──▶ ModelAttempted ──ok──▶ Done
//!   │                            │
//!   │ no model                   │ InferenceFailed
//!   ▼                            ▼
//! HeuristicFallback ◀────────────┘
//!   │
//!   └──────────────────────────────────────▶ Done
//! ```
//!
//! Every call ends in `Done` with exactly one verdict.

use crate::core::triage::{ClassifierError, FeatureVector, Verdict, VerdictSource};
use crate::triage::classifier::{Classifier, Model, ModelClassifier};
use crate::triage::config::HeuristicThresholds;
use crate::triage::heuristics::HeuristicClassifier;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pipeline states, in the order a call may visit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Start,
    ModelAttempted,
    HeuristicFallback,
    Done,
}

/// Result of one pass through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub verdict: Verdict,
    pub source: VerdictSource,
    /// Set when a model was tried and failed.
    pub fallback: Option<ClassifierError>,
    /// States visited, starting at `Start` and ending at `Done`.
    pub path: Vec<PipelineStage>,
}

enum State<'a> {
    Start,
    ModelAttempted(&'a ModelClassifier),
    HeuristicFallback,
    Done(Verdict, VerdictSource),
}

impl State<'_> {
    fn stage(&self) -> PipelineStage {
        match self {
            State::Start => PipelineStage::Start,
            State::ModelAttempted(_) => PipelineStage::ModelAttempted,
            State::HeuristicFallback => PipelineStage::HeuristicFallback,
            State::Done(..) => PipelineStage::Done,
        }
    }
}

/// Model-first, heuristic-second classification.
///
/// Model availability is decided once, at construction; there is no global
/// toggle. The model is shared read-only, so one pipeline may serve any
/// number of concurrent scans.
#[derive(Clone)]
pub struct ClassificationPipeline {
    model: Result<ModelClassifier, ClassifierError>,
    heuristic: HeuristicClassifier,
}

impl fmt::Debug for ClassificationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationPipeline")
            .field("model", &self.model)
            .field("heuristic", &self.heuristic)
            .finish()
    }
}

impl Default for ClassificationPipeline {
    fn default() -> Self {
        Self::heuristic_only(HeuristicThresholds::default())
    }
}

impl ClassificationPipeline {
    /// Builds a pipeline around an optional model.
    pub fn new(model: Option<Arc<dyn Model>>, thresholds: HeuristicThresholds) -> Self {
        match model {
            Some(model) => Self::with_model(model, thresholds),
            None => Self::heuristic_only(thresholds),
        }
    }

    pub fn with_model(model: Arc<dyn Model>, thresholds: HeuristicThresholds) -> Self {
        let model = ModelClassifier::new(model);
        info!(model = model.model_name(), "model-backed classification enabled");
        Self {
            model: Ok(model),
            heuristic: HeuristicClassifier::new(thresholds),
        }
    }

    pub fn heuristic_only(thresholds: HeuristicThresholds) -> Self {
        Self {
            model: Err(ClassifierError::ModelUnavailable(
                "no model supplied".into(),
            )),
            heuristic: HeuristicClassifier::new(thresholds),
        }
    }

    /// Accepts whatever the host's model loader returned. A load failure is
    /// not fatal: it is logged and the pipeline runs in heuristic mode.
    pub fn from_load_result<E: fmt::Display>(
        loaded: Result<Arc<dyn Model>, E>,
        thresholds: HeuristicThresholds,
    ) -> Self {
        match loaded {
            Ok(model) => Self::with_model(model, thresholds),
            Err(e) => {
                warn!(error = %e, "failed to load model, falling back to heuristic mode");
                Self {
                    model: Err(ClassifierError::ModelUnavailable(e.to_string())),
                    heuristic: HeuristicClassifier::new(thresholds),
                }
            }
        }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_ok()
    }

    /// Why no model is in use, if none is.
    pub fn unavailable_reason(&self) -> Option<&ClassifierError> {
        self.model.as_ref().err()
    }

    pub fn heuristic(&self) -> &HeuristicClassifier {
        &self.heuristic
    }

    /// Runs the fallback chain. Never fails and always yields one verdict.
    pub fn classify(&self, features: &FeatureVector) -> Classification {
        let mut state = State::Start;
        let mut path = vec![state.stage()];
        let mut fallback = None;

        loop {
            state = match state {
                State::Start => match &self.model {
                    Ok(model) => State::ModelAttempted(model),
                    Err(reason) => {
                        debug!(%reason, "skipping model");
                        State::HeuristicFallback
                    }
                },
                State::ModelAttempted(model) => match model.classify(features) {
                    Ok(verdict) => State::Done(verdict, model.source()),
                    Err(e) => {
                        warn!(error = %e, "model inference failed, using heuristic analysis");
                        fallback = Some(e);
                        State::HeuristicFallback
                    }
                },
                State::HeuristicFallback => {
                    State::Done(self.heuristic.evaluate(features), self.heuristic.source())
                }
                State::Done(verdict, source) => {
                    debug!(status = %verdict.status, %source, "classification done");
                    return Classification {
                        verdict,
                        source,
                        fallback,
                        path,
                    };
                }
            };
            path.push(state.stage());
        }
    }
}
