//! Classifier capability and the model-backed variant.
//!
//! A [`Model`] is whatever the host's loader produced: a decision forest, an
//! ONNX session, a Python object. The crate never sees its serialization; it
//! only asks for a label (and optionally class probabilities) for the
//! two-element vector `[entropy, size]`.

use crate::core::triage::{
    ClassifierError, FeatureVector, Verdict, VerdictSource, VerdictStatus, MAX_CONFIDENCE,
};
use std::fmt;
use std::sync::Arc;

/// Label a model emits for malicious samples; every other label is benign.
pub const MALICIOUS_LABEL: i64 = 1;

/// Raw model output for one feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Predicted class label.
    pub label: i64,
    /// Per-class probabilities when the model exposes them.
    pub probabilities: Option<Vec<f64>>,
}

impl Prediction {
    pub fn label(label: i64) -> Self {
        Self {
            label,
            probabilities: None,
        }
    }

    pub fn with_probabilities(label: i64, probabilities: Vec<f64>) -> Self {
        Self {
            label,
            probabilities: Some(probabilities),
        }
    }
}

/// A loaded, read-only trained model.
///
/// Implementations are shared across concurrent scans, so `predict` takes
/// `&self` and the trait requires `Send + Sync`.
pub trait Model: Send + Sync {
    /// Predicts the class of `[entropy, size]`.
    fn predict(&self, features: &[f64; 2]) -> anyhow::Result<Prediction>;

    /// Short label for logs.
    fn name(&self) -> &str {
        "model"
    }
}

/// Something that turns features into a verdict.
pub trait Classifier {
    fn classify(&self, features: &FeatureVector) -> Result<Verdict, ClassifierError>;

    /// Which variant this is, for reporting.
    fn source(&self) -> VerdictSource;
}

/// Classifier backed by a trained [`Model`].
#[derive(Clone)]
pub struct ModelClassifier {
    model: Arc<dyn Model>,
}

impl fmt::Debug for ModelClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelClassifier")
            .field("model", &self.model.name())
            .finish()
    }
}

impl ModelClassifier {
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}

impl Classifier for ModelClassifier {
    fn classify(&self, features: &FeatureVector) -> Result<Verdict, ClassifierError> {
        let prediction = self
            .model
            .predict(&features.as_array())
            .map_err(|e| ClassifierError::InferenceFailed(format!("{e:#}")))?;

        let confidence = match &prediction.probabilities {
            Some(probs) => MAX_CONFIDENCE * max_probability(probs)?,
            None => MAX_CONFIDENCE,
        };

        let (status, reason) = if prediction.label == MALICIOUS_LABEL {
            (VerdictStatus::Malicious, "model classified the file as malicious")
        } else {
            (VerdictStatus::Clean, "model classified the file as benign")
        };

        Ok(Verdict::new(status, confidence, reason))
    }

    fn source(&self) -> VerdictSource {
        VerdictSource::Model
    }
}

/// Largest class probability, rejecting vectors no sane model would emit.
fn max_probability(probs: &[f64]) -> Result<f64, ClassifierError> {
    if probs.is_empty() {
        return Err(ClassifierError::InferenceFailed(
            "model returned an empty probability vector".into(),
        ));
    }
    if let Some(bad) = probs.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(ClassifierError::InferenceFailed(format!(
            "model returned probability {bad} outside [0, 1]"
        )));
    }
    Ok(probs.iter().copied().fold(0.0, f64::max))
}
