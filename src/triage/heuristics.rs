//! Rule-based classification from entropy and size alone.

use crate::core::triage::{ClassifierError, FeatureVector, Verdict, VerdictSource, VerdictStatus};
use crate::triage::classifier::Classifier;
use crate::triage::config::HeuristicThresholds;

pub const REASON_HIGH_ENTROPY: &str = "high entropy, indicates packed or encrypted content";
pub const REASON_LOW_ENTROPY_LARGE: &str = "low entropy for large file, possible text disguise";
pub const REASON_NORMAL: &str = "entropy within normal parameters";

/// The rules carry no probabilistic basis, so every verdict is reported at
/// full confidence.
pub const HEURISTIC_CONFIDENCE: f64 = 100.0;

/// Fixed-threshold classifier. First matching rule wins:
///
/// 1. entropy above `high_entropy`: suspicious
/// 2. entropy below `low_entropy` and size above `large_file_bytes`: suspicious
/// 3. otherwise clean
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeuristicClassifier {
    thresholds: HeuristicThresholds,
}

impl HeuristicClassifier {
    pub fn new(thresholds: HeuristicThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &HeuristicThresholds {
        &self.thresholds
    }

    /// Infallible form of [`Classifier::classify`].
    pub fn evaluate(&self, features: &FeatureVector) -> Verdict {
        let t = &self.thresholds;
        if features.entropy > t.high_entropy {
            Verdict::new(
                VerdictStatus::Suspicious,
                HEURISTIC_CONFIDENCE,
                REASON_HIGH_ENTROPY,
            )
        } else if features.entropy < t.low_entropy && features.size > t.large_file_bytes {
            Verdict::new(
                VerdictStatus::Suspicious,
                HEURISTIC_CONFIDENCE,
                REASON_LOW_ENTROPY_LARGE,
            )
        } else {
            Verdict::new(VerdictStatus::Clean, HEURISTIC_CONFIDENCE, REASON_NORMAL)
        }
    }
}

impl Classifier for HeuristicClassifier {
    fn classify(&self, features: &FeatureVector) -> Result<Verdict, ClassifierError> {
        Ok(self.evaluate(features))
    }

    fn source(&self) -> VerdictSource {
        VerdictSource::Heuristic
    }
}

/// Classifies with the default thresholds.
pub fn classify(entropy: f64, size: u64) -> Verdict {
    HeuristicClassifier::default().evaluate(&FeatureVector::new(entropy, size))
}
