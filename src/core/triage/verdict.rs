//! Verdict and report types for triage results.

use super::features::FeatureVector;
#[cfg(feature = "python-ext")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of [`Verdict::confidence`].
pub const MAX_CONFIDENCE: f64 = 100.0;

/// Triage decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "python-ext", pyclass(eq, eq_int))]
pub enum VerdictStatus {
    Clean,
    Suspicious,
    Malicious,
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerdictStatus::Clean => "CLEAN",
            VerdictStatus::Suspicious => "SUSPICIOUS",
            VerdictStatus::Malicious => "MALICIOUS",
        };
        f.write_str(s)
    }
}

/// Which classifier variant produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "python-ext", pyclass(eq, eq_int))]
pub enum VerdictSource {
    Model,
    Heuristic,
}

impl fmt::Display for VerdictSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictSource::Model => f.write_str("model"),
            VerdictSource::Heuristic => f.write_str("heuristic"),
        }
    }
}

/// Final triage decision with a confidence percentage and reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "python-ext", pyclass(frozen))]
pub struct Verdict {
    pub status: VerdictStatus,
    /// Percentage in [0.0, 100.0].
    pub confidence: f64,
    pub reason: String,
}

impl Verdict {
    /// Builds a verdict, clamping `confidence` into [0, 100].
    pub fn new(status: VerdictStatus, confidence: f64, reason: impl Into<String>) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, MAX_CONFIDENCE)
        };
        Self {
            status,
            confidence,
            reason: reason.into(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.status == VerdictStatus::Clean
    }
}

#[cfg(feature = "python-ext")]
#[pymethods]
impl Verdict {
    #[getter]
    fn status(&self) -> VerdictStatus {
        self.status
    }
    #[getter]
    fn confidence(&self) -> f64 {
        self.confidence
    }
    #[getter]
    fn reason(&self) -> String {
        self.reason.clone()
    }
    fn __repr__(&self) -> String {
        format!(
            "Verdict(status={}, confidence={:.2}, reason={:?})",
            self.status, self.confidence, self.reason
        )
    }
}

/// Everything a presentation layer needs about one scan.
///
/// Serializes flat: `status`, `confidence`, `reason`, `entropy`, `size`,
/// `source`, `sha256` and, after a model failure, `fallback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "python-ext", pyclass(frozen))]
pub struct ScanReport {
    #[serde(flatten)]
    pub verdict: Verdict,
    #[serde(flatten)]
    pub features: FeatureVector,
    pub source: VerdictSource,
    /// Classifier error that forced the heuristic fallback, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    /// Hex SHA-256 of the scanned bytes.
    pub sha256: String,
}

impl ScanReport {
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis Results:")?;
        writeln!(f, "  File Size:  {} bytes", self.features.size)?;
        writeln!(f, "  Entropy:    {:.4}", self.features.entropy)?;
        writeln!(f, "  Verdict:    {}", self.verdict.status)?;
        writeln!(f, "  Confidence: {:.2}%", self.verdict.confidence)?;
        writeln!(f, "  Reason:     {}", self.verdict.reason)?;
        write!(f, "  Source:     {}", self.source)?;
        if let Some(err) = &self.fallback {
            write!(f, " (after {err})")?;
        }
        Ok(())
    }
}

#[cfg(feature = "python-ext")]
#[pymethods]
impl ScanReport {
    #[getter]
    fn verdict(&self) -> Verdict {
        self.verdict.clone()
    }
    #[getter]
    fn status(&self) -> VerdictStatus {
        self.verdict.status
    }
    #[getter]
    fn confidence(&self) -> f64 {
        self.verdict.confidence
    }
    #[getter]
    fn reason(&self) -> String {
        self.verdict.reason.clone()
    }
    #[getter]
    fn entropy(&self) -> f64 {
        self.features.entropy
    }
    #[getter]
    fn size(&self) -> u64 {
        self.features.size
    }
    #[getter]
    fn source(&self) -> VerdictSource {
        self.source
    }
    #[getter]
    fn fallback(&self) -> Option<String> {
        self.fallback.clone()
    }
    #[getter]
    fn sha256(&self) -> String {
        self.sha256.clone()
    }
    #[pyo3(name = "to_json")]
    fn to_json_py(&self) -> PyResult<String> {
        Ok(self.to_json()?)
    }
    fn __str__(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ScanReport {
        ScanReport {
            verdict: Verdict::new(VerdictStatus::Suspicious, 100.0, "high entropy"),
            features: FeatureVector::new(0.9, 1000),
            source: VerdictSource::Heuristic,
            fallback: None,
            sha256: "00".repeat(32),
        }
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(Verdict::new(VerdictStatus::Clean, 150.0, "").confidence, 100.0);
        assert_eq!(Verdict::new(VerdictStatus::Clean, -3.0, "").confidence, 0.0);
        assert_eq!(Verdict::new(VerdictStatus::Clean, f64::NAN, "").confidence, 0.0);
        assert_eq!(Verdict::new(VerdictStatus::Clean, 42.5, "").confidence, 42.5);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(VerdictStatus::Clean.to_string(), "CLEAN");
        assert_eq!(VerdictStatus::Suspicious.to_string(), "SUSPICIOUS");
        assert_eq!(VerdictStatus::Malicious.to_string(), "MALICIOUS");
    }

    #[test]
    fn test_report_json_is_flat() {
        let json: serde_json::Value = serde_json::from_str(&report().to_json().unwrap()).unwrap();
        assert_eq!(json["status"], "suspicious");
        assert_eq!(json["confidence"], 100.0);
        assert_eq!(json["reason"], "high entropy");
        assert_eq!(json["entropy"], 0.9);
        assert_eq!(json["size"], 1000);
        assert_eq!(json["source"], "heuristic");
        assert!(json.get("fallback").is_none());
    }

    #[test]
    fn test_report_json_roundtrip() {
        let mut original = report();
        original.fallback = Some("model inference failed: boom".into());
        let parsed: ScanReport = serde_json::from_str(&original.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_report_display() {
        let text = report().to_string();
        assert!(text.contains("Verdict:    SUSPICIOUS"));
        assert!(text.contains("Confidence: 100.00%"));
        assert!(text.contains("Source:     heuristic"));
    }
}
