//! End-to-end scans through the public API.

mod common;

use common::{create_temp_file, noise, text};
use entroscan::triage::heuristics::{REASON_HIGH_ENTROPY, REASON_LOW_ENTROPY_LARGE, REASON_NORMAL};
use entroscan::triage::{
    ClassificationPipeline, HeuristicClassifier, Model, Prediction, Scanner, TriageConfig,
    VerdictSource, VerdictStatus,
};
use entroscan::EntroscanError;
use std::sync::Arc;

struct ShapeMismatch;

impl Model for ShapeMismatch {
    fn predict(&self, _features: &[f64; 2]) -> anyhow::Result<Prediction> {
        anyhow::bail!("X has 2 features, but model is expecting 264")
    }
}

/// Flags anything above a size cutoff, with sklearn-like probabilities.
struct SizeModel;

impl Model for SizeModel {
    fn predict(&self, features: &[f64; 2]) -> anyhow::Result<Prediction> {
        if features[1] > 1000.0 {
            Ok(Prediction::with_probabilities(1, vec![0.3, 0.7]))
        } else {
            Ok(Prediction::with_probabilities(0, vec![0.6, 0.4]))
        }
    }

    fn name(&self) -> &str {
        "size-model"
    }
}

#[test]
fn heuristic_scans_of_typical_content() {
    let scanner = Scanner::default();

    let packed = scanner.scan_bytes(&noise(65_536, 11));
    assert_eq!(packed.verdict.status, VerdictStatus::Suspicious);
    assert_eq!(packed.verdict.reason, REASON_HIGH_ENTROPY);

    let padded = scanner.scan_bytes(&vec![0u8; 50_000]);
    assert_eq!(padded.verdict.status, VerdictStatus::Suspicious);
    assert_eq!(padded.verdict.reason, REASON_LOW_ENTROPY_LARGE);

    let prose = scanner.scan_bytes(&text(20_000));
    assert_eq!(prose.verdict.status, VerdictStatus::Clean);
    assert_eq!(prose.verdict.reason, REASON_NORMAL);

    for report in [&packed, &padded, &prose] {
        assert_eq!(report.verdict.confidence, 100.0);
        assert_eq!(report.source, VerdictSource::Heuristic);
    }
}

#[test]
fn failing_model_falls_back_to_heuristic_verdict() {
    let scanner = Scanner::new(TriageConfig::default(), Some(Arc::new(ShapeMismatch))).unwrap();
    let heuristic = HeuristicClassifier::default();

    for data in [noise(4096, 5), vec![0u8; 20_000], text(500)] {
        let report = scanner.scan_bytes(&data);
        assert_eq!(report.verdict, heuristic.evaluate(&report.features));
        assert_eq!(report.source, VerdictSource::Heuristic);
        assert!(report
            .fallback
            .as_deref()
            .is_some_and(|f| f.contains("expecting 264")));
    }
}

#[test]
fn model_verdicts_carry_probability_confidence() {
    let scanner = Scanner::new(TriageConfig::default(), Some(Arc::new(SizeModel))).unwrap();

    let big = scanner.scan_bytes(&text(5000));
    assert_eq!(big.verdict.status, VerdictStatus::Malicious);
    assert!((big.verdict.confidence - 70.0).abs() < 1e-9);
    assert_eq!(big.source, VerdictSource::Model);

    let small = scanner.scan_bytes(&text(100));
    assert_eq!(small.verdict.status, VerdictStatus::Clean);
    assert!((small.verdict.confidence - 60.0).abs() < 1e-9);
}

#[test]
fn upstream_load_failure_runs_heuristic_mode() {
    let loaded: Result<Arc<dyn Model>, std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "classifier-model.pkl.gz not found",
    ));
    let pipeline = ClassificationPipeline::from_load_result(loaded, Default::default());
    let scanner = Scanner::with_pipeline(TriageConfig::default(), pipeline).unwrap();
    assert!(!scanner.pipeline().has_model());

    let report = scanner.scan_bytes(&noise(2048, 1));
    assert_eq!(report.source, VerdictSource::Heuristic);
    assert!(report.fallback.is_none());
}

#[test]
fn scan_path_matches_scan_bytes() {
    let content = noise(10_000, 99);
    let file = create_temp_file(&content);
    let scanner = Scanner::default();

    let from_path = scanner.scan_path(file.path()).unwrap();
    assert_eq!(from_path, scanner.scan_bytes(&content));
    assert_eq!(from_path.features.size, 10_000);
    assert_eq!(from_path.sha256.len(), 64);
}

#[test]
fn scan_path_errors_surface() {
    let dir = tempfile::tempdir().unwrap();
    let scanner = Scanner::default();
    assert!(matches!(
        scanner.scan_path(dir.path().join("missing.exe")),
        Err(EntroscanError::Io(_))
    ));

    let mut config = TriageConfig::default();
    config.io.max_file_size = 16;
    let scanner = Scanner::new(config, None).unwrap();
    let file = create_temp_file(&[1u8; 64]);
    assert!(matches!(
        scanner.scan_path(file.path()),
        Err(EntroscanError::FileTooLarge { .. })
    ));
}

#[test]
fn profile_path_uses_configured_window() {
    let config = TriageConfig::from_json_str(r#"{"entropy": {"window_size": 1024}}"#).unwrap();
    let scanner = Scanner::new(config, None).unwrap();
    let file = create_temp_file(&noise(4096, 2));

    let profile = scanner.profile_path(file.path()).unwrap();
    assert_eq!(profile.window_size, 1024);
    assert_eq!(profile.len(), 4);
    assert_eq!(scanner.high_entropy_regions(&profile), vec![0, 1, 2, 3]);
}

#[test]
fn report_json_has_stable_fields() {
    let report = Scanner::default().scan_bytes(&text(2000));
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    for field in ["status", "confidence", "reason", "entropy", "size", "source", "sha256"] {
        assert!(json.get(field).is_some(), "missing {field}");
    }
    assert_eq!(json["status"], "clean");
    assert_eq!(json["size"], 2000);
}

#[test]
fn parallel_scans_agree_with_sequential() {
    let scanner = Scanner::new(TriageConfig::default(), Some(Arc::new(SizeModel))).unwrap();
    let buffers: Vec<Vec<u8>> = (0..16).map(|i| noise(200 * (i + 1), i as u64 + 1)).collect();

    let parallel = scanner.scan_many(&buffers);
    let sequential: Vec<_> = buffers.iter().map(|b| scanner.scan_bytes(b)).collect();
    assert_eq!(parallel, sequential);
}
