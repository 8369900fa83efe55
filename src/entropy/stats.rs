//! Summary statistics over entropy profiles.
//!
//! Profiles can arrive from outside (deserialized JSON, Python), so values
//! that are not finite are skipped rather than allowed to poison the summary.

use serde::{Deserialize, Serialize};

/// Summary of the measured blocks of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// Number of finite values the summary was computed over.
    pub count: usize,
}

impl Stats {
    /// Summarizes the finite entries of `values`. `None` if there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return None;
        }
        finite.sort_by(f64::total_cmp);

        let n = finite.len() as f64;
        let mean = finite.iter().sum::<f64>() / n;
        let variance = finite.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;

        Some(Stats {
            mean,
            std_dev: variance.sqrt(),
            min: finite[0],
            max: finite[finite.len() - 1],
            median: median_of_sorted(&finite),
            count: finite.len(),
        })
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Median of the finite entries of `values`, 0.0 if there are none.
pub fn calculate_median(values: &[f64]) -> f64 {
    Stats::from_values(values).map_or(0.0, |s| s.median)
}
