//! Fixed-window block entropy profiles.
//!
//! A profile partitions a buffer into consecutive, non-overlapping windows and
//! measures each one independently. It is the data behind an entropy plot.

use crate::entropy::core::shannon_entropy;
use crate::entropy::stats::Stats;
use crate::error::{EntroscanError, Result};
#[cfg(feature = "python-ext")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Default block size in bytes.
pub const DEFAULT_WINDOW_SIZE: usize = 256;

/// Ordered per-block entropy values for one buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "python-ext", pyclass)]
pub struct BlockEntropyProfile {
    /// Window size used, in bytes.
    pub window_size: usize,
    /// Length of the measured buffer.
    pub total_size: u64,
    /// One normalized entropy value per window.
    pub blocks: Vec<f64>,
    /// True when the buffer was shorter than one window and `blocks` is the
    /// `[0.0]` placeholder rather than a measurement.
    pub sentinel: bool,
}

impl BlockEntropyProfile {
    /// Returns the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false for a profile built by [`block_entropy`].
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Byte offset where block `index` starts.
    pub fn offset_of(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.window_size as u64)
    }

    /// Measured blocks only; empty for a sentinel profile.
    pub fn measured(&self) -> &[f64] {
        if self.sentinel {
            &[]
        } else {
            &self.blocks
        }
    }

    /// Finds the minimum entropy value.
    pub fn min(&self) -> Option<f64> {
        self.measured().iter().copied().reduce(f64::min)
    }

    /// Finds the maximum entropy value.
    pub fn max(&self) -> Option<f64> {
        self.measured().iter().copied().reduce(f64::max)
    }

    /// Calculates the mean entropy.
    pub fn mean(&self) -> Option<f64> {
        self.summary().map(|s| s.mean)
    }

    /// Calculates the standard deviation of entropy values.
    pub fn std_dev(&self) -> Option<f64> {
        self.summary().map(|s| s.std_dev)
    }

    /// Statistical summary over measured blocks.
    pub fn summary(&self) -> Option<Stats> {
        Stats::from_values(self.measured())
    }

    /// Indices of blocks whose entropy exceeds `threshold`, typically the
    /// regions a renderer shades as packed or encrypted.
    pub fn high_entropy_blocks(&self, threshold: f64) -> Vec<usize> {
        self.measured()
            .iter()
            .enumerate()
            .filter(|(_, &e)| e > threshold)
            .map(|(i, _)| i)
            .collect()
    }

    /// Detects entropy cliffs (sudden changes between consecutive blocks).
    ///
    /// Returns indices and delta values where the change is at least `threshold`.
    pub fn detect_cliffs(&self, threshold: f64) -> Vec<(usize, f64)> {
        self.measured()
            .windows(2)
            .enumerate()
            .filter_map(|(i, pair)| {
                let delta = (pair[1] - pair[0]).abs();
                (delta >= threshold).then_some((i + 1, delta))
            })
            .collect()
    }
}

#[cfg(feature = "python-ext")]
#[pymethods]
impl BlockEntropyProfile {
    #[getter]
    fn window_size(&self) -> usize {
        self.window_size
    }
    #[getter]
    fn total_size(&self) -> u64 {
        self.total_size
    }
    #[getter]
    fn blocks(&self) -> Vec<f64> {
        self.blocks.clone()
    }
    #[getter]
    fn sentinel(&self) -> bool {
        self.sentinel
    }
    #[pyo3(name = "high_entropy_blocks")]
    fn high_entropy_blocks_py(&self, threshold: f64) -> Vec<usize> {
        self.high_entropy_blocks(threshold)
    }
    fn __len__(&self) -> usize {
        self.blocks.len()
    }
    fn __repr__(&self) -> String {
        format!(
            "BlockEntropyProfile(window_size={}, blocks={}, sentinel={})",
            self.window_size,
            self.blocks.len(),
            self.sentinel
        )
    }
}

/// Computes the entropy of each consecutive `window_size` chunk of `data`.
///
/// A trailing partial chunk is measured over its own length. A buffer shorter
/// than one window yields the sentinel profile `[0.0]`. A zero window size is
/// rejected.
pub fn block_entropy(data: &[u8], window_size: usize) -> Result<BlockEntropyProfile> {
    if window_size == 0 {
        return Err(EntroscanError::InvalidConfiguration(
            "window_size must be greater than 0".into(),
        ));
    }

    let total_size = data.len() as u64;
    if data.len() < window_size {
        return Ok(BlockEntropyProfile {
            window_size,
            total_size,
            blocks: vec![0.0],
            sentinel: true,
        });
    }

    Ok(BlockEntropyProfile {
        window_size,
        total_size,
        blocks: data.chunks(window_size).map(shannon_entropy).collect(),
        sentinel: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_window_rejected() {
        let err = block_entropy(b"abc", 0).unwrap_err();
        assert!(matches!(err, EntroscanError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_undersized_is_sentinel() {
        for len in [0usize, 1, 255] {
            let data = vec![0xAAu8; len];
            let profile = block_entropy(&data, 256).unwrap();
            assert_eq!(profile.blocks, vec![0.0]);
            assert!(profile.sentinel);
            assert!(profile.measured().is_empty());
            assert!(profile.summary().is_none());
        }
    }

    #[test]
    fn test_block_count_is_ceil() {
        let cases = [(256usize, 256usize, 1usize), (512, 256, 2), (513, 256, 3), (1000, 7, 143)];
        for (len, window, expected) in cases {
            let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let profile = block_entropy(&data, window).unwrap();
            assert_eq!(profile.len(), expected, "len={len} window={window}");
            assert!(!profile.sentinel);
        }
    }

    #[test]
    fn test_partial_trailing_chunk_measured_on_its_own() {
        let mut data = vec![0u8; 256];
        data.extend_from_slice(b"ABAB");
        let profile = block_entropy(&data, 256).unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.blocks[0], 0.0);
        // "ABAB" alone is one bit per byte.
        assert!((profile.blocks[1] - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_blocks_are_independent() {
        let mut data = vec![b'A'; 256];
        data.extend((0..=255u8).collect::<Vec<u8>>());
        data.extend(vec![b'B'; 256]);

        let profile = block_entropy(&data, 256).unwrap();
        assert_eq!(profile.blocks[0], 0.0);
        assert!((profile.blocks[1] - 1.0).abs() < 1e-9);
        assert_eq!(profile.blocks[2], 0.0);

        assert_eq!(profile.high_entropy_blocks(0.875), vec![1]);
        let cliffs = profile.detect_cliffs(0.5);
        assert_eq!(cliffs.iter().map(|c| c.0).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(profile.offset_of(2), 512);
    }

    #[test]
    fn test_profile_statistics() {
        let mut data = vec![0u8; 512];
        data.extend((0..=255u8).cycle().take(512));
        let profile = block_entropy(&data, 256).unwrap();

        assert_eq!(profile.min(), Some(0.0));
        assert!(profile.max().unwrap() > 0.99);
        let mean = profile.mean().unwrap();
        assert!((mean - 0.5).abs() < 1e-9);
        assert!(profile.std_dev().unwrap() > 0.4);
    }

    #[test]
    fn test_summary_ignores_non_finite_blocks() {
        let profile = BlockEntropyProfile {
            window_size: 256,
            total_size: 768,
            blocks: vec![0.25, f64::NAN, 0.75],
            sentinel: false,
        };
        let stats = profile.summary().unwrap();
        assert_eq!(stats.count, 2);
        assert!((stats.mean - 0.5).abs() < 1e-12);
        assert_eq!(stats.median, 0.5);
    }
}
