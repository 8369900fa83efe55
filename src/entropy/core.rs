//! Core entropy calculation primitives.
//!
//! All values produced here are normalized to base 256, so they lie in
//! [0.0, 1.0] no matter how many distinct byte values a buffer actually uses.

/// Bits per byte; the maximum unnormalized (log2) entropy of a byte buffer.
pub const MAX_BITS: f64 = 8.0;

/// Calculates the normalized Shannon entropy of a byte slice.
///
/// Returns a value between 0.0 and 1.0, where:
/// - 0.0 represents no randomness (empty input, or one byte value repeated)
/// - 1.0 represents a uniform distribution over all 256 byte values
///
/// The sum is `-(c/n) * ln(c/n) / ln(256)` over every non-zero bucket, in
/// byte-value order. Each term is scaled individually, so results match a
/// per-bucket base-256 reference to the last bit.
#[inline]
pub fn shannon_entropy(data: &[u8]) -> f64 {
    Histogram::from_bytes(data).entropy()
}

/// Converts a normalized entropy value back to the 0..8 bits-per-byte scale.
#[inline]
pub fn to_bits(normalized: f64) -> f64 {
    normalized * MAX_BITS
}

/// Byte frequency histogram.
#[derive(Debug, Clone)]
pub struct Histogram {
    counts: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Creates a new empty histogram.
    #[inline]
    pub fn new() -> Self {
        Self {
            counts: [0; 256],
            total: 0,
        }
    }

    /// Creates a histogram from a byte slice in a single pass.
    #[inline]
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hist = Self::new();
        hist.extend(data);
        hist
    }

    /// Adds a byte to the histogram.
    #[inline]
    pub fn add(&mut self, byte: u8) {
        self.counts[byte as usize] += 1;
        self.total += 1;
    }

    /// Adds every byte of a slice.
    #[inline]
    pub fn extend(&mut self, data: &[u8]) {
        for &byte in data {
            self.add(byte);
        }
    }

    /// Number of occurrences recorded for `byte`.
    #[inline]
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of distinct byte values seen.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c != 0).count()
    }

    /// Calculates the normalized entropy of the current histogram.
    #[inline]
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        let total = self.total as f64;
        let ln_base = 256f64.ln();
        let mut entropy = 0.0;

        for &count in &self.counts {
            if count == 0 {
                continue;
            }
            let p = (count as f64) / total;
            entropy -= p * (p.ln() / ln_base);
        }

        // Rounding can push a uniform buffer a hair past 1.0.
        entropy.clamp(0.0, 1.0)
    }

    /// Returns the total number of bytes in the histogram.
    #[inline]
    pub fn len(&self) -> u64 {
        self.total
    }

    /// Returns true if the histogram is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}
