//! Entropy measurement.
//!
//! This module provides the entropy primitives the triage pipeline is built on:
//!
//! - Normalized (base-256) Shannon entropy over a whole buffer
//! - Fixed-window block profiles for visualization
//! - Statistical summaries of block profiles
//!
//! # Example
//!
//! ```
//! use entroscan::entropy::{block_entropy, shannon_entropy};
//!
//! let data: Vec<u8> = (0..=255).collect();
//! assert!((shannon_entropy(&data) - 1.0).abs() < 1e-9);
//!
//! let profile = block_entropy(&data, 64).unwrap();
//! assert_eq!(profile.len(), 4);
//! ```

pub mod core;
pub mod stats;
pub mod window;

pub use self::core::{shannon_entropy, to_bits, Histogram, MAX_BITS};
pub use self::stats::{calculate_median, Stats};
pub use self::window::{block_entropy, BlockEntropyProfile, DEFAULT_WINDOW_SIZE};
