//! Mode estimation by mirror-distribution comparison
//!
//! Finding the mode of a sampled distribution from a histogram depends on
//! the bin width. This crate avoids binning: it compares the cumulative
//! distribution above a candidate point with the lower part mirrored about
//! that point, and searches for the candidate where they agree best.
//!
//! # Algorithm Overview
//!
//! 1. Remove blanks and sort the input
//! 2. For a candidate index `m`, mirror the values below `m` about `a[m]`
//!    and record the largest index distance to the real values above it
//!    ([`mirror_max_index_diff`])
//! 3. Minimise that distance with a golden-section search over a quantile
//!    interval, steering down whenever the mirror runs ahead of the data
//! 4. Measure how far past the mode the two stay together
//!    ([`symmetricity`]) and reject poorly symmetric modes
//!
//! The search works on indices, so the result does not depend on any bin
//! width, and integer types mirror in `f64` without wrapping.
//!
//! # Example
//!
//! ```rust
//! use unistat_core::DataBuffer;
//! use unistat_modality::mode;
//!
//! // logistic quantiles: symmetric about zero
//! let n = 501;
//! let data: Vec<f64> = (0..n)
//!     .map(|i| {
//!         let p = (i as f64 + 0.5) / n as f64;
//!         (p / (1.0 - p)).ln()
//!     })
//!     .collect();
//!
//! let result = mode(&DataBuffer::new(data), 1.5).unwrap();
//! assert!(result.is_defined());
//! assert!(result.mode.abs() < 0.1);
//! ```

pub mod config;
pub mod detector;
pub mod mirror;

pub use config::{ModeConfig, GOLDEN_RATIO, TWO_TAKE_GOLDEN_RATIO};
pub use detector::{
    mirror_max_index_diff, mode, mode_with_config, symmetricity, MirrorDistance, ModeResult,
};
pub use mirror::{make_mirror, mode_mirror_plots, MirrorPlots};

// Re-export from unistat-core
pub use unistat_core::{Error, Result};
