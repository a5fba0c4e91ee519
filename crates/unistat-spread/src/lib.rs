//! Moment statistics and sigma clipping for blank-aware distributions
//!
//! This crate provides the spread side of the toolkit:
//! - Count, sum, mean and population standard deviation
//! - Iterative sigma clipping with either a fixed number of rounds or a
//!   tolerance on the falling standard deviation
//!
//! # Overview
//!
//! Moments are single-pass reductions that never copy or reorder their
//! input. Sigma clipping works on a blank-free monotonic view of the data,
//! so a window of retained values is always a contiguous range.
//!
//! # Examples
//!
//! ```rust
//! use unistat_core::DataBuffer;
//! use unistat_spread::{mean_std, sigma_clip, SigmaClipConfig};
//!
//! let sample = DataBuffer::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0]);
//!
//! let raw = mean_std(&sample);
//! assert!(raw.mean > 14.0);
//!
//! let clipped = sigma_clip(&sample, &SigmaClipConfig::new(3.0, 3.0)).unwrap();
//! assert_eq!(clipped.number, 9.0);
//! assert_eq!(clipped.mean, 5.0);
//! ```

pub mod moments;
pub mod sigma_clip;

pub use moments::{count, mean, mean_std, std, sum, MeanStd};
pub use sigma_clip::{sigma_clip, ClipMode, SigmaClipConfig, SigmaClipResult, SIG_CLIP_MAX_CONVERGE};

// Re-export from unistat-core
pub use unistat_core::{Error, Result};
