//! Regular binning, histograms and cumulative frequency plots
//!
//! This crate provides 1-D histogram functionality over blank-aware typed
//! buffers. Bins are always equal width; the histogram and CFP refuse any
//! other kind.
//!
//! # Key Features
//!
//! - **Regular bins**: full data range, explicit range, or a mix where one
//!   bound comes from the data
//! - **Alignment**: shift the bins so one lower edge sits exactly on a
//!   reference value
//! - **Scaling**: raw counts, fractions of the total, or fractions of the peak
//! - **CFP reuse**: a previously built histogram can seed the cumulative plot
//!
//! # Examples
//!
//! ```rust
//! use unistat_core::DataBuffer;
//! use unistat_histogram::{cfp, histogram, regular_bins, RangeSpec};
//!
//! let data = DataBuffer::new(vec![1.0, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
//! let bins = regular_bins(&data, RangeSpec::Full, 4, f64::NAN).unwrap();
//!
//! let hist = histogram(&data, &bins, false, false).unwrap();
//! assert_eq!(hist.counts().unwrap().iter().sum::<u64>(), 10);
//!
//! let plot = cfp(&data, &bins, Some(&hist), true).unwrap();
//! assert_eq!(plot.last(), Some(1.0));
//! ```

pub mod builders;
pub mod ops;
pub mod types;

// Re-export main types
pub use builders::{regular_bins, RangeSpec, RegularBinBuilder, RANGE_EPSILON};
pub use ops::{cfp, histogram};
pub use types::{BinSet, Cfp, Frequencies, Histogram, HistogramScale};

// Re-export from unistat-core
pub use unistat_core::{Error, Result};
