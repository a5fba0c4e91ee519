//! Blank-aware order statistics
//!
//! This crate provides the order-based summaries of a distribution. All of
//! them skip blank values and accept any [`Dataset`](unistat_core::Dataset)
//! form: a borrowed buffer, a buffer the caller allows to be sorted in place,
//! or a read-only tile.
//!
//! # Features
//!
//! - **Extrema**: [`minimum`] and [`maximum`] in one pass, without copying
//! - **Median**: type-preserving, overflow-free averaging for even counts
//! - **Quantiles**: [`quantile`] by fraction and its inverse,
//!   [`quantile_function`], by nearest-value search
//!
//! # Example
//!
//! ```rust
//! use unistat_core::DataBuffer;
//! use unistat_quantile::{median, quantile, quantile_function};
//!
//! let data = DataBuffer::new(vec![7.0, 1.0, f64::NAN, 3.0, 5.0, 9.0]);
//! assert_eq!(median(&data).unwrap(), 5.0);
//! assert_eq!(quantile(&data, 0.0).unwrap(), 1.0);
//! assert_eq!(quantile_function(&data, 9.0).unwrap(), 1.0);
//! ```

pub mod extrema;
pub mod order;

pub use extrema::{maximum, minimum};
pub use order::{median, quantile, quantile_function, quantile_function_index, quantile_index};

// Re-export from unistat-core
pub use unistat_core::{Error, Result};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        maximum, median, minimum, quantile, quantile_function, quantile_function_index,
        quantile_index, Error, Result,
    };
}
