//! Core types for blank-aware univariate statistics
//!
//! This crate provides the data model every statistic in the workspace is
//! written against.
//!
//! # Overview
//!
//! 1. **Elements** - [`Numeric`] covers the ten supported primitive types and
//!    gives each a blank marker (NaN for floats, a reserved sentinel for
//!    integers)
//! 2. **Buffers** - [`DataBuffer`] owns typed data with its blank flag and a
//!    cached sort status; [`TileView`] is a read-only strided window
//! 3. **Runtime tags** - [`AnyBuffer`] and [`AnyValue`] carry an
//!    [`ElementType`] for callers that only know the type at runtime
//! 4. **Normalizer** - [`no_blank_sorted`] yields the blank-free increasing
//!    view that order statistics consume
//!
//! # Example
//!
//! ```rust
//! use unistat_core::{no_blank_sorted, DataBuffer};
//!
//! let data = DataBuffer::new(vec![4.0, f64::NAN, 1.0, 3.0]);
//! let sorted = no_blank_sorted(&data);
//! assert_eq!(sorted.as_slice(), &[1.0, 3.0, 4.0]);
//! ```

pub mod any;
pub mod buffer;
pub mod error;
pub mod normalize;
pub mod numeric;
pub mod tiled;

pub use any::{AnyBuffer, AnyValue, BufferVariant};
pub use buffer::{DataBuffer, ElementType, SortStatus};
pub use error::{Error, Result};
pub use normalize::{
    is_sorted, no_blank_monotonic, no_blank_sorted, sort_decreasing, sort_increasing, Normalized,
};
pub use numeric::Numeric;
pub use tiled::{Dataset, TileValues, TileView};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnyBuffer, AnyValue, DataBuffer, Dataset, ElementType, Numeric, Result, SortStatus,
        TileView,
    };

    pub use crate::error::Error;
    pub use crate::normalize::no_blank_sorted;
}
