//! Blank-aware univariate statistics over typed numeric buffers
//!
//! `unistat` summarises one-dimensional columns of any of ten primitive
//! element types while ignoring blank values (NaN for floats, a reserved
//! sentinel for integers). It re-exports the member crates and adds a
//! runtime dispatch layer for callers that only know a column's type at
//! runtime.
//!
//! # Crates
//!
//! - [`core`](unistat_core): buffers, tiles, the blank convention and the
//!   blank-removing sorter every order statistic starts from
//! - [`quantile`]: extrema, median, quantiles and the quantile function
//! - [`spread`]: count, sum, mean, standard deviation and sigma clipping
//! - [`histogram`]: regular bins, histograms and cumulative frequency plots
//! - [`modality`]: the mirror-based mode estimator
//!
//! # Example
//!
//! ```rust
//! use unistat::{evaluate, AnyBuffer, ElementType, Statistic, StatsConfig};
//!
//! // a float32 column as it arrives from storage: 1, NaN, 3, 2
//! let bytes: Vec<u8> = [1.0f32, f32::NAN, 3.0, 2.0]
//!     .iter()
//!     .flat_map(|v| v.to_ne_bytes())
//!     .collect();
//! let column = AnyBuffer::from_bytes(ElementType::F32, &bytes, true).unwrap();
//!
//! let config = StatsConfig::default();
//! let median: Statistic = "median".parse().unwrap();
//! assert_eq!(evaluate(&column, median, &config).unwrap(), 2.0);
//! assert_eq!(evaluate(&column, Statistic::Number, &config).unwrap(), 3.0);
//! ```

pub mod config;
pub mod dispatch;

pub use unistat_histogram as histogram;
pub use unistat_modality as modality;
pub use unistat_quantile as quantile;
pub use unistat_spread as spread;

pub use config::{StatsConfig, DEFAULT_MIRROR_DISTANCE, DEFAULT_NUMBINS};
pub use dispatch::{evaluate, evaluate_all, Statistic};
pub use unistat_core::{
    dispatch_buffer, is_sorted, no_blank_monotonic, no_blank_sorted, sort_decreasing,
    sort_increasing, AnyBuffer, AnyValue, DataBuffer, Dataset, ElementType, Error, Normalized,
    Numeric, Result, SortStatus, TileView,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        evaluate, AnyBuffer, AnyValue, DataBuffer, Dataset, ElementType, Error, Numeric, Result,
        Statistic, StatsConfig, TileView,
    };

    pub use unistat_histogram::{cfp, histogram, regular_bins, RangeSpec};
    pub use unistat_modality::{mode, ModeConfig};
    pub use unistat_quantile::{maximum, median, minimum, quantile, quantile_function};
    pub use unistat_spread::{count, mean, sigma_clip, SigmaClipConfig};
}
