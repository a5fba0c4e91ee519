//! Tuning constants of the mode estimator

use serde::{Deserialize, Serialize};
use unistat_core::{Error, Result};

/// The golden ratio, (1 + sqrt(5)) / 2
pub const GOLDEN_RATIO: f64 = 1.618034;

/// 2 minus the golden ratio: where a probe is placed inside the larger
/// sub-interval
pub const TWO_TAKE_GOLDEN_RATIO: f64 = 0.38197;

/// Configuration for [`mode_with_config`](crate::mode_with_config)
///
/// The defaults are empirical and match long-standing astronomical usage.
/// They are exposed so callers can test and tune them, not because other
/// values are known to be better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    /// Quantile of the lower end of the initial search interval
    pub low_quantile: f64,
    /// Quantile of the upper end of the initial search interval
    pub high_quantile: f64,
    /// Relative interval width at which the search stops
    pub tolerance: f64,
    /// Symmetricity at or below which the mode is rejected
    pub good_symmetricity: f64,
    /// Quantile (of the `2m + 1` lowest values) used as the lower
    /// reference point of the symmetricity ratio
    pub sym_low_quantile: f64,
    /// Maximum number of points compared per mirror evaluation
    pub sampling_cap: usize,
    /// Hard cap on golden-section steps
    pub max_search_iterations: usize,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            low_quantile: 0.01,
            high_quantile: 0.55,
            tolerance: 0.01,
            good_symmetricity: 0.2,
            sym_low_quantile: 0.01,
            sampling_cap: 1000,
            max_search_iterations: 200,
        }
    }
}

impl ModeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantiles bracketing the initial search interval
    pub fn with_search_quantiles(mut self, low: f64, high: f64) -> Self {
        self.low_quantile = low;
        self.high_quantile = high;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the symmetricity acceptance threshold
    pub fn with_good_symmetricity(mut self, threshold: f64) -> Self {
        self.good_symmetricity = threshold;
        self
    }

    pub fn with_sampling_cap(mut self, cap: usize) -> Self {
        self.sampling_cap = cap;
        self
    }

    /// Check the configuration before a search
    pub fn validate(&self) -> Result<()> {
        Error::check_quantile(self.low_quantile)?;
        Error::check_quantile(self.high_quantile)?;
        Error::check_quantile(self.sym_low_quantile)?;
        if self.low_quantile > self.high_quantile {
            return Err(Error::InvalidParameter(format!(
                "search interval [{}, {}] is inverted",
                self.low_quantile, self.high_quantile
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "mode tolerance {} must be positive",
                self.tolerance
            )));
        }
        if self.good_symmetricity.is_nan() {
            return Err(Error::InvalidParameter(
                "symmetricity threshold cannot be NaN".to_string(),
            ));
        }
        if self.sampling_cap == 0 || self.max_search_iterations == 0 {
            return Err(Error::InvalidParameter(
                "sampling cap and search iteration cap must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
