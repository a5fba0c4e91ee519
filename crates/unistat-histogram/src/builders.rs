//! Regular bin construction

use crate::types::BinSet;
use serde::{Deserialize, Serialize};
use tracing::trace;
use unistat_core::{Dataset, Error, Numeric, Result};

/// Added to a data-derived maximum so the largest value lands inside the
/// last bin
pub const RANGE_EPSILON: f64 = 1e-6;

/// Where the bins should span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum RangeSpec {
    /// Data minimum to data maximum
    #[default]
    Full,
    /// Explicit bounds; an unset bound is taken from the data
    Explicit { min: Option<f64>, max: Option<f64> },
    /// Bounds at a quantile distance from each end (not implemented)
    Quantile(f64),
}

/// Fixed-count, equal-width bin builder
///
/// Optionally shifts the bins so one lower edge falls exactly on a
/// reference value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegularBinBuilder {
    range: RangeSpec,
    numbins: usize,
    align_to: Option<f64>,
}

impl RegularBinBuilder {
    /// Create a new builder covering the full data range
    pub fn new(numbins: usize) -> Self {
        Self {
            range: RangeSpec::Full,
            numbins,
            align_to: None,
        }
    }

    pub fn with_range(mut self, range: RangeSpec) -> Self {
        self.range = range;
        self
    }

    /// Align one bin's lower edge to `value`; NaN disables alignment
    pub fn align_to(mut self, value: f64) -> Self {
        self.align_to = if value.is_nan() { None } else { Some(value) };
        self
    }

    pub fn numbins(&self) -> usize {
        self.numbins
    }

    /// Build the bins for `input`
    pub fn build<'a, T: Numeric>(&self, input: impl Into<Dataset<'a, T>>) -> Result<BinSet> {
        if self.numbins == 0 {
            return Err(Error::InvalidParameter(
                "numbins cannot be zero".to_string(),
            ));
        }

        let (min, max) = self.resolve_range(input.into())?;
        if !(min.is_finite() && max.is_finite() && max > min) {
            return Err(Error::InvalidParameter(format!(
                "bin range [{min}, {max}] is empty or not finite"
            )));
        }

        let width = (max - min) / self.numbins as f64;
        let mut bins = BinSet::regular(min, width, self.numbins);

        if let Some(align) = self.align_to {
            if let Some(offset) = alignment_offset(&bins, align) {
                trace!(align, offset, "shifting bins onto alignment value");
                bins.shift(offset);
            }
        }
        Ok(bins)
    }

    fn resolve_range<T: Numeric>(&self, input: Dataset<'_, T>) -> Result<(f64, f64)> {
        let (want_min, want_max) = match self.range {
            RangeSpec::Full => (None, None),
            RangeSpec::Explicit { min, max } => {
                (min.filter(|v| !v.is_nan()), max.filter(|v| !v.is_nan()))
            }
            RangeSpec::Quantile(q) => {
                return Err(Error::InvalidParameter(format!(
                    "quantile-derived bin ranges are not implemented (requested {q})"
                )))
            }
        };

        if let (Some(min), Some(max)) = (want_min, want_max) {
            return Ok((min, max));
        }

        let (data_min, data_max) =
            extent(&input).ok_or_else(|| Error::empty_input("regular bins"))?;
        Ok((
            want_min.unwrap_or(data_min),
            want_max.unwrap_or(data_max + RANGE_EPSILON),
        ))
    }
}

/// Smallest and largest non-blank values, widened to f64
fn extent<T: Numeric>(input: &Dataset<'_, T>) -> Option<(f64, f64)> {
    input.values().fold(None, |acc, v| {
        let x = v.to_f64();
        match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        }
    })
}

/// Offset that moves the lower edge of the bin straddling `align` onto it.
///
/// `None` when `align` is outside the bins or already on an edge.
fn alignment_offset(bins: &BinSet, align: f64) -> Option<f64> {
    (0..bins.len().saturating_sub(1))
        .find(|&i| bins.lower_edge(i) < align && bins.lower_edge(i + 1) > align)
        .map(|i| align - bins.lower_edge(i))
}

/// Equal-width bins over `range`, optionally aligned so one lower edge
/// equals `align_to` (pass NaN for no alignment).
pub fn regular_bins<'a, T: Numeric>(
    input: impl Into<Dataset<'a, T>>,
    range: RangeSpec,
    numbins: usize,
    align_to: f64,
) -> Result<BinSet> {
    RegularBinBuilder::new(numbins)
        .with_range(range)
        .align_to(align_to)
        .build(input)
}
