//! Moment statistics: count, sum, mean and standard deviation
//!
//! All reductions skip blanks and accumulate in f64 whatever the input type.
//! None of them reorder or copy the input.

use serde::{Deserialize, Serialize};
use unistat_core::{Dataset, Numeric};

/// Mean and population standard deviation from one pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanStd {
    pub mean: f64,
    pub std: f64,
}

/// Running count, sum and sum of squares
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Accumulator {
    n: u64,
    s: f64,
    s2: f64,
}

impl Accumulator {
    pub(crate) fn from_values<T: Numeric>(values: impl Iterator<Item = T>) -> Self {
        values.fold(Self::default(), |mut acc, v| {
            let x = v.to_f64();
            acc.n += 1;
            acc.s += x;
            acc.s2 += x * x;
            acc
        })
    }

    fn sum(&self) -> f64 {
        if self.n == 0 {
            f64::NAN
        } else {
            self.s
        }
    }

    fn mean(&self) -> f64 {
        if self.n == 0 {
            f64::NAN
        } else {
            self.s / self.n as f64
        }
    }

    fn std(&self) -> f64 {
        if self.n == 0 {
            return f64::NAN;
        }
        let n = self.n as f64;
        // rounding can push a zero variance slightly negative
        ((self.s2 - self.s * self.s / n) / n).max(0.0).sqrt()
    }

    pub(crate) fn mean_std(&self) -> MeanStd {
        MeanStd {
            mean: self.mean(),
            std: self.std(),
        }
    }
}

/// Number of non-blank elements
pub fn count<'a, T: Numeric>(input: impl Into<Dataset<'a, T>>) -> u64 {
    let input = input.into();
    input.values().count() as u64
}

/// Sum of the non-blank elements; NaN when there are none
pub fn sum<'a, T: Numeric>(input: impl Into<Dataset<'a, T>>) -> f64 {
    let input = input.into();
    Accumulator::from_values(input.values()).sum()
}

/// Arithmetic mean; NaN when there are no usable elements
pub fn mean<'a, T: Numeric>(input: impl Into<Dataset<'a, T>>) -> f64 {
    let input = input.into();
    Accumulator::from_values(input.values()).mean()
}

/// Population standard deviation, `sqrt((Σx² − (Σx)²/n) / n)`.
///
/// NaN when there are no usable elements.
pub fn std<'a, T: Numeric>(input: impl Into<Dataset<'a, T>>) -> f64 {
    let input = input.into();
    Accumulator::from_values(input.values()).std()
}

/// Mean and standard deviation sharing one pass
pub fn mean_std<'a, T: Numeric>(input: impl Into<Dataset<'a, T>>) -> MeanStd {
    let input = input.into();
    Accumulator::from_values(input.values()).mean_std()
}
