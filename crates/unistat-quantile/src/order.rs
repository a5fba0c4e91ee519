//! Median and quantiles over the normalized distribution
//!
//! Every function here normalizes its input first, so passing a
//! [`Dataset::InPlace`] buffer leaves it compacted and sorted.

use tracing::trace;
use unistat_core::{no_blank_sorted, Dataset, Error, Numeric, Result};

/// Median of the non-blank values.
///
/// For an even count the two central values are averaged in the input's
/// own arithmetic, so integral types truncate toward zero.
pub fn median<'a, T: Numeric>(input: impl Into<Dataset<'a, T>>) -> Result<T> {
    let sorted = no_blank_sorted(input);
    let a = sorted.as_slice();
    let n = a.len();
    match n {
        0 => Err(Error::empty_input("median")),
        _ if n % 2 == 1 => Ok(a[n / 2]),
        _ => Ok(a[n / 2 - 1].midpoint(a[n / 2])),
    }
}

/// Index of quantile `q` in a sorted array of `size` elements.
///
/// `(size - 1) * q` is rounded down unless its fractional part is strictly
/// greater than one half.
pub fn quantile_index(size: usize, q: f64) -> Result<usize> {
    Error::check_quantile(q)?;
    if size == 0 {
        return Err(Error::empty_input("quantile index"));
    }
    let pos = (size - 1) as f64 * q;
    let floor = pos.floor();
    let idx = if pos - floor > 0.5 { floor + 1.0 } else { floor };
    Ok(idx as usize)
}

/// Value at quantile `q` of the non-blank values
pub fn quantile<'a, T: Numeric>(input: impl Into<Dataset<'a, T>>, q: f64) -> Result<T> {
    Error::check_quantile(q)?;
    let sorted = no_blank_sorted(input);
    let idx = quantile_index(sorted.len(), q).map_err(|_| Error::empty_input("quantile"))?;
    Ok(sorted.as_slice()[idx])
}

/// Index of the element nearest to `value` in the normalized distribution.
///
/// Values below the minimum map to index 0 and a value equal to the maximum
/// maps to the last index. `None` means `value` lies above the maximum.
/// When `value` sits exactly halfway between two elements the upper one wins.
pub fn quantile_function_index<'a, T: Numeric>(
    input: impl Into<Dataset<'a, T>>,
    value: T,
) -> Result<Option<usize>> {
    if value.is_blank() && T::IS_FLOAT {
        return Err(Error::InvalidParameter(
            "quantile function value cannot be NaN".to_string(),
        ));
    }
    let sorted = no_blank_sorted(input);
    let a = sorted.as_slice();
    if a.is_empty() {
        return Err(Error::empty_input("quantile function"));
    }
    Ok(nearest_index(a, value))
}

/// Position of `value` in the normalized distribution as a fraction of
/// `size - 1`; NaN when `value` lies above the maximum.
pub fn quantile_function<'a, T: Numeric>(
    input: impl Into<Dataset<'a, T>>,
    value: T,
) -> Result<f64> {
    let sorted = no_blank_sorted(input);
    let size = sorted.len();
    let index = quantile_function_index(&*sorted, value)?;
    Ok(match index {
        None => f64::NAN,
        Some(_) if size == 1 => 0.0,
        Some(i) => i as f64 / (size - 1) as f64,
    })
}

/// Nearest-value scan over an increasing, blank-free slice
pub(crate) fn nearest_index<T: Numeric>(a: &[T], value: T) -> Option<usize> {
    let last = a.len().checked_sub(1)?;
    if value > a[last] {
        trace!(%value, "value above the distribution");
        return None;
    }
    let v = value.to_f64();
    for i in 1..a.len() {
        if a[i] > value {
            let below = v - a[i - 1].to_f64();
            let above = a[i].to_f64() - v;
            return Some(if below < above { i - 1 } else { i });
        }
    }
    Some(last)
}
