//! Mirror distributions and the plots used to inspect a mode candidate

use tracing::trace;
use unistat_core::{no_blank_sorted, DataBuffer, Dataset, Error, Numeric, Result, SortStatus};
use unistat_histogram::{cfp, histogram, regular_bins, BinSet, Cfp, Histogram, RangeSpec};
use unistat_quantile::quantile_function_index;

/// Reflect the values up to `index` about `sorted[index]`.
///
/// `sorted` must be increasing and blank-free. The result has `2 * index +
/// 1` values: `sorted[0..=index]` followed by `2 * sorted[index] -
/// sorted[index - i]` for `i` in `1..=index`. Values are computed in `f64`
/// so unsigned data can mirror below zero.
pub fn make_mirror<T: Numeric>(sorted: &[T], index: usize) -> Result<DataBuffer<f64>> {
    let Some(center) = sorted.get(index) else {
        return Err(Error::InvalidParameter(format!(
            "mirror index {index} must be less than the number of values ({})",
            sorted.len()
        )));
    };
    let zf = center.to_f64();

    let mut mirror = Vec::with_capacity(2 * index + 1);
    mirror.extend(sorted[..=index].iter().map(|v| v.to_f64()));
    mirror.extend((1..=index).map(|i| 2.0 * zf - sorted[index - i].to_f64()));

    Ok(DataBuffer::new(mirror)
        .with_blank_flag(false)
        .with_sort_status(SortStatus::Increasing))
}

/// Mirror distribution about a value, binned for plotting
#[derive(Debug, Clone)]
pub struct MirrorPlots {
    /// Data value nearest the requested mirror point
    pub mirror_value: f64,
    /// Regular bins with one lower edge on `mirror_value`
    pub bins: BinSet,
    /// Histogram of the mirror, peak scaled to one
    pub histogram: Histogram,
    /// Normalized cumulative frequency plot of the mirror
    pub cfp: Cfp,
}

/// Histogram and CFP of the distribution mirrored about `value`.
///
/// `value` is located with
/// [`quantile_function_index`](unistat_quantile::quantile_function_index).
/// Returns `None` when it falls at or below the minimum or above the
/// maximum, leaving nothing to mirror.
pub fn mode_mirror_plots<'a, T: Numeric>(
    input: impl Into<Dataset<'a, T>>,
    value: T,
    numbins: usize,
) -> Result<Option<MirrorPlots>> {
    let sorted = no_blank_sorted(input);
    let index = match quantile_function_index(&*sorted, value)? {
        Some(i) if i > 0 => i,
        other => {
            trace!(%value, index = ?other, "mirror point outside the distribution");
            return Ok(None);
        }
    };

    let mirror = make_mirror(sorted.as_slice(), index)?;
    let mirror_value = sorted.as_slice()[index].to_f64();

    let bins = regular_bins(&mirror, RangeSpec::Full, numbins, mirror_value)?;
    let hist = histogram(&mirror, &bins, false, true)?;
    let cumulative = cfp(&mirror, &bins, None, true)?;

    Ok(Some(MirrorPlots {
        mirror_value,
        bins,
        histogram: hist,
        cfp: cumulative,
    }))
}
