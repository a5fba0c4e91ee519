//! Mode estimation by mirroring the distribution about candidate points
//!
//! A candidate index `m` of the sorted distribution is tested by reflecting
//! the values below it about `a[m]` and measuring how far, in indices, the
//! reflected cumulative distribution strays from the real one above `m`. A
//! golden-section search looks for the candidate with the smallest
//! distance, and the result is accepted only when the distribution stays
//! symmetric far enough past it.

use crate::config::{ModeConfig, GOLDEN_RATIO, TWO_TAKE_GOLDEN_RATIO};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace, warn};
use unistat_core::{no_blank_sorted, Dataset, Error, Numeric, Result};
use unistat_quantile::quantile_index;

/// Largest index distance between a mirrored and the real distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MirrorDistance {
    /// Largest `|i - j|` over the sampled points
    Within(usize),
    /// The mirror ran ahead of the real distribution by more than the error
    /// budget; the mode lies at lower indices. Compares above every
    /// `Within` distance.
    Above,
}

/// Mode of a distribution with its quality measures.
///
/// All four fields are NaN when there was no usable data or the
/// symmetricity did not pass the acceptance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeResult {
    /// Value at the mode
    pub mode: f64,
    /// Quantile of the mode in the blank-free distribution
    pub quantile: f64,
    /// Symmetricity; about 1 for a symmetric mode
    pub symmetry: f64,
    /// Value where the mirrored and real distributions part
    pub sym_value: f64,
}

impl ModeResult {
    pub fn undefined() -> Self {
        Self {
            mode: f64::NAN,
            quantile: f64::NAN,
            symmetry: f64::NAN,
            sym_value: f64::NAN,
        }
    }

    pub fn is_defined(&self) -> bool {
        !self.mode.is_nan()
    }
}

impl fmt::Display for ModeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mode(value={:.6}, quantile={:.4}, symmetricity={:.4}, sym_value={:.6})",
            self.mode, self.quantile, self.symmetry, self.sym_value
        )
    }
}

/// Offset `j` past `m` of the real value nearest to `mirrored`.
///
/// Scans forward from `from`; the returned offset may be one before `from`
/// when that value is closer. Returns `len - m` when every value is below.
fn nearest_offset<T: Numeric>(sorted: &[T], m: usize, from: usize, mirrored: f64) -> usize {
    let size = sorted.len();
    let mut j = from;
    while j < size - m {
        let v = sorted[m + j].to_f64();
        if v > mirrored {
            if j > 0 && v - mirrored >= mirrored - sorted[m + j - 1].to_f64() {
                j -= 1;
            }
            return j;
        }
        j += 1;
    }
    j
}

/// Error budget in indices around mirror index `m`
#[inline]
fn error_budget(mirrordist: f64, m: usize) -> usize {
    (mirrordist * (m as f64).sqrt()) as usize
}

/// Maximum index distance between the distribution mirrored about `m` and
/// the real one.
///
/// `sorted` must be increasing and blank-free. At most `sampling_cap`
/// points past `m` are compared. An `m` outside the slice reports
/// [`MirrorDistance::Above`].
pub fn mirror_max_index_diff<T: Numeric>(
    sorted: &[T],
    m: usize,
    mirrordist: f64,
    sampling_cap: usize,
) -> MirrorDistance {
    let size = sorted.len();
    let Some(center) = sorted.get(m) else {
        return MirrorDistance::Above;
    };
    let zf = center.to_f64();
    let numcheck = size / 2;
    let interval = if numcheck > sampling_cap.max(1) {
        numcheck / sampling_cap.max(1)
    } else {
        1
    };
    let errordiff = error_budget(mirrordist, m);

    let mut maxdiff = 0usize;
    let mut prevj = 0usize;
    let mut i = 1usize;
    while i < numcheck && i <= m && m + i < size {
        let mirrored = 2.0 * zf - sorted[m - i].to_f64();
        let j = nearest_offset(sorted, m, prevj, mirrored);

        // small i > j is noise; beyond the budget the mirror is above
        if i > j + errordiff {
            return MirrorDistance::Above;
        }
        maxdiff = maxdiff.max(i.abs_diff(j));
        prevj = j;
        i += interval;
    }
    MirrorDistance::Within(maxdiff)
}

/// Bracket state of the golden-section search
struct GoldenSection<'s, T: Numeric> {
    sorted: &'s [T],
    mirrordist: f64,
    config: &'s ModeConfig,
    low: usize,
    mid: usize,
    high: usize,
    mid_diff: MirrorDistance,
}

impl<'s, T: Numeric> GoldenSection<'s, T> {
    fn new(sorted: &'s [T], mirrordist: f64, config: &'s ModeConfig) -> Result<Self> {
        let size = sorted.len();
        let low = quantile_index(size, config.low_quantile)?;
        let high = quantile_index(size, config.high_quantile)?;
        let mid = ((high as f64 + GOLDEN_RATIO * low as f64) / (1.0 + GOLDEN_RATIO)) as usize;
        let mid = mid.clamp(low, high);
        Ok(Self {
            sorted,
            mirrordist,
            config,
            low,
            mid,
            high,
            mid_diff: mirror_max_index_diff(sorted, mid, mirrordist, config.sampling_cap),
        })
    }

    fn objective(&self, m: usize) -> MirrorDistance {
        mirror_max_index_diff(self.sorted, m, self.mirrordist, self.config.sampling_cap)
    }

    /// Narrow the bracket until it is small, returning its midpoint
    fn run(mut self) -> usize {
        for step in 0..self.config.max_search_iterations {
            let upper_larger = self.high - self.mid > self.mid - self.low;
            let probe = if upper_larger {
                self.mid + (TWO_TAKE_GOLDEN_RATIO * (self.high - self.mid) as f64) as usize
            } else {
                self.mid - (TWO_TAKE_GOLDEN_RATIO * (self.mid - self.low) as f64) as usize
            };

            let width = self.high - self.low;
            if (width as f64) < self.config.tolerance * (self.mid + probe) as f64 || width <= 3 {
                return (self.high + self.low) / 2;
            }

            let probe_diff = self.objective(probe);
            trace!(
                step,
                low = self.low,
                mid = self.mid,
                high = self.high,
                mid_diff = ?self.mid_diff,
                probe,
                probe_diff = ?probe_diff,
                "golden-section step"
            );

            match probe_diff {
                // the mode is below the probe whatever the objective says
                MirrorDistance::Above if self.mid < probe => self.high = probe,
                MirrorDistance::Above => {
                    self.high = self.mid;
                    self.mid = probe;
                    self.mid_diff = probe_diff;
                }
                _ if probe_diff < self.mid_diff => {
                    if upper_larger {
                        self.low = self.mid;
                    } else {
                        self.high = self.mid;
                    }
                    self.mid = probe;
                    self.mid_diff = probe_diff;
                }
                _ if upper_larger => self.high = probe,
                _ => self.low = probe,
            }
        }

        warn!(
            cap = self.config.max_search_iterations,
            low = self.low,
            high = self.high,
            "golden-section search hit its iteration cap"
        );
        (self.high + self.low) / 2
    }
}

/// Symmetricity of the distribution about index `m`.
///
/// Walks up from `m` until the mirrored and real distributions differ by
/// more than the error budget, stopping at index `2m` or the end of the
/// data. With `b` that boundary and `a` the `low_quantile` point of the
/// `2m + 1` lowest values, returns `(value[b] - value[m]) / (value[m] -
/// value[a])` together with `value[b]`. The ratio is 0 when `value[b]`
/// equals `value[a]`.
pub fn symmetricity<T: Numeric>(
    sorted: &[T],
    m: usize,
    mirrordist: f64,
    low_quantile: f64,
) -> Result<(f64, f64)> {
    let size = sorted.len();
    if m >= size {
        return Err(Error::InvalidParameter(format!(
            "mirror index {m} is outside a distribution of {size} values"
        )));
    }
    let topi = (2 * m).min(size - 1);
    let errdiff = error_budget(mirrordist, m);
    let mf = sorted[m].to_f64();
    let ai = quantile_index(2 * m + 1, low_quantile)?.min(size - 1);
    let af = sorted[ai].to_f64();

    let mut prevj = 0usize;
    let mut boundary = topi;
    for i in 1..topi - m {
        let mirrored = 2.0 * mf - sorted[m - i].to_f64();
        let j = nearest_offset(sorted, m, prevj, mirrored);
        if i > j + errdiff || j > i + errdiff {
            boundary = m + i;
            break;
        }
        prevj = j;
    }

    let bf = sorted[boundary].to_f64();
    let ratio = if bf == af { 0.0 } else { (bf - mf) / (mf - af) };
    Ok((ratio, bf))
}

/// Mode of the non-blank values with the default [`ModeConfig`].
///
/// `mirrordist` is the error budget as a multiple of the Poisson error of
/// the mirror index; 1.5 to 3 are typical.
///
/// # Example
///
/// ```rust
/// use unistat_core::DataBuffer;
/// use unistat_modality::mode;
///
/// let data = DataBuffer::new(vec![f64::NAN; 4]);
/// assert!(!mode(&data, 1.5).unwrap().is_defined());
/// ```
pub fn mode<'a, T: Numeric>(
    input: impl Into<Dataset<'a, T>>,
    mirrordist: f64,
) -> Result<ModeResult> {
    mode_with_config(input, mirrordist, &ModeConfig::default())
}

/// Mode of the non-blank values.
///
/// An entirely blank input and a mode failing the symmetricity threshold
/// both give [`ModeResult::undefined`].
pub fn mode_with_config<'a, T: Numeric>(
    input: impl Into<Dataset<'a, T>>,
    mirrordist: f64,
    config: &ModeConfig,
) -> Result<ModeResult> {
    if mirrordist.is_nan() || mirrordist <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "mirror distance {mirrordist} must be positive"
        )));
    }
    config.validate()?;

    let sorted = no_blank_sorted(input);
    let a = sorted.as_slice();
    if a.is_empty() {
        debug!("no usable values, mode undefined");
        return Ok(ModeResult::undefined());
    }

    let index = GoldenSection::new(a, mirrordist, config)?.run();
    let (symmetry, sym_value) = symmetricity(a, index, mirrordist, config.sym_low_quantile)?;

    let result = if symmetry > config.good_symmetricity {
        ModeResult {
            mode: a[index].to_f64(),
            quantile: index as f64 / (a.len() - 1) as f64,
            symmetry,
            sym_value,
        }
    } else {
        ModeResult::undefined()
    };
    debug!(
        index,
        size = a.len(),
        symmetry,
        accepted = result.is_defined(),
        "mode search finished"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use unistat_core::DataBuffer;

    fn logistic_quantiles(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let p = (i as f64 + 0.5) / n as f64;
                (p / (1.0 - p)).ln()
            })
            .collect()
    }

    #[test]
    fn test_mirror_of_symmetric_data_is_exact() {
        let data: Vec<f64> = (-5..=5).map(f64::from).collect();
        assert_eq!(mirror_max_index_diff(&data, 5, 1.5, 1000), MirrorDistance::Within(0));
    }

    #[test]
    fn test_mirror_above_on_convex_tail() {
        // squares spread out above any candidate
        let data: Vec<f64> = (0..=100).map(|k| f64::from(k * k)).collect();
        assert_eq!(mirror_max_index_diff(&data, 50, 1.5, 1000), MirrorDistance::Above);
        assert_eq!(mirror_max_index_diff(&data, 10, 1.5, 1000), MirrorDistance::Above);
    }

    #[test]
    fn test_mirror_within_on_concave_tail() {
        let data: Vec<f64> = (0..=100).map(|k| 10.0 * f64::from(k).sqrt()).collect();
        match mirror_max_index_diff(&data, 50, 1.5, 1000) {
            MirrorDistance::Within(d) => assert!(d > 0),
            MirrorDistance::Above => panic!("mirror should stay within the data"),
        }
    }

    #[test]
    fn test_mirror_index_outside_data() {
        let data = [1u8, 2, 3];
        assert_eq!(mirror_max_index_diff(&data, 3, 1.5, 1000), MirrorDistance::Above);
    }

    #[test]
    fn test_above_orders_after_any_distance() {
        assert!(MirrorDistance::Within(usize::MAX - 1) < MirrorDistance::Above);
        assert!(MirrorDistance::Within(2) < MirrorDistance::Within(3));
    }

    #[test]
    fn test_symmetricity_of_symmetric_data() {
        let data: Vec<i32> = (-5..=5).collect();
        let (ratio, value) = symmetricity(&data, 5, 1.5, 0.01).unwrap();
        assert_relative_eq!(ratio, 1.0);
        assert_eq!(value, 5.0);
    }

    #[test]
    fn test_symmetricity_rejects_bad_index() {
        assert!(matches!(
            symmetricity(&[1.0, 2.0], 2, 1.5, 0.01),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_mode_of_logistic_quantiles() {
        let data = DataBuffer::new(logistic_quantiles(501));
        let result = mode(&data, 1.5).unwrap();
        assert!(result.is_defined());
        assert!(result.mode.abs() < 0.1, "{result}");
        assert!((result.quantile - 0.5).abs() < 0.02, "{result}");
        assert!(result.symmetry > 1.0, "{result}");
    }

    #[test]
    fn test_mode_of_triangle_integers() {
        let mut values = Vec::new();
        for k in -20i32..=20 {
            let copies = 21 - k.unsigned_abs() as usize;
            values.extend(std::iter::repeat((100 + k) as u16).take(copies));
        }
        let as_float: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();

        let int_result = mode(&DataBuffer::new(values), 1.5).unwrap();
        let float_result = mode(&DataBuffer::new(as_float), 1.5).unwrap();
        assert_eq!(int_result.mode, 100.0);
        assert_eq!(int_result, float_result);
    }

    #[test]
    fn test_all_blank_mode_is_undefined() {
        let data = DataBuffer::new(vec![u8::MAX; 8]);
        let result = mode(&data, 1.5).unwrap();
        assert!(result.mode.is_nan());
        assert!(result.quantile.is_nan());
        assert!(result.symmetry.is_nan());
        assert!(result.sym_value.is_nan());
    }

    #[test]
    fn test_single_value_fails_symmetricity() {
        let data = DataBuffer::new(vec![3.0f32]);
        assert!(!mode(&data, 1.5).unwrap().is_defined());
    }

    #[test]
    fn test_non_positive_mirror_distance_rejected() {
        let data = DataBuffer::new(vec![1.0, 2.0, 3.0]);
        for bad in [0.0, -1.0, f64::NAN] {
            assert!(matches!(mode(&data, bad), Err(Error::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_strict_threshold_rejects_mode() {
        let data = DataBuffer::new(logistic_quantiles(501));
        let config = ModeConfig::default().with_good_symmetricity(10.0);
        assert!(!mode_with_config(&data, 1.5, &config).unwrap().is_defined());
    }

    #[test]
    fn test_in_place_mode_sorts_caller_buffer() {
        let mut data = DataBuffer::new(vec![3.0, f64::NAN, 1.0, 2.0]);
        let _ = mode(&mut data, 1.5).unwrap();
        assert_eq!(data.as_slice(), &[1.0, 2.0, 3.0]);
    }
}
