//! Counting values into regular bins

use crate::types::{BinSet, Cfp, Frequencies, Histogram, HistogramScale};
use unistat_core::{Dataset, Error, Numeric, Result};

/// Largest deviation from one at which a normalized histogram is reused
const NORMALIZED_TOLERANCE: f64 = 1e-5;

fn require_regular(bins: &BinSet) -> Result<(f64, f64)> {
    if !bins.is_regular() {
        return Err(Error::InvalidParameter(
            "histograms are only implemented for regular bins".to_string(),
        ));
    }
    bins.range()
        .ok_or_else(|| Error::InvalidParameter("bin set is empty".to_string()))
}

fn raw_counts<T: Numeric>(input: &Dataset<'_, T>, bins: &BinSet) -> Result<Vec<u64>> {
    let (min, max) = require_regular(bins)?;
    let width = bins.width();
    let last = bins.len() - 1;
    let mut counts = vec![0u64; bins.len()];
    for v in input.values() {
        let x = v.to_f64();
        if x >= min && x < max {
            // rounding can put a value just below `max` one bin too far
            let idx = (((x - min) / width) as usize).min(last);
            counts[idx] += 1;
        }
    }
    Ok(counts)
}

/// Count the non-blank values of `input` falling in `[min, max)` of each bin.
///
/// `normalize` divides by the total so the bins sum to one; `max_one`
/// divides by the fullest bin so the peak is one. They cannot be combined.
pub fn histogram<'a, T: Numeric>(
    input: impl Into<Dataset<'a, T>>,
    bins: &BinSet,
    normalize: bool,
    max_one: bool,
) -> Result<Histogram> {
    if normalize && max_one {
        return Err(Error::InvalidParameter(
            "only one of normalize and max_one may be requested".to_string(),
        ));
    }
    let counts = raw_counts(&input.into(), bins)?;

    let reference = if normalize {
        Some(counts.iter().sum::<u64>() as f32)
    } else if max_one {
        Some(counts.iter().copied().max().unwrap_or(0) as f32)
    } else {
        None
    };

    Ok(match reference {
        None => Histogram::new(Frequencies::Counts(counts), HistogramScale::Raw),
        Some(r) => {
            let scale = if normalize {
                HistogramScale::Normalized
            } else {
                HistogramScale::MaxOne
            };
            let fractions = counts.iter().map(|&c| c as f32 / r).collect();
            Histogram::new(Frequencies::Fractions(fractions), scale)
        }
    })
}

/// Cumulative frequency plot of `input` over `bins`.
///
/// A `previous` histogram is reused when it holds raw counts or is
/// normalized and sums to one; otherwise the counts are recomputed.
/// A CFP built on a normalized histogram is normalized whatever the
/// `normalize` flag says. Otherwise `normalize` divides each running sum by
/// the histogram total.
pub fn cfp<'a, T: Numeric>(
    input: impl Into<Dataset<'a, T>>,
    bins: &BinSet,
    previous: Option<&Histogram>,
    normalize: bool,
) -> Result<Cfp> {
    require_regular(bins)?;

    let reusable = previous.filter(|h| {
        h.len() == bins.len()
            && match h.scale() {
                HistogramScale::Raw => true,
                HistogramScale::Normalized => (h.total() - 1.0).abs() <= NORMALIZED_TOLERANCE,
                HistogramScale::MaxOne => false,
            }
    });

    let values = match reusable.map(|h| h.values()) {
        Some(Frequencies::Fractions(f)) => {
            let mut running = 0.0f32;
            Frequencies::Fractions(
                f.iter()
                    .map(|&v| {
                        running += v;
                        running
                    })
                    .collect(),
            )
        }
        other => {
            let owned;
            let counts: &[u64] = match other {
                Some(Frequencies::Counts(c)) => c,
                _ => {
                    owned = raw_counts(&input.into(), bins)?;
                    &owned
                }
            };
            let mut running = 0u64;
            let sums: Vec<u64> = counts
                .iter()
                .map(|&c| {
                    running += c;
                    running
                })
                .collect();
            if normalize {
                let total = counts.iter().sum::<u64>() as f32;
                Frequencies::Fractions(sums.iter().map(|&s| s as f32 / total).collect())
            } else {
                Frequencies::Counts(sums)
            }
        }
    };
    Ok(Cfp::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use unistat_core::DataBuffer;

    fn unit_bins(n: usize) -> BinSet {
        BinSet::regular(0.0, 1.0, n)
    }

    #[test]
    fn test_histogram_counts() {
        let buf = DataBuffer::new(vec![0.5, 1.2, 1.9, 2.0, 3.99, 4.0, -0.1, f64::NAN]);
        let hist = histogram(&buf, &unit_bins(4), false, false).unwrap();
        assert_eq!(hist.scale(), HistogramScale::Raw);
        // 4.0 is the exclusive upper edge
        assert_eq!(hist.counts(), Some(&[1u64, 2, 1, 1][..]));
    }

    #[test]
    fn test_integer_blanks_are_not_counted() {
        let buf = DataBuffer::new(vec![0u8, 1, 255, 2]);
        let bins = BinSet::regular(0.0, 100.0, 3);
        let hist = histogram(&buf, &bins, false, false).unwrap();
        assert_eq!(hist.counts(), Some(&[3u64, 0, 0][..]));
    }

    #[test]
    fn test_normalized_and_max_one() {
        let buf = DataBuffer::new(vec![0.5, 1.5, 1.6, 1.7]);
        let norm = histogram(&buf, &unit_bins(2), true, false).unwrap();
        assert_eq!(norm.scale(), HistogramScale::Normalized);
        assert_relative_eq!(norm.total(), 1.0, epsilon = 1e-6);

        let peak = histogram(&buf, &unit_bins(2), false, true).unwrap();
        assert_eq!(peak.values().fractions(), Some(&[1.0f32 / 3.0, 1.0][..]));
    }

    #[test]
    fn test_histogram_rejects_bad_requests() {
        let buf = DataBuffer::new(vec![0.5]);
        assert!(matches!(
            histogram(&buf, &unit_bins(2), true, true),
            Err(Error::InvalidParameter(_))
        ));
        let irregular = BinSet::irregular(vec![0.0, 1.0, 3.0]);
        assert!(matches!(
            histogram(&buf, &irregular, false, false),
            Err(Error::InvalidParameter(_))
        ));
        assert!(cfp(&buf, &irregular, None, false).is_err());
    }

    #[test]
    fn test_cfp_running_sums() {
        let buf = DataBuffer::new(vec![0.5, 1.5, 1.6, 3.2]);
        let plot = cfp(&buf, &unit_bins(4), None, false).unwrap();
        assert_eq!(plot.values().counts(), Some(&[1u64, 3, 3, 4][..]));

        let plot = cfp(&buf, &unit_bins(4), None, true).unwrap();
        assert_eq!(plot.values().fractions(), Some(&[0.25f32, 0.75, 0.75, 1.0][..]));
    }

    #[test]
    fn test_cfp_reuses_compatible_histograms() {
        let buf = DataBuffer::new(vec![0.5, 1.5, 1.6, 3.2]);
        let bins = unit_bins(4);

        let norm = histogram(&buf, &bins, true, false).unwrap();
        // normalized input gives a normalized plot even without the flag
        let plot = cfp(&buf, &bins, Some(&norm), false).unwrap();
        assert!(plot.is_normalized());
        assert_relative_eq!(plot.last().unwrap(), 1.0, epsilon = 1e-6);

        // a max-one histogram is recomputed from the data
        let peak = histogram(&buf, &bins, false, true).unwrap();
        let plot = cfp(&buf, &bins, Some(&peak), false).unwrap();
        assert_eq!(plot.values().counts(), Some(&[1u64, 3, 3, 4][..]));

        // raw counts are reused as they are
        let other = DataBuffer::new(vec![0.5]);
        let raw = histogram(&buf, &bins, false, false).unwrap();
        let plot = cfp(&other, &bins, Some(&raw), false).unwrap();
        assert_eq!(plot.last(), Some(4.0));
    }

    #[test]
    fn test_cfp_recounts_when_fractions_do_not_sum_to_one() {
        let bins = BinSet::regular(0.0, 1.0, 3);

        // nothing falls inside the bins, so every fraction is NaN
        let outside = DataBuffer::new(vec![f64::NAN, 10.0]);
        let empty = histogram(&outside, &bins, true, false).unwrap();
        assert!(empty.total().is_nan());

        let buf = DataBuffer::new(vec![0.5, 1.5]);
        let plot = cfp(&buf, &bins, Some(&empty), false).unwrap();
        assert_eq!(plot.values().counts(), Some(&[1u64, 2, 2][..]));

        let plot = cfp(&buf, &bins, Some(&empty), true).unwrap();
        assert_eq!(plot.values().fractions(), Some(&[0.5f32, 1.0, 1.0][..]));
    }
}
