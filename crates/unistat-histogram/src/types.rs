//! Core types for bins, histograms and cumulative frequency plots

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bin centers along one axis.
///
/// Only regular (equal-width) bins can be used for counting; an irregular
/// set exists so callers can describe bins that came from elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinSet {
    centers: Vec<f64>,
    lower: f64,
    width: f64,
    regular: bool,
}

impl BinSet {
    /// `numbins` bins of equal `width` whose first lower edge is `min`
    pub fn regular(min: f64, width: f64, numbins: usize) -> Self {
        let half = width / 2.0;
        let centers = (0..numbins)
            .map(|i| min + i as f64 * width + half)
            .collect();
        Self {
            centers,
            lower: min,
            width,
            regular: true,
        }
    }

    /// Bins given only by their centers, without a common width
    pub fn irregular(centers: Vec<f64>) -> Self {
        Self {
            centers,
            lower: f64::NAN,
            width: f64::NAN,
            regular: false,
        }
    }

    pub fn centers(&self) -> &[f64] {
        &self.centers
    }

    /// Common bin width (NaN for irregular bins)
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn is_regular(&self) -> bool {
        self.regular
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Lower edge of bin `i` (NaN for irregular bins)
    pub fn lower_edge(&self, i: usize) -> f64 {
        self.lower + i as f64 * self.width
    }

    /// `[min, max)` covered by all bins; `None` when empty or irregular
    pub fn range(&self) -> Option<(f64, f64)> {
        if self.centers.is_empty() || !self.regular {
            return None;
        }
        Some((self.lower, self.lower_edge(self.centers.len())))
    }

    /// Move every bin by `offset`
    pub(crate) fn shift(&mut self, offset: f64) {
        self.lower += offset;
        for c in &mut self.centers {
            *c += offset;
        }
    }
}

impl fmt::Display for BinSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range() {
            Some((min, max)) if self.regular => write!(
                f,
                "BinSet({} bins, width={:.3}, range=[{:.3}, {:.3}))",
                self.len(),
                self.width,
                min,
                max
            ),
            _ => write!(f, "BinSet({} irregular bins)", self.len()),
        }
    }
}

/// How histogram values were scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistogramScale {
    /// Raw counts
    Raw,
    /// Fractions of the total, summing to one
    Normalized,
    /// Fractions of the fullest bin, peaking at one
    MaxOne,
}

/// Per-bin values: counts, or fractions once scaled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Frequencies {
    Counts(Vec<u64>),
    Fractions(Vec<f32>),
}

impl Frequencies {
    /// Get the number of bins
    pub fn len(&self) -> usize {
        match self {
            Self::Counts(c) => c.len(),
            Self::Fractions(f) => f.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values widened to f64
    pub fn to_f64(&self) -> Vec<f64> {
        match self {
            Self::Counts(c) => c.iter().map(|&v| v as f64).collect(),
            Self::Fractions(f) => f.iter().map(|&v| v as f64).collect(),
        }
    }

    /// Raw counts, if unscaled
    pub fn counts(&self) -> Option<&[u64]> {
        match self {
            Self::Counts(c) => Some(c),
            Self::Fractions(_) => None,
        }
    }

    /// Scaled values, if any scaling was applied
    pub fn fractions(&self) -> Option<&[f32]> {
        match self {
            Self::Counts(_) => None,
            Self::Fractions(f) => Some(f),
        }
    }
}

/// A 1-D histogram, index-aligned with the [`BinSet`] it was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    values: Frequencies,
    scale: HistogramScale,
}

impl Histogram {
    pub(crate) fn new(values: Frequencies, scale: HistogramScale) -> Self {
        Self { values, scale }
    }

    pub fn values(&self) -> &Frequencies {
        &self.values
    }

    pub fn scale(&self) -> HistogramScale {
        self.scale
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw counts, if unscaled
    pub fn counts(&self) -> Option<&[u64]> {
        self.values.counts()
    }

    /// Sum over all bins
    pub fn total(&self) -> f64 {
        self.values.to_f64().iter().sum()
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram({} bins, {:?}, total={:.3})",
            self.len(),
            self.scale,
            self.total()
        )
    }
}

/// Cumulative frequency plot: running sums of a histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cfp {
    values: Frequencies,
}

impl Cfp {
    pub(crate) fn new(values: Frequencies) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &Frequencies {
        &self.values
    }

    /// Whether the plot is expressed as fractions of the total
    pub fn is_normalized(&self) -> bool {
        matches!(self.values, Frequencies::Fractions(_))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the last bin: the total count, or one when normalized
    pub fn last(&self) -> Option<f64> {
        self.values.to_f64().last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_bins() {
        let bins = BinSet::regular(0.0, 2.0, 3);
        assert_eq!(bins.centers(), &[1.0, 3.0, 5.0]);
        assert_eq!(bins.width(), 2.0);
        assert!(bins.is_regular());
        assert_eq!(bins.lower_edge(1), 2.0);
        assert_eq!(bins.range(), Some((0.0, 6.0)));
    }

    #[test]
    fn test_irregular_bins() {
        let bins = BinSet::irregular(vec![0.5, 1.0, 4.0]);
        assert!(!bins.is_regular());
        assert!(bins.width().is_nan());
        assert_eq!(bins.len(), 3);
        assert_eq!(bins.to_string(), "BinSet(3 irregular bins)");
    }

    #[test]
    fn test_frequencies_accessors() {
        let counts = Frequencies::Counts(vec![2, 5, 3]);
        assert_eq!(counts.counts(), Some(&[2u64, 5, 3][..]));
        assert_eq!(counts.fractions(), None);
        assert_eq!(counts.to_f64(), vec![2.0, 5.0, 3.0]);

        let hist = Histogram::new(counts, HistogramScale::Raw);
        assert_eq!(hist.len(), 3);
        assert_eq!(hist.total(), 10.0);

        let cfp = Cfp::new(Frequencies::Fractions(vec![0.25, 1.0]));
        assert!(cfp.is_normalized());
        assert_eq!(cfp.last(), Some(1.0));
    }
}
