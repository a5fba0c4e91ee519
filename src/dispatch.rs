//! Statistics over runtime-tagged buffers
//!
//! Table and command-line collaborators only learn a column's element type
//! at runtime. The functions here take an [`AnyBuffer`] and route to the
//! generic implementation for its element type. Integer and float results
//! keep their input type where the typed function does.

use crate::config::StatsConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;
use unistat_core::{dispatch_buffer, AnyBuffer, AnyValue, DataBuffer, Error, Numeric, Result};
use unistat_histogram::{BinSet, Cfp, Histogram, RegularBinBuilder};
use unistat_modality::{MirrorPlots, ModeConfig, ModeResult};
use unistat_spread::{MeanStd, SigmaClipConfig, SigmaClipResult};

/// Number of non-blank elements
pub fn count(buf: &AnyBuffer) -> u64 {
    dispatch_buffer!(buf, b => unistat_spread::count(b))
}

pub fn sum(buf: &AnyBuffer) -> f64 {
    dispatch_buffer!(buf, b => unistat_spread::sum(b))
}

pub fn mean(buf: &AnyBuffer) -> f64 {
    dispatch_buffer!(buf, b => unistat_spread::mean(b))
}

pub fn std(buf: &AnyBuffer) -> f64 {
    dispatch_buffer!(buf, b => unistat_spread::std(b))
}

pub fn mean_std(buf: &AnyBuffer) -> MeanStd {
    dispatch_buffer!(buf, b => unistat_spread::mean_std(b))
}

/// Smallest non-blank value, or the type's blank marker
pub fn minimum(buf: &AnyBuffer) -> AnyValue {
    dispatch_buffer!(buf, b => unistat_quantile::minimum(b).into_any())
}

/// Largest non-blank value, or the type's blank marker
pub fn maximum(buf: &AnyBuffer) -> AnyValue {
    dispatch_buffer!(buf, b => unistat_quantile::maximum(b).into_any())
}

pub fn median(buf: &AnyBuffer) -> Result<AnyValue> {
    dispatch_buffer!(buf, b => unistat_quantile::median(b).map(Numeric::into_any))
}

pub fn quantile(buf: &AnyBuffer, q: f64) -> Result<AnyValue> {
    dispatch_buffer!(buf, b => unistat_quantile::quantile(b, q).map(Numeric::into_any))
}

fn typed_quantile_function_index<T: Numeric>(
    buf: &DataBuffer<T>,
    value: &AnyValue,
) -> Result<Option<usize>> {
    unistat_quantile::quantile_function_index(buf, value.downcast::<T>()?)
}

fn typed_quantile_function<T: Numeric>(buf: &DataBuffer<T>, value: &AnyValue) -> Result<f64> {
    unistat_quantile::quantile_function(buf, value.downcast::<T>()?)
}

fn typed_mirror_plots<T: Numeric>(
    buf: &DataBuffer<T>,
    value: &AnyValue,
    numbins: usize,
) -> Result<Option<MirrorPlots>> {
    unistat_modality::mode_mirror_plots(buf, value.downcast::<T>()?, numbins)
}

/// Index of the element nearest `value`.
///
/// `value` must have the buffer's element type; otherwise
/// [`Error::TypeMismatch`] is returned.
pub fn quantile_function_index(buf: &AnyBuffer, value: &AnyValue) -> Result<Option<usize>> {
    dispatch_buffer!(buf, b => typed_quantile_function_index(b, value))
}

/// Quantile of `value`, which must have the buffer's element type
pub fn quantile_function(buf: &AnyBuffer, value: &AnyValue) -> Result<f64> {
    dispatch_buffer!(buf, b => typed_quantile_function(b, value))
}

pub fn mode(buf: &AnyBuffer, mirrordist: f64, config: &ModeConfig) -> Result<ModeResult> {
    dispatch_buffer!(buf, b => unistat_modality::mode_with_config(b, mirrordist, config))
}

/// Mirror plots about `value`, which must have the buffer's element type
pub fn mode_mirror_plots(
    buf: &AnyBuffer,
    value: &AnyValue,
    numbins: usize,
) -> Result<Option<MirrorPlots>> {
    dispatch_buffer!(buf, b => typed_mirror_plots(b, value, numbins))
}

pub fn sigma_clip(buf: &AnyBuffer, config: &SigmaClipConfig) -> Result<SigmaClipResult> {
    dispatch_buffer!(buf, b => unistat_spread::sigma_clip(b, config))
}

pub fn regular_bins(buf: &AnyBuffer, builder: &RegularBinBuilder) -> Result<BinSet> {
    dispatch_buffer!(buf, b => builder.build(b))
}

pub fn histogram(
    buf: &AnyBuffer,
    bins: &BinSet,
    normalize: bool,
    max_one: bool,
) -> Result<Histogram> {
    dispatch_buffer!(buf, b => unistat_histogram::histogram(b, bins, normalize, max_one))
}

pub fn cfp(
    buf: &AnyBuffer,
    bins: &BinSet,
    previous: Option<&Histogram>,
    normalize: bool,
) -> Result<Cfp> {
    dispatch_buffer!(buf, b => unistat_histogram::cfp(b, bins, previous, normalize))
}

/// A statistic that reduces a column to one table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Statistic {
    Number,
    Minimum,
    Maximum,
    Sum,
    Mean,
    Std,
    Median,
    /// Value at [`StatsConfig::quantile`]
    Quantile,
    /// Quantile of [`StatsConfig::value`]
    #[serde(rename = "quantfunc")]
    QuantFunc,
    Mode,
    ModeQuant,
    ModeSym,
    ModeSymValue,
    SigclipNumber,
    SigclipMedian,
    SigclipMean,
    SigclipStd,
}

impl Statistic {
    pub const ALL: [Statistic; 17] = [
        Statistic::Number,
        Statistic::Minimum,
        Statistic::Maximum,
        Statistic::Sum,
        Statistic::Mean,
        Statistic::Std,
        Statistic::Median,
        Statistic::Quantile,
        Statistic::QuantFunc,
        Statistic::Mode,
        Statistic::ModeQuant,
        Statistic::ModeSym,
        Statistic::ModeSymValue,
        Statistic::SigclipNumber,
        Statistic::SigclipMedian,
        Statistic::SigclipMean,
        Statistic::SigclipStd,
    ];

    /// Name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Std => "std",
            Self::Median => "median",
            Self::Quantile => "quantile",
            Self::QuantFunc => "quantfunc",
            Self::Mode => "mode",
            Self::ModeQuant => "mode-quant",
            Self::ModeSym => "mode-sym",
            Self::ModeSymValue => "mode-sym-value",
            Self::SigclipNumber => "sigclip-number",
            Self::SigclipMedian => "sigclip-median",
            Self::SigclipMean => "sigclip-mean",
            Self::SigclipStd => "sigclip-std",
        }
    }

    /// Evaluate on `buf` with the parameters in `config`
    pub fn evaluate(&self, buf: &AnyBuffer, config: &StatsConfig) -> Result<f64> {
        evaluate(buf, *self, config)
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Statistic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|stat| stat.name() == lowered)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown statistic '{s}'")))
    }
}

/// Extremum as a table cell: NaN when nothing is usable
fn extremum_cell(buf: &AnyBuffer, value: AnyValue) -> f64 {
    if count(buf) == 0 {
        f64::NAN
    } else {
        value.to_f64()
    }
}

/// Evaluate one named statistic of `buf` as an `f64` table cell.
///
/// Statistics with an undefined value (extrema, moments, mode and sigma
/// clipping of blank data) give NaN; median and quantiles of blank data
/// are errors.
#[instrument(skip(buf, config), fields(element_type = %buf.element_type(), len = buf.len()))]
pub fn evaluate(buf: &AnyBuffer, statistic: Statistic, config: &StatsConfig) -> Result<f64> {
    let cell = match statistic {
        Statistic::Number => count(buf) as f64,
        Statistic::Minimum => extremum_cell(buf, minimum(buf)),
        Statistic::Maximum => extremum_cell(buf, maximum(buf)),
        Statistic::Sum => sum(buf),
        Statistic::Mean => mean(buf),
        Statistic::Std => std(buf),
        Statistic::Median => median(buf)?.to_f64(),
        Statistic::Quantile => {
            let q = config.quantile.ok_or_else(|| {
                Error::InvalidParameter("the quantile statistic needs a fraction".to_string())
            })?;
            quantile(buf, q)?.to_f64()
        }
        Statistic::QuantFunc => {
            let value = config.value.ok_or_else(|| {
                Error::InvalidParameter("the quantfunc statistic needs a value".to_string())
            })?;
            quantile_function(buf, &AnyValue::from_f64(buf.element_type(), value))?
        }
        Statistic::Mode | Statistic::ModeQuant | Statistic::ModeSym | Statistic::ModeSymValue => {
            let result = mode(buf, config.mirror_distance, &config.mode)?;
            match statistic {
                Statistic::Mode => result.mode,
                Statistic::ModeQuant => result.quantile,
                Statistic::ModeSym => result.symmetry,
                _ => result.sym_value,
            }
        }
        Statistic::SigclipNumber
        | Statistic::SigclipMedian
        | Statistic::SigclipMean
        | Statistic::SigclipStd => {
            let result = sigma_clip(buf, &config.sigma_clip)?;
            f64::from(match statistic {
                Statistic::SigclipNumber => result.number,
                Statistic::SigclipMedian => result.median,
                Statistic::SigclipMean => result.mean,
                _ => result.std,
            })
        }
    };
    Ok(cell)
}

/// Evaluate several statistics of one buffer, in order
pub fn evaluate_all(
    buf: &AnyBuffer,
    statistics: &[Statistic],
    config: &StatsConfig,
) -> Result<Vec<f64>> {
    statistics
        .iter()
        .map(|&stat| evaluate(buf, stat, config))
        .collect()
}
