//! Iterative sigma clipping
//!
//! Each round measures the median, mean and standard deviation of the
//! current window and then narrows the window to
//! `[median - multiplier * std, median + multiplier * std]`. Because the
//! distribution is sorted, a window is always a contiguous range and
//! narrowing it only moves its two ends.

use crate::moments::Accumulator;
use serde::{Deserialize, Serialize};
use tracing::debug;
use unistat_core::{no_blank_monotonic, Dataset, Error, Numeric, Result};

/// Hard cap on rounds when clipping until the standard deviation settles
pub const SIG_CLIP_MAX_CONVERGE: usize = 50;

/// Configuration for sigma clipping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigmaClipConfig {
    /// Number of standard deviations for the clipping bounds
    pub multiplier: f64,
    /// Below 1: stop once the fractional drop in std falls under this
    /// tolerance. From 1 up: the exact number of rounds (must be whole).
    pub param: f64,
    /// Round cap in tolerance mode
    pub max_converge: usize,
}

impl Default for SigmaClipConfig {
    fn default() -> Self {
        Self {
            multiplier: 3.0,
            param: 0.2,
            max_converge: SIG_CLIP_MAX_CONVERGE,
        }
    }
}

/// How the clipping loop stops
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipMode {
    /// Run exactly this many rounds
    Rounds(usize),
    /// Stop when `(previous_std - std) / std` drops below the tolerance
    Tolerance(f64),
}

impl SigmaClipConfig {
    pub fn new(multiplier: f64, param: f64) -> Self {
        Self {
            multiplier,
            param,
            ..Self::default()
        }
    }

    /// Check the parameters and decide the stopping rule
    pub fn mode(&self) -> Result<ClipMode> {
        if !(self.multiplier.is_finite() && self.multiplier > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "sigma-clip multiplier must be positive, got {}",
                self.multiplier
            )));
        }
        if !(self.param.is_finite() && self.param > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "sigma-clip parameter must be positive, got {}",
                self.param
            )));
        }
        if self.param >= 1.0 {
            if self.param.fract() != 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "sigma-clip parameter {} is read as a number of rounds and must be whole",
                    self.param
                )));
            }
            Ok(ClipMode::Rounds(self.param as usize))
        } else {
            if self.max_converge == 0 {
                return Err(Error::InvalidParameter(
                    "sigma-clip max_converge cannot be zero".to_string(),
                ));
            }
            Ok(ClipMode::Tolerance(self.param))
        }
    }
}

/// Summary of the accepted window.
///
/// All four statistics are NaN when the input had no usable values or when
/// tolerance-mode clipping never settled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SigmaClipResult {
    pub number: f32,
    pub median: f32,
    pub mean: f32,
    pub std: f32,
    /// Rounds completed before stopping
    pub iterations: usize,
}

impl SigmaClipResult {
    fn undefined(iterations: usize) -> Self {
        Self {
            number: f32::NAN,
            median: f32::NAN,
            mean: f32::NAN,
            std: f32::NAN,
            iterations,
        }
    }

    /// Whether the statistics describe a converged window
    pub fn is_defined(&self) -> bool {
        !self.number.is_nan()
    }
}

#[derive(Debug, Clone, Copy)]
struct Round {
    number: usize,
    median: f64,
    mean: f64,
    std: f64,
}

/// Sigma-clip the non-blank values.
///
/// With [`ClipMode::Rounds`] the statistics of the last round's window are
/// reported. With [`ClipMode::Tolerance`] the round before the one that met
/// the tolerance is reported.
pub fn sigma_clip<'a, T: Numeric>(
    input: impl Into<Dataset<'a, T>>,
    config: &SigmaClipConfig,
) -> Result<SigmaClipResult> {
    let mode = config.mode()?;
    let sorted = no_blank_monotonic(input);
    let a = sorted.as_slice();
    if a.is_empty() {
        return Ok(SigmaClipResult::undefined(0));
    }
    let (max_rounds, tolerance) = match mode {
        ClipMode::Rounds(n) => (n, None),
        ClipMode::Tolerance(tol) => (config.max_converge, Some(tol)),
    };

    let mut start = 0;
    let mut len = a.len();
    let mut previous: Option<Round> = None;
    let mut converged = false;
    let mut num = 0;

    while num < max_rounds {
        let window = &a[start..start + len];
        let stats = Accumulator::from_values(window.iter().copied()).mean_std();
        let round = Round {
            number: len,
            median: window_median(window).to_f64(),
            mean: stats.mean,
            std: stats.std,
        };
        debug!(
            round = num + 1,
            number = round.number,
            median = round.median,
            mean = round.mean,
            std = round.std,
            "sigma-clip round"
        );

        if let (Some(tol), Some(prev)) = (tolerance, previous) {
            if (prev.std - round.std) / round.std < tol {
                converged = true;
                break;
            }
        }

        let (new_start, new_len) = narrow(window, &round, config.multiplier);
        start += new_start;
        len = new_len;

        previous = Some(round);
        num += 1;
    }

    if tolerance.is_some() && !converged {
        debug!(rounds = num, "sigma clipping did not converge");
        return Ok(SigmaClipResult::undefined(num));
    }

    Ok(match previous {
        Some(round) => SigmaClipResult {
            number: round.number as f32,
            median: round.median as f32,
            mean: round.mean as f32,
            std: round.std as f32,
            iterations: num,
        },
        None => SigmaClipResult::undefined(num),
    })
}

fn window_median<T: Numeric>(w: &[T]) -> T {
    let n = w.len();
    if n % 2 == 1 {
        w[n / 2]
    } else {
        w[n / 2 - 1].midpoint(w[n / 2])
    }
}

/// Sub-range of a sorted window inside the inclusive clipping bounds.
///
/// The window may be increasing or decreasing: in both cases the kept
/// values form one contiguous run, found by a forward scan from the start
/// and a backward scan from the end. Returns the window unchanged when no
/// element satisfies the bounds.
fn narrow<T: Numeric>(w: &[T], round: &Round, multiplier: f64) -> (usize, usize) {
    let lo = round.median - multiplier * round.std;
    let hi = round.median + multiplier * round.std;
    let inside = |v: &T| {
        let x = v.to_f64();
        x >= lo && x <= hi
    };

    let first = w.iter().position(inside);
    let last = w.iter().rposition(inside);
    match (first, last) {
        (Some(s), Some(e)) if e >= s => (s, e - s + 1),
        _ => (0, w.len()),
    }
}
