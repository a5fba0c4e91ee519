//! Configuration for named statistics

use serde::{Deserialize, Serialize};
use std::path::Path;
use unistat_core::{Error, Result};
use unistat_histogram::{RangeSpec, RegularBinBuilder};
use unistat_modality::ModeConfig;
use unistat_spread::SigmaClipConfig;

/// Default error budget of the mode search, in Poisson errors of the
/// mirror index
pub const DEFAULT_MIRROR_DISTANCE: f64 = 1.5;

/// Default number of histogram bins
pub const DEFAULT_NUMBINS: usize = 10;

/// Parameters of every named statistic.
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes:
///
/// ```rust
/// use unistat::StatsConfig;
///
/// let json = r#"{ "quantile": 0.25, "sigma_clip": { "param": 5 } }"#;
/// let config = StatsConfig::from_json_str(json).unwrap();
/// assert_eq!(config.quantile, Some(0.25));
/// assert_eq!(config.sigma_clip.multiplier, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Fraction used by the `quantile` statistic
    pub quantile: Option<f64>,
    /// Value used by the `quantfunc` statistic
    pub value: Option<f64>,
    /// Error budget of the mode search
    pub mirror_distance: f64,
    pub mode: ModeConfig,
    pub sigma_clip: SigmaClipConfig,
    pub numbins: usize,
    pub bin_range: RangeSpec,
    /// Put one bin's lower edge on this value
    pub bin_alignment: Option<f64>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            quantile: None,
            value: None,
            mirror_distance: DEFAULT_MIRROR_DISTANCE,
            mode: ModeConfig::default(),
            sigma_clip: SigmaClipConfig::default(),
            numbins: DEFAULT_NUMBINS,
            bin_range: RangeSpec::Full,
            bin_alignment: None,
        }
    }
}

impl StatsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn with_quantile(mut self, q: f64) -> Self {
        self.quantile = Some(q);
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_sigma_clip(mut self, sigma_clip: SigmaClipConfig) -> Self {
        self.sigma_clip = sigma_clip;
        self
    }

    pub fn with_mirror_distance(mut self, mirror_distance: f64) -> Self {
        self.mirror_distance = mirror_distance;
        self
    }

    /// Builder for the configured bins
    pub fn bin_builder(&self) -> RegularBinBuilder {
        RegularBinBuilder::new(self.numbins)
            .with_range(self.bin_range)
            .align_to(self.bin_alignment.unwrap_or(f64::NAN))
    }

    /// Check every parameter
    pub fn validate(&self) -> Result<()> {
        if let Some(q) = self.quantile {
            Error::check_quantile(q)?;
        }
        if let Some(v) = self.value {
            if v.is_nan() {
                return Err(Error::InvalidParameter(
                    "quantile function value cannot be NaN".to_string(),
                ));
            }
        }
        if self.mirror_distance.is_nan() || self.mirror_distance <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "mirror distance {} must be positive",
                self.mirror_distance
            )));
        }
        if self.numbins == 0 {
            return Err(Error::InvalidParameter("numbins cannot be zero".to_string()));
        }
        self.mode.validate()?;
        self.sigma_clip.mode()?;
        Ok(())
    }
}
