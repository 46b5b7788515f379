#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the vegetation-index preprocessor.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//! - Every section and every field is optional; absent values fall back to the
//!   defaults used by `phenoprep_core::PreprocessCfg`.
use serde::Deserialize;

/// Sampling metadata of the series.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SeriesCfg {
    /// Observations per year; inferred from the first two timestamps when absent.
    pub nptperyear: Option<u32>,
    /// Southern hemisphere flag (carried through, not used by the arithmetic).
    pub south: bool,
}

/// Weight floor and the quota that picks the weight tier.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WeightsCfg {
    /// Weight floor; every output weight is >= wmin.
    pub wmin: f64,
    /// Minimum fraction of samples a quality tier must hold to be used
    /// for range estimation.
    pub perc_wc: f64,
}

impl Default for WeightsCfg {
    fn default() -> Self {
        Self {
            wmin: 0.2,
            perc_wc: 0.4,
        }
    }
}

/// Robust value range estimation.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RangeCfg {
    /// Two-sided tail probability for the robust range.
    pub alpha: f64,
    /// Optional upper-tail probability; defaults to `alpha`.
    pub alpha_high: Option<f64>,
    /// Optional user floor for the lower bound; `nan` means not given.
    pub ymin: Option<f64>,
}

impl Default for RangeCfg {
    fn default() -> Self {
        Self {
            alpha: 0.02,
            alpha_high: None,
            ymin: None,
        }
    }
}

/// Spike masking and gap filling.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FillCfg {
    /// Longest missing run (in samples) that is filled by interpolation.
    pub maxgap: Option<usize>,
    /// Value substituted for rejected or unfillable samples; `nan` means not
    /// given.
    pub missval: Option<f64>,
    /// Remove transient spikes among low-confidence samples.
    pub mask_spike: bool,
}

impl Default for FillCfg {
    fn default() -> Self {
        Self {
            maxgap: None,
            missval: None,
            mask_spike: true,
        }
    }
}

/// Top-level preprocessing config; every section may be omitted.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub series: SeriesCfg,
    #[serde(default)]
    pub weights: WeightsCfg,
    #[serde(default)]
    pub range: RangeCfg,
    #[serde(default)]
    pub fill: FillCfg,
}

/// Parse a TOML document. Validation is left to the caller.
pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read and parse a TOML config file. Validation is left to the caller.
pub fn load_toml_file(path: &std::path::Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Series
        if self.series.nptperyear == Some(0) {
            eyre::bail!("series.nptperyear must be >= 1");
        }

        // Weights
        if !(self.weights.wmin >= 0.0 && self.weights.wmin < 1.0) {
            eyre::bail!("weights.wmin must be in [0.0, 1.0)");
        }
        if !(self.weights.perc_wc > 0.0 && self.weights.perc_wc <= 1.0) {
            eyre::bail!("weights.perc_wc must be in (0.0, 1.0]");
        }

        // Range
        if !(0.0..=1.0).contains(&self.range.alpha) {
            eyre::bail!("range.alpha must be in [0.0, 1.0]");
        }
        if let Some(a) = self.range.alpha_high
            && !(0.0..=1.0).contains(&a)
        {
            eyre::bail!("range.alpha_high must be in [0.0, 1.0]");
        }
        if self.range.ymin.is_some_and(f64::is_infinite) {
            eyre::bail!("range.ymin must not be infinite");
        }

        // Fill
        if self.fill.maxgap == Some(0) {
            eyre::bail!("fill.maxgap must be >= 1");
        }
        if self.fill.missval.is_some_and(f64::is_infinite) {
            eyre::bail!("fill.missval must not be infinite");
        }

        Ok(())
    }
}
