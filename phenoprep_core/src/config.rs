//! Runtime configuration for `check_input`.
//!
//! This is the struct the pipeline consumes. It is separate from the
//! TOML-deserialized config in `phenoprep_config`; see `conversions`.

use crate::error::{BuildError, Result};

/// Default share of samples a quality tier must hold to drive range estimation.
pub const DEFAULT_PERC_WC: f64 = 0.4;
/// Default weight floor.
pub const DEFAULT_WMIN: f64 = 0.2;
/// Default two-sided tail probability of the robust range.
pub const DEFAULT_ALPHA: f64 = 0.02;
/// Frequency used when it cannot be inferred (single-sample series).
/// 23 is the 16-day composite cadence of the common MODIS VI products.
pub const FALLBACK_NPTPERYEAR: u32 = 23;

/// Preprocessing configuration. Every field has a default; see `Default`.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessCfg {
    /// Observations per year. `None` infers `ceil(365 / (t[1] - t[0]))`.
    pub nptperyear: Option<u32>,
    /// Southern hemisphere flag, passed through to the output.
    pub south: bool,
    /// Minimum fraction of samples a weight tier must hold. Range: (0.0, 1.0].
    pub perc_wc: f64,
    /// Weight floor. Range: [0.0, 1.0).
    pub wmin: f64,
    /// Optional user floor for `ylu.lower`. `NaN` counts as not given.
    pub ymin: Option<f64>,
    /// Substitute for rejected/unfillable samples. `None` (or `NaN`) uses
    /// `ylu.lower`.
    pub missval: Option<f64>,
    /// Longest fillable gap in samples. `None` uses `ceil(nptperyear / 12 * 1.5)`.
    pub maxgap: Option<usize>,
    /// Two-sided tail probability of the robust range. Range: [0.0, 1.0].
    pub alpha: f64,
    /// Upper-tail probability; `None` reuses `alpha`.
    pub alpha_high: Option<f64>,
    /// Enable the spike detector.
    pub mask_spike: bool,
}

impl Default for PreprocessCfg {
    fn default() -> Self {
        Self {
            nptperyear: None,
            south: false,
            perc_wc: DEFAULT_PERC_WC,
            wmin: DEFAULT_WMIN,
            ymin: None,
            missval: None,
            maxgap: None,
            alpha: DEFAULT_ALPHA,
            alpha_high: None,
            mask_spike: true,
        }
    }
}

impl PreprocessCfg {
    /// Check ranges of every field. Errors are `BuildError::InvalidConfig`.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &'static str| -> Result<()> {
            Err(eyre::Report::new(BuildError::InvalidConfig(msg)))
        };

        if !(self.perc_wc > 0.0 && self.perc_wc <= 1.0) {
            return invalid("perc_wc must be in (0.0, 1.0]");
        }
        if !(self.wmin >= 0.0 && self.wmin < 1.0) {
            return invalid("wmin must be in [0.0, 1.0)");
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return invalid("alpha must be in [0.0, 1.0]");
        }
        if let Some(a) = self.alpha_high
            && !(0.0..=1.0).contains(&a)
        {
            return invalid("alpha_high must be in [0.0, 1.0]");
        }
        if self.nptperyear == Some(0) {
            return invalid("nptperyear must be >= 1");
        }
        if self.maxgap == Some(0) {
            return invalid("maxgap must be >= 1");
        }
        if self.ymin.is_some_and(f64::is_infinite) {
            return invalid("ymin must not be infinite");
        }
        if self.missval.is_some_and(f64::is_infinite) {
            return invalid("missval must not be infinite");
        }
        Ok(())
    }
}
