//! Input and output records of the preprocessor.
//!
//! `InputSeries` is the validated caller input (built with
//! [`InputSeries::builder`]); `TimeSeries` is the fully populated record handed
//! to curve fitting. Missing values are `None` throughout; non-finite values
//! supplied by the caller are normalized to `None` when the input is built.

use crate::builder::{InputSeriesBuilder, Missing};

/// Estimated valid value range of a signal (`ylu`).
///
/// Values produced by the range estimator satisfy `0 <= lower <= upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub lower: f64,
    pub upper: f64,
}

impl ValueRange {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}

impl From<(f64, f64)> for ValueRange {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self { lower, upper }
    }
}

/// Validated input series.
///
/// Invariants (enforced by the builder):
/// - `t` is non-empty, finite and strictly increasing.
/// - `y`, `w`, `qc_flag` and `tn` (when present) have the length of `t`.
/// - present weights lie in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct InputSeries {
    pub(crate) t: Vec<f64>,
    pub(crate) y: Vec<Option<f64>>,
    pub(crate) w: Option<Vec<Option<f64>>>,
    pub(crate) qc_flag: Option<Vec<String>>,
    pub(crate) tn: Option<Vec<Option<f64>>>,
}

impl InputSeries {
    /// Start building an input series.
    pub fn builder() -> InputSeriesBuilder<Missing, Missing> {
        InputSeriesBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Always false for a built series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn t(&self) -> &[f64] {
        &self.t
    }

    pub fn y(&self) -> &[Option<f64>] {
        &self.y
    }

    pub fn w(&self) -> Option<&[Option<f64>]> {
        self.w.as_deref()
    }

    pub fn qc_flag(&self) -> Option<&[String]> {
        self.qc_flag.as_deref()
    }

    pub fn tn(&self) -> Option<&[Option<f64>]> {
        self.tn.as_deref()
    }
}

/// Counters describing what a run changed. Mirrors the `debug!` events.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PreprocessStats {
    /// Weight threshold used for range estimation.
    pub w_critical: f64,
    /// Samples whose weight was changed to `wmin` for being out of range.
    /// Weights already at `wmin` are not counted.
    pub demoted: usize,
    /// Samples replaced by `missval` during reclassification.
    pub scrubbed: usize,
    /// Samples nulled by the spike detector.
    pub spikes: usize,
    /// Samples filled by bounded-gap interpolation.
    pub interpolated: usize,
    /// Samples left to `missval` after interpolation.
    pub filled_missval: usize,
}

/// Preprocessed series handed to curve fitting.
///
/// `y` has no missing entries and every `w` lies in `[wmin, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub t: Vec<f64>,
    /// Original values, missing entries preserved.
    pub y0: Vec<Option<f64>>,
    pub y: Vec<f64>,
    pub w: Vec<f64>,
    pub qc_flag: Option<Vec<String>>,
    /// Gap-filled auxiliary covariate; over-long gaps stay missing.
    pub tn: Option<Vec<Option<f64>>>,
    pub ylu: ValueRange,
    pub nptperyear: u32,
    pub south: bool,
    pub stats: PreprocessStats,
}
