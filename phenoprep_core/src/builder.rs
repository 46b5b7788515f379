//! Type-state builder for `InputSeries`.
//!
//! The builder enforces at compile time that timestamps and values are provided
//! before `build()` is available. `try_build()` is always available for dynamic checks.

use std::marker::PhantomData;

use crate::error::{BuildError, PreprocessError, Result};
use crate::series::InputSeries;
use crate::util::{finite, present};

// ── Type-state markers ───────────────────────────────────────────────────────

pub struct Missing;
pub struct Set;

/// Builder for `InputSeries`. All fields are validated on `build()`.
///
/// Value setters accept anything yielding `f64` or `Option<f64>`. `None` and
/// `NaN` mean "missing"; in `y` and `tn` infinities do too.
pub struct InputSeriesBuilder<T, Y> {
    t: Option<Vec<f64>>,
    y: Option<Vec<Option<f64>>>,
    w: Option<Vec<Option<f64>>>,
    qc_flag: Option<Vec<String>>,
    tn: Option<Vec<Option<f64>>>,
    _t: PhantomData<T>,
    _y: PhantomData<Y>,
}

impl Default for InputSeriesBuilder<Missing, Missing> {
    fn default() -> Self {
        Self {
            t: None,
            y: None,
            w: None,
            qc_flag: None,
            tn: None,
            _t: PhantomData,
            _y: PhantomData,
        }
    }
}

fn collect_with<I, V>(values: I, norm: fn(Option<f64>) -> Option<f64>) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = V>,
    V: Into<Option<f64>>,
{
    values.into_iter().map(|v| norm(v.into())).collect()
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(eyre::Report::new(PreprocessError::LengthMismatch {
            field,
            expected,
            actual,
        }))
    }
}

/// Validate the assembled fields and construct the series.
fn validate_and_build(
    t: Vec<f64>,
    y: Vec<Option<f64>>,
    w: Option<Vec<Option<f64>>>,
    qc_flag: Option<Vec<String>>,
    tn: Option<Vec<Option<f64>>>,
) -> Result<InputSeries> {
    let n = t.len();
    if n == 0 {
        return Err(eyre::Report::new(PreprocessError::EmptySeries));
    }
    check_len("y", n, y.len())?;
    if let Some(w) = &w {
        check_len("w", n, w.len())?;
    }
    if let Some(q) = &qc_flag {
        check_len("qc_flag", n, q.len())?;
    }
    if let Some(tn) = &tn {
        check_len("tn", n, tn.len())?;
    }

    for (index, &value) in t.iter().enumerate() {
        if !value.is_finite() {
            return Err(eyre::Report::new(PreprocessError::NonFiniteTime {
                index,
                value,
            }));
        }
    }
    // Gap lengths and interpolation slopes are measured along t.
    for (i, pair) in t.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(eyre::Report::new(PreprocessError::NonIncreasingTime {
                index: i + 1,
                prev: pair[0],
                next: pair[1],
            }));
        }
    }

    if let Some(w) = &w {
        for (index, value) in w.iter().enumerate() {
            if let Some(value) = *value
                && !(0.0..=1.0).contains(&value)
            {
                return Err(eyre::Report::new(PreprocessError::InvalidWeight {
                    index,
                    value,
                }));
            }
        }
    }

    Ok(InputSeries {
        t,
        y,
        w,
        qc_flag,
        tn,
    })
}

impl<T, Y> InputSeriesBuilder<T, Y> {
    /// Fallible build available in any type-state; returns detailed error for missing pieces.
    pub fn try_build(self) -> Result<InputSeries> {
        let t = self
            .t
            .ok_or_else(|| eyre::Report::new(BuildError::MissingTimes))?;
        let y = self
            .y
            .ok_or_else(|| eyre::Report::new(BuildError::MissingValues))?;
        validate_and_build(t, y, self.w, self.qc_flag, self.tn)
    }
}

/// Chainable setters that do not affect type-state.
impl<T, Y> InputSeriesBuilder<T, Y> {
    /// Per-sample weights in [0, 1]. Defaults to all ones when not set.
    pub fn with_weights<I, V>(mut self, w: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Option<f64>>,
    {
        self.w = Some(collect_with(w, present));
        self
    }
    /// Categorical quality labels, carried through unchanged.
    pub fn with_qc_flag<I, S>(mut self, qc: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.qc_flag = Some(qc.into_iter().map(Into::into).collect());
        self
    }
    /// Auxiliary covariate (e.g. night temperature), gap-filled independently.
    pub fn with_tn<I, V>(mut self, tn: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Option<f64>>,
    {
        self.tn = Some(collect_with(tn, finite));
        self
    }
}

// Setters that advance type-state
impl<Y> InputSeriesBuilder<Missing, Y> {
    /// Timestamps in days; must be finite and strictly increasing.
    pub fn with_t(self, t: impl IntoIterator<Item = f64>) -> InputSeriesBuilder<Set, Y> {
        InputSeriesBuilder {
            t: Some(t.into_iter().collect()),
            y: self.y,
            w: self.w,
            qc_flag: self.qc_flag,
            tn: self.tn,
            _t: PhantomData,
            _y: PhantomData,
        }
    }
}

impl<T> InputSeriesBuilder<T, Missing> {
    pub fn with_y<I, V>(self, y: I) -> InputSeriesBuilder<T, Set>
    where
        I: IntoIterator<Item = V>,
        V: Into<Option<f64>>,
    {
        InputSeriesBuilder {
            t: self.t,
            y: Some(collect_with(y, finite)),
            w: self.w,
            qc_flag: self.qc_flag,
            tn: self.tn,
            _t: PhantomData,
            _y: PhantomData,
        }
    }
}

impl InputSeriesBuilder<Set, Set> {
    /// Validate and build the series. Only available when `t` and `y` are set.
    pub fn build(self) -> Result<InputSeries> {
        self.try_build()
    }
}
