//! Range and threshold estimation (stage 1).
//!
//! Picks the strictest weight tier that still holds a usable share of the
//! samples (`w_critical`), then derives the robust value range `ylu` from
//! quantiles of the samples in that tier.

use crate::error::{PreprocessError, Result};
use crate::series::ValueRange;
use crate::util::{quantile_sorted, sorted_present};

/// Weight of a trusted ("good") observation.
pub const W_GOOD: f64 = 1.0;
/// Weight of a partially trusted ("marginal") observation.
pub const W_MARGINAL: f64 = 0.5;

/// Output of stage 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeEstimate {
    /// Minimum weight a sample needs to count as qualified.
    pub w_critical: f64,
    /// Robust value range of the qualified samples.
    pub ylu: ValueRange,
    /// Largest qualified value; drives weight demotion in stage 2.
    pub y_good_max: f64,
}

/// Select the weight-critical threshold.
///
/// First match wins:
/// 1. `count(w == 1) >= n * perc_wc` gives `1`;
/// 2. `count(w >= 0.5) > n * perc_wc` gives `0.5`;
/// 3. otherwise `wmin`.
///
/// Missing weights never count towards a tier but do count in `n`.
#[allow(clippy::float_cmp)]
pub fn select_w_critical(w: &[Option<f64>], perc_wc: f64, wmin: f64) -> f64 {
    let n = w.len() as f64;
    let quota = n * perc_wc;
    let count = |pred: fn(f64) -> bool| w.iter().flatten().filter(|&&v| pred(v)).count() as f64;

    if count(|v| v == W_GOOD) >= quota {
        W_GOOD
    } else if count(|v| v >= W_MARGINAL) > quota {
        W_MARGINAL
    } else {
        wmin
    }
}

/// Derive `ylu` from the samples with `w >= w_critical`.
///
/// `lower = max(q(alpha / 2), 0)`, raised to `ymin_user` when given;
/// `upper = q(1 - alpha_high / 2)`. When the floor lands above `upper`,
/// `upper` is raised to `lower` so the pair stays ordered.
///
/// Fails with `EmptyQualifiedSubset` when no present sample qualifies.
pub fn estimate_range(
    y: &[Option<f64>],
    w: &[Option<f64>],
    w_critical: f64,
    alpha: f64,
    alpha_high: f64,
    ymin_user: Option<f64>,
) -> Result<RangeEstimate> {
    let good = sorted_present(
        y.iter()
            .zip(w)
            .filter_map(|(&yi, &wi)| match (yi, wi) {
                (Some(v), Some(wt)) if wt >= w_critical => Some(v),
                _ => None,
            }),
    );
    let (Some(q_low), Some(q_high), Some(&y_good_max)) = (
        quantile_sorted(&good, alpha / 2.0),
        quantile_sorted(&good, 1.0 - alpha_high / 2.0),
        good.last(),
    ) else {
        return Err(eyre::Report::new(PreprocessError::EmptyQualifiedSubset {
            w_critical,
        }));
    };

    let mut lower = q_low.max(0.0);
    if let Some(floor) = ymin_user {
        lower = lower.max(floor);
    }
    let mut upper = q_high;
    if upper < lower {
        tracing::warn!(lower, upper, "range lower bound exceeds upper; raising upper");
        upper = lower;
    }

    Ok(RangeEstimate {
        w_critical,
        ylu: ValueRange::new(lower, upper),
        y_good_max,
    })
}
