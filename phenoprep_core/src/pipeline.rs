//! `check_input`: the four stages run in order over one series.
//!
//! 1. range estimation (`range`)
//! 2. reclassification (`reclassify`)
//! 3. spike masking (`spike`, optional)
//! 4. weight flooring and bounded gap filling (`gapfill`)
//!
//! Defaults are resolved once, up front, into `Resolved`; `missval` is resolved
//! right after stage 1 because it defaults to `ylu.lower`.
//!
//! A series with no present value skips the stages: `ylu` collapses to the
//! floor `max(ymin, 0)`, every sample takes `missval` and weight `wmin`.

use crate::config::{FALLBACK_NPTPERYEAR, PreprocessCfg};
use crate::error::Result;
use crate::gapfill::{default_maxgap, fill_missing, floor_weights, interpolate_bounded};
use crate::range::{estimate_range, select_w_critical};
use crate::reclassify::reclassify;
use crate::series::{InputSeries, PreprocessStats, TimeSeries, ValueRange};
use crate::spike::mask_spikes;
use crate::util::present;

/// Days per year used to infer the sampling frequency.
const DAYS_PER_YEAR: f64 = 365.0;

/// Configuration with every default filled in.
#[derive(Debug, Clone, Copy)]
struct Resolved {
    nptperyear: u32,
    maxgap: usize,
    alpha_high: f64,
    ymin: Option<f64>,
    missval: Option<f64>,
}

impl Resolved {
    fn new(input: &InputSeries, cfg: &PreprocessCfg) -> Self {
        let nptperyear = cfg
            .nptperyear
            .unwrap_or_else(|| infer_nptperyear(input.t()));
        Self {
            nptperyear,
            maxgap: cfg.maxgap.unwrap_or_else(|| default_maxgap(nptperyear)),
            alpha_high: cfg.alpha_high.unwrap_or(cfg.alpha),
            // NaN means "not given"
            ymin: present(cfg.ymin),
            missval: present(cfg.missval),
        }
    }
}

/// `ceil(365 / (t[1] - t[0]))`, or the fallback frequency for a single sample.
pub fn infer_nptperyear(t: &[f64]) -> u32 {
    match t {
        [t0, t1, ..] => {
            let npt = (DAYS_PER_YEAR / (t1 - t0)).ceil();
            // Saturating float-to-int cast; at least one sample per year.
            (npt as u32).max(1)
        }
        _ => {
            tracing::warn!(
                fallback = FALLBACK_NPTPERYEAR,
                "cannot infer nptperyear from fewer than two timestamps"
            );
            FALLBACK_NPTPERYEAR
        }
    }
}

/// Run the preprocessor over one series.
///
/// Errors:
/// - `BuildError::InvalidConfig` when `cfg` fails validation;
/// - `PreprocessError::EmptyQualifiedSubset` when values are present but none
///   of them reaches `w_critical`.
///
/// Every other condition, an all-missing `y` included, degrades to a fully
/// populated output.
pub fn check_input(input: &InputSeries, cfg: &PreprocessCfg) -> Result<TimeSeries> {
    cfg.validate()?;
    let n = input.len();
    let span = tracing::debug_span!("check_input", n);
    let _enter = span.enter();

    let r = Resolved::new(input, cfg);
    let mut y = input.y.clone();
    let mut w = input.w.clone().unwrap_or_else(|| vec![Some(1.0); n]);

    // 1) weight-critical threshold and robust range
    let w_critical = select_w_critical(&w, cfg.perc_wc, cfg.wmin);
    if y.iter().all(Option::is_none) {
        return Ok(all_missing(input, cfg, &r, w_critical));
    }
    let est = estimate_range(&y, &w, w_critical, cfg.alpha, r.alpha_high, r.ymin)?;
    let missval = r.missval.unwrap_or(est.ylu.lower);
    tracing::debug!(
        w_critical,
        ylu_lower = est.ylu.lower,
        ylu_upper = est.ylu.upper,
        y_good_max = est.y_good_max,
        missval,
        "range estimated"
    );

    // 2) demote and scrub out-of-range samples
    let rc = reclassify(&mut y, &mut w, &est, cfg.wmin, missval);
    tracing::debug!(demoted = rc.demoted, scrubbed = rc.scrubbed, "reclassified");

    // 3) transient spikes among low-confidence samples
    let spikes = if cfg.mask_spike {
        mask_spikes(&mut y, &w, w_critical)
    } else {
        0
    };
    tracing::debug!(spikes, enabled = cfg.mask_spike, "spike mask");

    // 4) floor weights (before filling: filled samples keep wmin), then fill
    let w_out = floor_weights(&w, &y, cfg.wmin);
    let interpolated = interpolate_bounded(input.t(), &mut y, r.maxgap);
    let (y_out, filled_missval) = fill_missing(&y, missval);
    let tn = fill_covariate(input, r.maxgap);
    tracing::debug!(
        maxgap = r.maxgap,
        interpolated,
        filled_missval,
        "gaps filled"
    );

    Ok(TimeSeries {
        t: input.t.clone(),
        y0: input.y.clone(),
        y: y_out,
        w: w_out,
        qc_flag: input.qc_flag.clone(),
        tn,
        ylu: est.ylu,
        nptperyear: r.nptperyear,
        south: cfg.south,
        stats: PreprocessStats {
            w_critical,
            demoted: rc.demoted,
            scrubbed: rc.scrubbed,
            spikes,
            interpolated,
            filled_missval,
        },
    })
}

/// Bounded interpolation of `tn`; over-long gaps stay missing.
fn fill_covariate(input: &InputSeries, maxgap: usize) -> Option<Vec<Option<f64>>> {
    input.tn.as_ref().map(|tn| {
        let mut tn = tn.clone();
        interpolate_bounded(input.t(), &mut tn, maxgap);
        tn
    })
}

/// Output for a series without a single present value.
fn all_missing(
    input: &InputSeries,
    cfg: &PreprocessCfg,
    r: &Resolved,
    w_critical: f64,
) -> TimeSeries {
    let n = input.len();
    let lower = r.ymin.map_or(0.0, |v| v.max(0.0));
    let missval = r.missval.unwrap_or(lower);
    tracing::warn!(n, lower, missval, "no present values; series filled with missval");

    TimeSeries {
        t: input.t.clone(),
        y0: input.y.clone(),
        y: vec![missval; n],
        w: vec![cfg.wmin; n],
        qc_flag: input.qc_flag.clone(),
        tn: fill_covariate(input, r.maxgap),
        ylu: ValueRange::new(lower, lower),
        nptperyear: r.nptperyear,
        south: cfg.south,
        stats: PreprocessStats {
            w_critical,
            filled_missval: n,
            ..PreprocessStats::default()
        },
    }
}
