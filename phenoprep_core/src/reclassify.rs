//! Weight and value reclassification (stage 2).
//!
//! Per present sample `v`, applied in this order:
//! 1. `v < ylu.lower` or `v > y_good_max`: weight becomes `wmin`;
//! 2. `v < ylu.lower`: value becomes `missval`;
//! 3. value `> ylu.upper` and weight `< w_critical`: value becomes `missval`.
//!
//! Demotion tests `y_good_max`, scrubbing tests `ylu.upper`; the two bounds
//! are not interchangeable. A trusted value above `ylu.upper` keeps its value:
//! the upper bound never truncates the signal.

use crate::range::RangeEstimate;

/// Counts of samples touched by `reclassify`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reclassified {
    pub demoted: usize,
    pub scrubbed: usize,
}

/// `demoted` counts samples whose weight actually changed to `wmin`.
#[allow(clippy::float_cmp)]
pub fn reclassify(
    y: &mut [Option<f64>],
    w: &mut [Option<f64>],
    est: &RangeEstimate,
    wmin: f64,
    missval: f64,
) -> Reclassified {
    let lower = est.ylu.lower;
    let upper = est.ylu.upper;
    let mut out = Reclassified::default();

    for (yi, wi) in y.iter_mut().zip(w.iter_mut()) {
        let Some(v) = *yi else {
            continue;
        };
        if (v < lower || v > est.y_good_max) && *wi != Some(wmin) {
            *wi = Some(wmin);
            out.demoted += 1;
        }

        let mut cur = v;
        let mut scrubbed = false;
        if cur < lower {
            cur = missval;
            scrubbed = true;
        }
        if cur > upper && wi.is_some_and(|wt| wt < est.w_critical) {
            cur = missval;
            scrubbed = true;
        }
        if scrubbed {
            *yi = Some(cur);
            out.scrubbed += 1;
        }
    }
    out
}
