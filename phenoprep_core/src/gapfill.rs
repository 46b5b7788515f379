//! Gap filling (stage 4).
//!
//! ## Design notes
//!
//! * **Bounded**: only runs of at most `maxgap` consecutive missing samples
//!   with a present value on both sides are interpolated.
//! * **Linear in t**: `v = v0 + (t - t0) / (t1 - t0) * (v1 - v0)`; on a
//!   regular grid this equals index interpolation.
//! * **Fallback**: whatever is still missing afterwards takes `missval`
//!   (for `y`; the covariate keeps its gaps).
//!
//! ## Invariants
//!
//! * `t` is strictly increasing (guaranteed by `InputSeries`).
//! * Present samples are never modified.

/// Default `maxgap` for a sampling frequency: `ceil(nptperyear / 12 * 1.5)`,
/// i.e. about one and a half months of samples.
#[inline]
pub fn default_maxgap(nptperyear: u32) -> usize {
    (f64::from(nptperyear) / 12.0 * 1.5).ceil() as usize
}

/// Linearly interpolate interior gaps of at most `maxgap` samples in place.
/// Returns the number of samples filled.
pub fn interpolate_bounded(t: &[f64], v: &mut [Option<f64>], maxgap: usize) -> usize {
    debug_assert_eq!(t.len(), v.len());
    let mut filled = 0;
    let mut left: Option<usize> = None;

    for i in 0..v.len() {
        let Some(v1) = v[i] else {
            continue;
        };
        if let Some(l) = left {
            let gap = i - l - 1;
            if gap > 0 && gap <= maxgap
                && let Some(v0) = v[l]
            {
                let (t0, t1) = (t[l], t[i]);
                let slope = (v1 - v0) / (t1 - t0);
                for j in (l + 1)..i {
                    v[j] = Some(v0 + (t[j] - t0) * slope);
                }
                filled += gap;
            }
        }
        left = Some(i);
    }
    filled
}

/// Floor weights: missing weight or missing value gives `wmin`, and any
/// weight `<= wmin` becomes exactly `wmin`.
pub fn floor_weights(w: &[Option<f64>], y: &[Option<f64>], wmin: f64) -> Vec<f64> {
    w.iter()
        .zip(y)
        .map(|(wi, yi)| match (wi, yi) {
            (Some(wt), Some(_)) if *wt > wmin => *wt,
            _ => wmin,
        })
        .collect()
}

/// Replace every remaining missing sample by `missval`.
/// Returns the filled series and how many samples took `missval`.
pub fn fill_missing(v: &[Option<f64>], missval: f64) -> (Vec<f64>, usize) {
    let mut n_fill = 0;
    let out: Vec<f64> = v
        .iter()
        .map(|x| {
            x.unwrap_or_else(|| {
                n_fill += 1;
                missval
            })
        })
        .collect();
    (out, n_fill)
}
