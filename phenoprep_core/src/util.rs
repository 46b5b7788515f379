//! Small numeric helpers shared by the stages.

use core::cmp::Ordering::Equal;

/// Sort a copy of the present values ascending. NaN never reaches here because
/// missing values are `None` by the time a stage runs.
pub fn sorted_present(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.into_iter().collect();
    v.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
    v
}

/// Sample quantile with linear interpolation between order statistics
/// (Hyndman & Fan type 7). `sorted` must be ascending and non-empty;
/// `p` is clamped to [0, 1].
#[inline]
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    Some(sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo]))
}

/// Sample standard deviation (n - 1 denominator) of the present values.
/// Returns `None` with fewer than two values.
pub fn sample_sd(values: &[Option<f64>]) -> Option<f64> {
    let mut n = 0usize;
    let mut mean = 0.0f64;
    let mut m2 = 0.0f64;
    // Welford
    for x in values.iter().flatten() {
        n += 1;
        let d = x - mean;
        mean += d / n as f64;
        m2 += d * (x - mean);
    }
    if n < 2 {
        return None;
    }
    Some((m2 / (n - 1) as f64).sqrt())
}

/// Mean of the present entries among `a` and `b`.
#[inline]
pub fn mean2(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(0.5 * (a + b)),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

/// Map NaN to `None` so "missing" has exactly one representation.
#[inline]
pub fn present(v: Option<f64>) -> Option<f64> {
    v.filter(|x| !x.is_nan())
}

/// Like [`present`], but infinities are missing too.
#[inline]
pub fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}
