//! Spike detection (stage 3).
//!
//! A sample is a spike when it deviates from the mean of its two neighbours by
//! more than `2 * sd(y)` and its weight is below `w_critical`. Spikes are set to
//! missing and left for the gap filler; trusted samples are never touched.

use crate::util::{mean2, sample_sd};

/// Deviation threshold in standard deviations (~95.4% normal interval).
pub const SPIKE_SD_FACTOR: f64 = 2.0;

/// Two-point centered mean with boundary padding.
///
/// `m[0] = mean(y[0], y[1])`, `m[i] = mean(y[i-1], y[i+1])`,
/// `m[n-1] = mean(y[n-2], y[n-1])`. Missing neighbours are skipped; with no
/// present neighbour the entry is `None`. A single sample is its own mean.
pub fn centered_mean(y: &[Option<f64>]) -> Vec<Option<f64>> {
    let n = y.len();
    match n {
        0 => Vec::new(),
        1 => vec![y[0]],
        _ => (0..n)
            .map(|i| {
                let (a, b) = if i == 0 {
                    (0, 1)
                } else if i == n - 1 {
                    (n - 2, n - 1)
                } else {
                    (i - 1, i + 1)
                };
                mean2(y[a], y[b])
            })
            .collect(),
    }
}

/// Null out spikes in place and return how many were removed.
///
/// A constant series (`sd == 0`) never yields a spike; nor does a series with
/// fewer than two present values.
pub fn mask_spikes(y: &mut [Option<f64>], w: &[Option<f64>], w_critical: f64) -> usize {
    let Some(sd) = sample_sd(y) else {
        return 0;
    };
    let threshold = SPIKE_SD_FACTOR * sd;
    let ymean = centered_mean(y);

    let flagged: Vec<usize> = y
        .iter()
        .zip(&ymean)
        .zip(w)
        .enumerate()
        .filter_map(|(i, ((yi, mi), wi))| match (yi, mi, wi) {
            (Some(v), Some(m), Some(wt)) if (v - m).abs() > threshold && *wt < w_critical => {
                Some(i)
            }
            _ => None,
        })
        .collect();

    for &i in &flagged {
        y[i] = None;
    }
    if !flagged.is_empty() {
        tracing::trace!(indices = ?flagged, threshold, "spikes masked");
    }
    flagged.len()
}
