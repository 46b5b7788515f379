//! Post-fit range guard.
//!
//! Fitted curves are clamped from below only: values under `ylu.lower` are
//! raised to it, values above `ylu.upper` pass through so peak amplitude is
//! never suppressed. `NaN` passes through unchanged.

use crate::series::ValueRange;

impl ValueRange {
    /// Clamp a single fitted value to the lower bound.
    #[inline]
    pub fn clamp(&self, v: f64) -> f64 {
        if v < self.lower { self.lower } else { v }
    }
}

/// Clamp a fitted curve in place against `ylu`. Idempotent.
pub fn check_ylu(yfit: &mut [f64], ylu: ValueRange) {
    for v in yfit.iter_mut() {
        *v = ylu.clamp(*v);
    }
}
