//! Single exponential smoothing forecasting model.
//!
//! Suitable for series with no strong trend; also the mandatory fallback
//! whenever history is too short to back-test.

use crate::core::DemandSeries;
use crate::error::{ForecastError, Result};
use crate::models::{DemandModel, MethodKind};
use crate::stats;

/// Default smoothing parameter.
pub(crate) const DEFAULT_ALPHA: f64 = 0.3;

/// Single exponential smoothing.
///
/// `smoothed[0] = q[0]`, `smoothed[i] = α·q[i] + (1-α)·smoothed[i-1]`;
/// the final smoothed level is broadcast flat across the horizon.
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
}

impl ExponentialSmoothing {
    /// Create with a fixed smoothing parameter, clamped to (0, 1).
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0001, 0.9999),
        }
    }

    /// Get the smoothing parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Final smoothed level over the whole series.
    pub(crate) fn final_level(&self, values: &[f64]) -> f64 {
        let mut level = values[0];
        for &q in &values[1..] {
            level = self.alpha * q + (1.0 - self.alpha) * level;
        }
        level
    }
}

impl Default for ExponentialSmoothing {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

impl DemandModel for ExponentialSmoothing {
    fn kind(&self) -> MethodKind {
        MethodKind::ExponentialSmoothing
    }

    fn predict(&self, series: &DemandSeries, horizon: usize) -> Result<Vec<f64>> {
        let values = series.quantities();
        if values.is_empty() {
            return Err(ForecastError::EmptyHistory);
        }

        let level = self.final_level(values);
        Ok(vec![stats::round_non_negative(level); horizon])
    }
}
