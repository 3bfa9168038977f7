//! Double exponential smoothing (Holt's linear trend) model.

use crate::core::DemandSeries;
use crate::error::{ForecastError, Result};
use crate::models::ses::ExponentialSmoothing;
use crate::models::{DemandModel, MethodKind};

/// Default level smoothing parameter.
pub(crate) const DEFAULT_ALPHA: f64 = 0.3;
/// Default trend smoothing parameter.
pub(crate) const DEFAULT_BETA: f64 = 0.1;

/// Holt's double exponential smoothing.
///
/// Tracks a level and a trend component:
/// - `level[i] = α·q[i] + (1-α)·(level[i-1] + trend[i-1])`
/// - `trend[i] = β·(level[i] - level[i-1]) + (1-β)·trend[i-1]`
/// - `forecast[k] = max(0, round(level_last + k·trend_last))`
///
/// Falls back to single exponential smoothing when the series has fewer
/// than two points, since no initial trend can be formed.
#[derive(Debug, Clone)]
pub struct DoubleExponential {
    alpha: f64,
    beta: f64,
}

impl DoubleExponential {
    /// Create with fixed smoothing parameters, each clamped to (0, 1).
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0001, 0.9999),
            beta: beta.clamp(0.0001, 0.9999),
        }
    }

    /// Get the level smoothing parameter.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Get the trend smoothing parameter.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Final (level, trend) state over the whole series.
    fn final_state(&self, values: &[f64]) -> (f64, f64) {
        let mut level = values[0];
        let mut trend = values[1] - values[0];

        for &q in &values[1..] {
            let prev_level = level;
            level = self.alpha * q + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (level - prev_level) + (1.0 - self.beta) * trend;
        }

        (level, trend)
    }
}

impl Default for DoubleExponential {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA, DEFAULT_BETA)
    }
}

impl DemandModel for DoubleExponential {
    fn kind(&self) -> MethodKind {
        MethodKind::DoubleExponential
    }

    fn predict(&self, series: &DemandSeries, horizon: usize) -> Result<Vec<f64>> {
        let values = series.quantities();
        if values.is_empty() {
            return Err(ForecastError::EmptyHistory);
        }
        if values.len() < 2 {
            return ExponentialSmoothing::new(self.alpha).predict(series, horizon);
        }

        let (level, trend) = self.final_state(values);
        Ok((1..=horizon)
            .map(|k| (level + k as f64 * trend).round().max(0.0))
            .collect())
    }
}
