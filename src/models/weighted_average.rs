//! Weighted moving average forecasting model.

use crate::core::DemandSeries;
use crate::error::{ForecastError, Result};
use crate::models::simple_average::DEFAULT_WINDOW;
use crate::models::{DemandModel, MethodKind};
use crate::stats;

/// Linearly weighted mean of the most recent observations, broadcast
/// flat across the horizon. Weights run 1..=window with the newest
/// observation weighted heaviest.
#[derive(Debug, Clone)]
pub struct WeightedMovingAverage {
    window: usize,
}

impl WeightedMovingAverage {
    /// Create with the given lookback window (capped at the series length
    /// during prediction).
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// Get the lookback window.
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for WeightedMovingAverage {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl DemandModel for WeightedMovingAverage {
    fn kind(&self) -> MethodKind {
        MethodKind::WeightedMovingAverage
    }

    fn predict(&self, series: &DemandSeries, horizon: usize) -> Result<Vec<f64>> {
        let values = series.quantities();
        if values.is_empty() {
            return Err(ForecastError::EmptyHistory);
        }

        let window = self.window.min(values.len());
        let tail = &values[values.len() - window..];

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for (i, &q) in tail.iter().enumerate() {
            let weight = (i + 1) as f64;
            weighted_sum += weight * q;
            weight_total += weight;
        }

        Ok(vec![
            stats::round_non_negative(weighted_sum / weight_total);
            horizon
        ])
    }
}
