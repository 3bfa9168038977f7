//! Simple average forecasting model.

use crate::core::DemandSeries;
use crate::error::{ForecastError, Result};
use crate::models::{DemandModel, MethodKind};
use crate::stats;

/// Default lookback window for the averaging models.
pub(crate) const DEFAULT_WINDOW: usize = 14;

/// Forecasts the mean of the most recent observations, broadcast flat
/// across the horizon.
#[derive(Debug, Clone)]
pub struct SimpleAverage {
    window: usize,
}

impl SimpleAverage {
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

impl Default for SimpleAverage {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl DemandModel for SimpleAverage {
    fn kind(&self) -> MethodKind {
        MethodKind::SimpleAverage
    }

    fn predict(&self, series: &DemandSeries, horizon: usize) -> Result<Vec<f64>> {
        let values = series.quantities();
        if values.is_empty() {
            return Err(ForecastError::EmptyHistory);
        }

        let window = self.window.min(values.len());
        let avg = stats::mean(&values[values.len() - window..]);
        Ok(vec![stats::round_non_negative(avg); horizon])
    }
}
