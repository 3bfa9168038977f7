//! Ordinary least squares trend-line forecasting model.

use crate::core::DemandSeries;
use crate::error::{ForecastError, Result};
use crate::models::{DemandModel, MethodKind};
use crate::stats;

/// Ordinary least squares regression of quantity against a 1-based day
/// index, extrapolated over the horizon.
///
/// A degenerate denominator (single-point series) yields slope 0 and the
/// series mean as intercept rather than an arithmetic fault.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression;

impl LinearRegression {
    pub fn new() -> Self {
        Self
    }

    /// Fit (slope, intercept) over 1-based day indices.
    fn fit(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let sum_x: f64 = (1..=values.len()).map(|x| x as f64).sum();
        let sum_y: f64 = values.iter().sum();
        let sum_xy: f64 = values
            .iter()
            .enumerate()
            .map(|(i, &y)| (i + 1) as f64 * y)
            .sum();
        let sum_x2: f64 = (1..=values.len()).map(|x| (x as f64).powi(2)).sum();

        let denominator = n * sum_x2 - sum_x * sum_x;
        if denominator == 0.0 {
            return (0.0, stats::mean(values));
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;
        (slope, intercept)
    }
}

impl DemandModel for LinearRegression {
    fn kind(&self) -> MethodKind {
        MethodKind::LinearRegression
    }

    fn predict(&self, series: &DemandSeries, horizon: usize) -> Result<Vec<f64>> {
        let values = series.quantities();
        if values.is_empty() {
            return Err(ForecastError::EmptyHistory);
        }

        let n = values.len() as f64;
        let (slope, intercept) = Self::fit(values);
        Ok((1..=horizon)
            .map(|k| stats::round_non_negative(slope * (n + k as f64) + intercept))
            .collect())
    }
}
