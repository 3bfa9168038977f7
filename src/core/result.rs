//! Aggregate forecast result returned to callers.

use crate::analysis::{SeasonalityProfile, TrendDirection};
use crate::interval::ConfidenceInterval;
use crate::models::MethodKind;
use crate::policy::{Recommendation, StockStatus};
use serde::{Deserialize, Serialize};

/// Complete outcome of one forecast invocation.
///
/// An immutable value object created fresh per call; it has no identity
/// beyond the call and is never mutated after construction. Concurrent
/// invocations for different products share nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub product_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    /// Current stock, floored at 0 for display.
    pub current_stock: i64,
    /// Mean daily demand over the preprocessed history.
    pub daily_average: f64,
    pub trend: TrendDirection,
    /// Sum of the predictions over the horizon.
    pub total_predicted: f64,
    pub reorder_point: i64,
    pub status: StockStatus,
    /// Confidence score in [0, 100].
    pub confidence: u8,
    /// Winning method; `None` when the degraded basic path produced the
    /// forecast.
    pub method: Option<MethodKind>,
    /// Daily predictions for the horizon, seasonally adjusted.
    pub predictions: Vec<f64>,
    pub interval: ConfidenceInterval,
    pub seasonality: SeasonalityProfile,
    /// Priority-ordered recommendations.
    pub recommendations: Vec<Recommendation>,
}

impl ForecastResult {
    /// Forecast horizon in days.
    pub fn horizon(&self) -> usize {
        self.predictions.len()
    }
}
