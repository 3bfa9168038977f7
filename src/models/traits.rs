//! Model trait and shared result types for the forecast method bank.

use crate::core::DemandSeries;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Identity of a forecasting method, in fixed bank order.
///
/// The declaration order is the tie-break order used by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    SimpleAverage,
    ExponentialSmoothing,
    DoubleExponential,
    LinearRegression,
    WeightedMovingAverage,
}

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::SimpleAverage => "simple_average",
            MethodKind::ExponentialSmoothing => "exponential_smoothing",
            MethodKind::DoubleExponential => "double_exponential",
            MethodKind::LinearRegression => "linear_regression",
            MethodKind::WeightedMovingAverage => "weighted_moving_average",
        }
    }
}

/// Point forecast produced by one method, with its back-test score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodResult {
    pub kind: MethodKind,
    /// Horizon-length, non-negative, integral-valued predictions.
    pub predictions: Vec<f64>,
    /// Back-test accuracy percentage in [0, 100]; 0 when no back-test ran.
    pub accuracy: f64,
}

/// Common interface for all point-forecast methods.
///
/// Object-safe so the bank can hold `Box<dyn DemandModel>`. Methods are
/// stateless: each call is a pure function of the series and horizon.
pub trait DemandModel {
    /// Which bank entry this model is.
    fn kind(&self) -> MethodKind;

    /// Produce exactly `horizon` non-negative predictions.
    fn predict(&self, series: &DemandSeries, horizon: usize) -> Result<Vec<f64>>;
}

/// Type alias for boxed model trait objects.
pub type BoxedModel = Box<dyn DemandModel>;
