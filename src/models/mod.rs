//! Forecast method bank: five independent point-forecast algorithms.

mod holt;
mod linear_regression;
mod ses;
mod simple_average;
mod traits;
mod weighted_average;

pub use holt::DoubleExponential;
pub use linear_regression::LinearRegression;
pub use ses::ExponentialSmoothing;
pub use simple_average::SimpleAverage;
pub use traits::{BoxedModel, DemandModel, MethodKind, MethodResult};
pub use weighted_average::WeightedMovingAverage;

/// The full method bank in its fixed evaluation (and tie-break) order.
pub fn method_bank() -> Vec<BoxedModel> {
    vec![
        Box::new(SimpleAverage::default()),
        Box::new(ExponentialSmoothing::default()),
        Box::new(DoubleExponential::default()),
        Box::new(LinearRegression::default()),
        Box::new(WeightedMovingAverage::default()),
    ]
}
