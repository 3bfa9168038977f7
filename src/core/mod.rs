//! Core data structures: demand series and forecast results.

mod result;
mod series;

pub use result::ForecastResult;
pub use series::{DemandPoint, DemandSeries};
