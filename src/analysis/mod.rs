//! Pure signal analysis over a preprocessed demand series.
//!
//! Both analyses are independent consumers of the series and carry no
//! state; they can run in any order.

mod decompose;
mod seasonality;

pub use decompose::{decompose, Decomposition, TrendDirection};
pub use seasonality::{detect_weekly, SeasonalPattern, SeasonalityProfile};
