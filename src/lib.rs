//! # demand-forecast
//!
//! Demand forecasting engine for daily sales/movement series.
//!
//! Turns a noisy, gap-ridden history into a multi-day demand prediction,
//! a reorder point, a stock-status classification, a confidence estimate
//! and a ranked list of replenishment recommendations. The engine is a
//! pure function of its inputs plus an explicit "today" reference: data
//! retrieval, caching and persistence are the caller's concern.

pub mod analysis;
pub mod core;
pub mod engine;
pub mod error;
pub mod interval;
pub mod models;
pub mod policy;
pub mod preprocess;
pub mod selection;
pub mod source;
pub mod stats;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::analysis::{decompose, detect_weekly, SeasonalityProfile, TrendDirection};
    pub use crate::core::{DemandPoint, DemandSeries, ForecastResult};
    pub use crate::engine::{EngineConfig, ForecastEngine};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{DemandModel, MethodKind, MethodResult};
    pub use crate::policy::{Recommendation, Severity, StockStatus};
    pub use crate::source::{DemandSource, MemorySource};
}
