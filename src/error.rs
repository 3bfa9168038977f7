//! Error types for the demand-forecast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur during forecasting operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// No demand history was supplied. The engine catches this and
    /// switches to the basic forecast path; callers only see it when
    /// invoking the analysis functions directly.
    #[error("empty demand history")]
    EmptyHistory,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Caller contract violation in supplied demand data.
    #[error("invalid demand data: {0}")]
    InvalidInput(String),

    /// Calendar-date arithmetic failed.
    #[error("date error: {0}")]
    DateError(String),

    /// The external data source failed to deliver required inputs.
    #[error("data source error: {0}")]
    Source(String),
}
