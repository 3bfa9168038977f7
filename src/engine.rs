//! Forecast orchestration.
//!
//! Wires the pipeline together: preprocess, analyze, run the method
//! bank, select a winner, apply the weekly profile, bound the result and
//! classify the stock position. A single invocation is a deterministic
//! function of (source data, horizon, today); "today" is always an
//! explicit parameter so runs are reproducible in tests.

use crate::analysis::{decompose, detect_weekly, SeasonalityProfile, TrendDirection};
use crate::core::ForecastResult;
use crate::error::{ForecastError, Result};
use crate::interval;
use crate::policy::{self, PolicyConfig, RecommendationContext, StockStatus};
use crate::preprocess;
use crate::selection;
use crate::source::DemandSource;
use crate::stats;
use chrono::{Days, NaiveDate};

/// Daily demand assumed on the basic path when no history exists.
const BASIC_DAILY_ESTIMATE: f64 = 1.0;

/// Confidence reported on the basic path.
const BASIC_CONFIDENCE: u8 = 20;

/// Engine-level configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Days of history requested from the data source.
    pub lookback_days: u32,
    pub policy: PolicyConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookback_days: 90,
            policy: PolicyConfig::default(),
        }
    }
}

/// The demand forecasting engine.
///
/// Stateless between calls; safe to share across threads and products.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: EngineConfig,
}

impl ForecastEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Produce a full forecast for one (product, store-or-all) pair.
    ///
    /// An empty demand history is not a fault: the engine falls back to a
    /// conservative basic forecast with confidence pinned low. All other
    /// data problems surface as errors.
    pub fn forecast<S: DemandSource>(
        &self,
        source: &S,
        product_id: &str,
        store_id: Option<&str>,
        horizon: usize,
        today: NaiveDate,
    ) -> Result<ForecastResult> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon must be at least 1 day".to_string(),
            ));
        }

        let raw = source.historical_demand(product_id, store_id, self.config.lookback_days)?;
        let stock = source.current_stock(product_id, store_id)?;

        let series = match preprocess::preprocess(&raw) {
            Ok(series) => series,
            Err(ForecastError::EmptyHistory) => {
                tracing::debug!(product = product_id, "no demand history, using basic forecast");
                return self.basic_forecast(source, product_id, store_id, stock, horizon);
            }
            Err(err) => return Err(err),
        };

        let decomposition = decompose(&series);
        let seasonality = detect_weekly(&series);

        let winner = selection::select_best(&series, horizon)?;
        tracing::debug!(
            product = product_id,
            points = series.len(),
            method = winner.kind.as_str(),
            accuracy = winner.accuracy,
            "selected forecast method"
        );

        let predictions = apply_weekly_profile(&winner.predictions, &seasonality, today);
        let interval = interval::estimate(series.quantities(), &predictions);

        let daily_average = stats::mean(series.quantities());
        let volatility = stats::coefficient_of_variation(series.quantities());
        let total_predicted: f64 = predictions.iter().sum();

        let reorder_point = policy::reorder_point(
            daily_average,
            volatility,
            &seasonality,
            &self.config.policy,
        );
        let status = policy::classify(stock, reorder_point, total_predicted);
        let confidence = policy::confidence(
            series.len(),
            volatility,
            seasonality.detected,
            Some(winner.kind),
        );

        let alternate_units = self.alternate_units_for(source, product_id, status)?;
        let recommendations = policy::recommendations(&RecommendationContext {
            product_id,
            status,
            seasonality: &seasonality,
            trend: decomposition.direction,
            alternate_units,
        });

        Ok(ForecastResult {
            product_id: product_id.to_string(),
            store_id: store_id.map(String::from),
            current_stock: stock.max(0),
            daily_average,
            trend: decomposition.direction,
            total_predicted,
            reorder_point,
            status,
            confidence,
            method: Some(winner.kind),
            predictions,
            interval,
            seasonality,
            recommendations,
        })
    }

    /// Conservative fallback when no history exists: a flat 1 unit/day
    /// estimate, the minimal reorder floor and pinned-low confidence.
    fn basic_forecast<S: DemandSource>(
        &self,
        source: &S,
        product_id: &str,
        store_id: Option<&str>,
        stock: i64,
        horizon: usize,
    ) -> Result<ForecastResult> {
        let predictions = vec![BASIC_DAILY_ESTIMATE; horizon];
        let total_predicted = BASIC_DAILY_ESTIMATE * horizon as f64;
        let interval = interval::estimate(&[], &predictions);

        let reorder_point = self.config.policy.min_reorder_point;
        let status = policy::classify(stock, reorder_point, total_predicted);
        let seasonality = SeasonalityProfile::flat();

        let alternate_units = self.alternate_units_for(source, product_id, status)?;
        let recommendations = policy::recommendations(&RecommendationContext {
            product_id,
            status,
            seasonality: &seasonality,
            trend: TrendDirection::Stable,
            alternate_units,
        });

        Ok(ForecastResult {
            product_id: product_id.to_string(),
            store_id: store_id.map(String::from),
            current_stock: stock.max(0),
            daily_average: BASIC_DAILY_ESTIMATE,
            trend: TrendDirection::Stable,
            total_predicted,
            reorder_point,
            status,
            confidence: BASIC_CONFIDENCE,
            method: None,
            predictions,
            interval,
            seasonality,
            recommendations,
        })
    }

    /// The secondary supply source is only consulted for the statuses
    /// whose recommendations can act on it.
    fn alternate_units_for<S: DemandSource>(
        &self,
        source: &S,
        product_id: &str,
        status: StockStatus,
    ) -> Result<Option<i64>> {
        match status {
            StockStatus::OutOfStock | StockStatus::ReorderNow => {
                source.alternate_supply(product_id)
            }
            _ => Ok(None),
        }
    }
}

/// Re-weight predictions by the weekday factor of the calendar day each
/// one lands on. Prediction k covers `today + k + 1` days.
fn apply_weekly_profile(
    predictions: &[f64],
    profile: &SeasonalityProfile,
    today: NaiveDate,
) -> Vec<f64> {
    if !profile.detected {
        return predictions.to_vec();
    }

    predictions
        .iter()
        .enumerate()
        .map(|(k, &p)| {
            let factor = today
                .checked_add_days(Days::new(k as u64 + 1))
                .map(|date| profile.factor_for(date))
                .unwrap_or(1.0);
            stats::round_non_negative(p * factor)
        })
        .collect()
}
