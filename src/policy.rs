//! Inventory policy: reorder point, stock status, confidence scoring and
//! replenishment recommendations.
//!
//! A pure, single-pass classification over metrics the earlier stages
//! already computed. The recommendation branching is an ordered rule
//! table evaluated once, first match wins, so the severity ordering is an
//! explicit contract rather than implicit code order.

use crate::analysis::{SeasonalityProfile, TrendDirection};
use crate::models::MethodKind;
use serde::{Deserialize, Serialize};

/// Stock level classification, in evaluation-precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    ReorderNow,
    LowStock,
    Overstock,
    Good,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::ReorderNow => "reorder_now",
            StockStatus::LowStock => "low_stock",
            StockStatus::Overstock => "overstock",
            StockStatus::Good => "good",
        }
    }
}

/// Recommendation priority tier, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Informational,
}

/// A single replenishment recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Tunable policy parameters. The defaults are the production values.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfig {
    /// Replenishment lead time in days.
    pub lead_time_days: u32,
    /// Safety factor applied to lead-time demand.
    pub base_safety_factor: f64,
    /// Safety factor once volatility crosses the threshold.
    pub elevated_safety_factor: f64,
    /// Coefficient-of-variation threshold for the elevated factor.
    pub volatility_threshold: f64,
    /// Multiplier applied when strong seasonality is present.
    pub seasonal_uplift: f64,
    /// Seasonality strength (percent) above which the uplift applies.
    pub seasonal_strength_threshold: f64,
    /// Floor for the reorder point.
    pub min_reorder_point: i64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            lead_time_days: 7,
            base_safety_factor: 1.5,
            elevated_safety_factor: 2.0,
            volatility_threshold: 0.5,
            seasonal_uplift: 1.2,
            seasonal_strength_threshold: 30.0,
            min_reorder_point: 5,
        }
    }
}

/// Stock threshold at or below which replenishment should be triggered.
pub fn reorder_point(
    daily_average: f64,
    volatility: f64,
    seasonality: &SeasonalityProfile,
    config: &PolicyConfig,
) -> i64 {
    let mut safety = if volatility > config.volatility_threshold {
        config.elevated_safety_factor
    } else {
        config.base_safety_factor
    };
    if seasonality.detected && seasonality.strength > config.seasonal_strength_threshold {
        safety *= config.seasonal_uplift;
    }

    let raw = (daily_average * config.lead_time_days as f64 * safety).ceil() as i64;
    raw.max(config.min_reorder_point)
}

/// Classify the stock level. Evaluated in strict precedence order; the
/// first matching condition wins.
pub fn classify(stock: i64, reorder_point: i64, total_predicted: f64) -> StockStatus {
    let stock_f = stock as f64;
    if stock <= 0 {
        StockStatus::OutOfStock
    } else if stock <= reorder_point {
        StockStatus::ReorderNow
    } else if stock_f < total_predicted {
        StockStatus::LowStock
    } else if stock_f > total_predicted * 2.0 {
        StockStatus::Overstock
    } else {
        StockStatus::Good
    }
}

/// Forecast confidence score in [0, 100].
///
/// Starts from a base of 60 and adjusts for history depth, volatility,
/// seasonality and the selected method. `method` is `None` on the
/// degraded basic path.
pub fn confidence(
    history_points: usize,
    volatility: f64,
    seasonality_detected: bool,
    method: Option<MethodKind>,
) -> u8 {
    let mut score: i64 = 60;

    score += match history_points {
        n if n >= 90 => 25,
        n if n >= 60 => 20,
        n if n >= 30 => 10,
        _ => -10,
    };

    if volatility < 0.2 {
        score += 10;
    } else if volatility > 0.6 {
        score -= 15;
    }

    if seasonality_detected {
        score += 5;
    }

    score += match method {
        Some(MethodKind::DoubleExponential) => 5,
        Some(MethodKind::LinearRegression) => 3,
        _ => 0,
    };

    score.clamp(0, 100) as u8
}

/// Everything the recommendation rules may consult.
#[derive(Debug, Clone)]
pub struct RecommendationContext<'a> {
    pub product_id: &'a str,
    pub status: StockStatus,
    pub seasonality: &'a SeasonalityProfile,
    pub trend: TrendDirection,
    /// Units available from the secondary supply source, when the lookup
    /// ran and found any.
    pub alternate_units: Option<i64>,
}

type RuleBuilder = fn(&RecommendationContext) -> Recommendation;

/// Status rules in severity order; the first entry matching the context's
/// status produces the primary recommendation.
const STATUS_RULES: &[(StockStatus, RuleBuilder)] = &[
    (StockStatus::OutOfStock, out_of_stock_rule),
    (StockStatus::ReorderNow, reorder_now_rule),
    (StockStatus::LowStock, low_stock_rule),
    (StockStatus::Overstock, overstock_rule),
];

/// Build the ordered recommendation list for a forecast.
///
/// Deterministic: the same context always yields the same list in the
/// same order. The primary status recommendation (if any) comes first,
/// followed by informational items for seasonality and trend.
pub fn recommendations(ctx: &RecommendationContext) -> Vec<Recommendation> {
    let mut items = Vec::new();

    if let Some((_, build)) = STATUS_RULES.iter().find(|(status, _)| *status == ctx.status) {
        items.push(build(ctx));
    }

    if ctx.seasonality.detected {
        items.push(seasonality_info(ctx.seasonality));
    }
    match ctx.trend {
        TrendDirection::Increasing => items.push(trend_info(
            "Demand trending upward",
            "Recent demand is rising; the current forecast may undershoot.",
            "Consider raising the reorder point for this product.",
        )),
        TrendDirection::Decreasing => items.push(trend_info(
            "Demand trending downward",
            "Recent demand is falling; the current forecast may overshoot.",
            "Watch for overstock as demand declines.",
        )),
        TrendDirection::Stable => {}
    }

    // Construction order is already priority-first; the sort makes the
    // severity contract explicit and keeps equal tiers in insertion order.
    items.sort_by_key(|r| r.severity);
    items
}

fn supply_action(ctx: &RecommendationContext) -> (String, String) {
    match ctx.alternate_units {
        Some(units) if units > 0 => (
            format!("Transfer stock from the central warehouse ({units} units available)."),
            format!("/warehouse/transfers/new?product={}", ctx.product_id),
        ),
        _ => (
            "Raise a purchase order with the supplier.".to_string(),
            format!("/purchasing/orders/new?product={}", ctx.product_id),
        ),
    }
}

fn out_of_stock_rule(ctx: &RecommendationContext) -> Recommendation {
    let (action, url) = supply_action(ctx);
    Recommendation {
        severity: Severity::Critical,
        title: "Out of stock".to_string(),
        message: "No stock remains while demand is forecast to continue.".to_string(),
        action,
        url: Some(url),
    }
}

fn reorder_now_rule(ctx: &RecommendationContext) -> Recommendation {
    let (action, url) = supply_action(ctx);
    Recommendation {
        severity: Severity::High,
        title: "Reorder point reached".to_string(),
        message: "Stock has dropped to the reorder point for the expected lead time."
            .to_string(),
        action,
        url: Some(url),
    }
}

fn low_stock_rule(_ctx: &RecommendationContext) -> Recommendation {
    Recommendation {
        severity: Severity::Medium,
        title: "Stock below forecast demand".to_string(),
        message: "Current stock will not cover the demand forecast for the horizon."
            .to_string(),
        action: "Review replenishment before the forecast window ends.".to_string(),
        url: None,
    }
}

fn overstock_rule(_ctx: &RecommendationContext) -> Recommendation {
    Recommendation {
        severity: Severity::Low,
        title: "Stock well above forecast demand".to_string(),
        message: "Current stock is more than double the forecast demand.".to_string(),
        action: "Consider redistribution or a promotion to reduce holding.".to_string(),
        url: None,
    }
}

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn seasonality_info(profile: &SeasonalityProfile) -> Recommendation {
    let peak = profile
        .day_factors
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    Recommendation {
        severity: Severity::Informational,
        title: "Weekly demand pattern".to_string(),
        message: format!(
            "Demand varies by weekday (strength {:.0}%), peaking on {}.",
            profile.strength, DAY_NAMES[peak]
        ),
        action: "Schedule replenishment around the weekly peak.".to_string(),
        url: None,
    }
}

fn trend_info(title: &str, message: &str, action: &str) -> Recommendation {
    Recommendation {
        severity: Severity::Informational,
        title: title.to_string(),
        message: message.to_string(),
        action: action.to_string(),
        url: None,
    }
}
