//! Day-of-week seasonality detection.

use crate::core::DemandSeries;
use crate::stats;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Minimum observations (two full weeks) before weekday grouping is
/// meaningful.
const MIN_POINTS: usize = 14;

/// Detection threshold on the raw dispersion ratio (before the ×100
/// scaling into a percentage).
const DETECTION_THRESHOLD: f64 = 0.20;

/// Label for the detected seasonal shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalPattern {
    Weekly,
    None,
}

/// Day-of-week demand profile.
///
/// `day_factors` are multiplicative factors indexed by weekday with
/// Monday at 0; their mean is ≈ 1 when a pattern is detected and exactly
/// 1 everywhere when it is not (or when mean weekday demand is zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityProfile {
    pub detected: bool,
    /// Dispersion of weekday averages as a percentage of their mean.
    pub strength: f64,
    pub day_factors: [f64; 7],
    pub pattern: SeasonalPattern,
}

impl SeasonalityProfile {
    /// Profile reporting no seasonality: neutral factors everywhere.
    pub fn flat() -> Self {
        Self {
            detected: false,
            strength: 0.0,
            day_factors: [1.0; 7],
            pattern: SeasonalPattern::None,
        }
    }

    /// Multiplicative factor for the weekday of `date`.
    pub fn factor_for(&self, date: NaiveDate) -> f64 {
        self.day_factors[date.weekday().num_days_from_monday() as usize]
    }
}

/// Detect a weekly demand pattern from a preprocessed series.
///
/// Quantities are grouped by weekday (Monday = 0) and averaged; the
/// strength is the population standard deviation of the seven averages
/// relative to their mean. Fewer than 14 points, or a zero mean, yields
/// the flat profile.
pub fn detect_weekly(series: &DemandSeries) -> SeasonalityProfile {
    if series.len() < MIN_POINTS {
        return SeasonalityProfile::flat();
    }

    let mut sums = [0.0f64; 7];
    let mut counts = [0usize; 7];
    for point in series.iter() {
        let day = point.date.weekday().num_days_from_monday() as usize;
        sums[day] += point.quantity;
        counts[day] += 1;
    }

    let mut day_averages = [0.0f64; 7];
    for day in 0..7 {
        if counts[day] > 0 {
            day_averages[day] = sums[day] / counts[day] as f64;
        }
    }

    let overall = stats::mean(&day_averages);
    if overall == 0.0 {
        return SeasonalityProfile::flat();
    }

    let ratio = stats::population_std_dev(&day_averages) / overall;
    let detected = ratio > DETECTION_THRESHOLD;

    // Factors stay neutral unless a pattern is actually detected.
    let mut day_factors = [1.0f64; 7];
    if detected {
        for day in 0..7 {
            day_factors[day] = day_averages[day] / overall;
        }
    }

    SeasonalityProfile {
        detected,
        strength: ratio * 100.0,
        day_factors,
        pattern: if detected {
            SeasonalPattern::Weekly
        } else {
            SeasonalPattern::None
        },
    }
}
