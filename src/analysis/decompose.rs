//! Trend extraction via centered moving-average smoothing.

use crate::core::DemandSeries;
use crate::stats;
use serde::{Deserialize, Serialize};

/// Slope magnitude beyond which a trend counts as directional.
const SLOPE_THRESHOLD: f64 = 0.3;

/// Overall direction of the smoothed trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        }
    }
}

/// Trend component separated from a demand series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Smoothed trend, aligned 1:1 with the input series.
    pub trend: Vec<f64>,
    pub direction: TrendDirection,
    pub slope: f64,
}

/// Decompose a series into a centered moving-average trend and classify
/// its direction.
///
/// The smoothing window is `min(7, n / 3)`; at each index the window is
/// the inclusive index range clipped to the series bounds, so edges use a
/// shorter window rather than padding. The slope is the total trend rise
/// over the series length.
pub fn decompose(series: &DemandSeries) -> Decomposition {
    let values = series.quantities();
    let n = values.len();
    if n == 0 {
        return Decomposition {
            trend: Vec::new(),
            direction: TrendDirection::Stable,
            slope: 0.0,
        };
    }

    let window = 7usize.min(n / 3);
    let half = window / 2;
    let trend: Vec<f64> = (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(n - 1);
            stats::mean(&values[lo..=hi])
        })
        .collect();

    let slope = (trend[n - 1] - trend[0]) / n as f64;
    let direction = if slope > SLOPE_THRESHOLD {
        TrendDirection::Increasing
    } else if slope < -SLOPE_THRESHOLD {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    Decomposition {
        trend,
        direction,
        slope,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_series(values: Vec<f64>) -> DemandSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| start + chrono::Days::new(i as u64))
            .collect();
        DemandSeries::new(dates, values).unwrap()
    }

    #[test]
    fn flat_series_is_stable() {
        let series = make_series(vec![10.0; 30]);
        let decomp = decompose(&series);

        assert_eq!(decomp.direction, TrendDirection::Stable);
        assert_relative_eq!(decomp.slope, 0.0, epsilon = 1e-10);
        for &t in &decomp.trend {
            assert_relative_eq!(t, 10.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn increasing_ramp_is_detected() {
        let series = make_series((1..=60).map(|i| i as f64).collect());
        let decomp = decompose(&series);

        assert_eq!(decomp.direction, TrendDirection::Increasing);
        assert!(decomp.slope > 0.3);
        assert_eq!(decomp.trend.len(), 60);
    }

    #[test]
    fn decreasing_ramp_is_detected() {
        let series = make_series((1..=60).rev().map(|i| i as f64).collect());
        let decomp = decompose(&series);
        assert_eq!(decomp.direction, TrendDirection::Decreasing);
    }

    #[test]
    fn trend_window_clips_at_edges() {
        // Window is min(7, 12/3) = 4, half-window 2: index 0 averages
        // indices 0..=2, the center averages a full 5-wide range.
        let series = make_series((0..12).map(|i| i as f64).collect());
        let decomp = decompose(&series);

        assert_relative_eq!(decomp.trend[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(decomp.trend[5], 5.0, epsilon = 1e-10);
        assert_relative_eq!(decomp.trend[11], 10.0, epsilon = 1e-10);
    }

    #[test]
    fn short_series_uses_identity_trend() {
        // n < 3 makes the window 0, so the trend mirrors the raw values.
        let series = make_series(vec![3.0, 9.0]);
        let decomp = decompose(&series);
        assert_eq!(decomp.trend, vec![3.0, 9.0]);
    }

    #[test]
    fn gentle_slope_stays_stable() {
        // Rises 0.1/day: slope well under the 0.3 threshold.
        let series = make_series((0..30).map(|i| 10.0 + 0.1 * i as f64).collect());
        let decomp = decompose(&series);
        assert_eq!(decomp.direction, TrendDirection::Stable);
    }
}
