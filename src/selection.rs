//! Back-tested model selection.
//!
//! Every bank method is scored against a held-out tail of history and
//! the most accurate one wins. The comparison deliberately reuses a
//! prefix of each method's full-series forecast as a stand-in for what
//! it would have predicted from the training split alone; this is the
//! behavior of the system being reimplemented and is preserved for
//! compatibility.

use crate::core::DemandSeries;
use crate::error::{ForecastError, Result};
use crate::models::{method_bank, MethodKind, MethodResult};

/// Minimum history length before back-testing is considered reliable.
pub const BACKTEST_MIN_POINTS: usize = 14;

/// Fraction of history held out for the back-test tail.
const TEST_FRACTION: f64 = 0.2;

/// Maximum back-test tail length in days.
const MAX_TEST_SIZE: usize = 7;

/// Run every bank method at the requested horizon and score it against
/// the held-out tail. Results come back in bank order.
///
/// Below [`BACKTEST_MIN_POINTS`] no back-test runs and every accuracy is
/// reported as 0.
pub fn evaluate_all(series: &DemandSeries, horizon: usize) -> Result<Vec<MethodResult>> {
    let n = series.len();
    if n == 0 {
        return Err(ForecastError::EmptyHistory);
    }

    let test_size = if n < BACKTEST_MIN_POINTS {
        0
    } else {
        MAX_TEST_SIZE.min((n as f64 * TEST_FRACTION).floor() as usize)
    };
    let tail = &series.quantities()[n - test_size..];

    method_bank()
        .iter()
        .map(|model| {
            let predictions = model.predict(series, horizon)?;
            let accuracy = if test_size == 0 {
                0.0
            } else {
                backtest_accuracy(&predictions, tail)
            };
            Ok(MethodResult {
                kind: model.kind(),
                predictions,
                accuracy,
            })
        })
        .collect()
}

/// Pick the winning method for a series and horizon.
///
/// With fewer than [`BACKTEST_MIN_POINTS`] observations the back-test is
/// unreliable and single exponential smoothing is mandated. Otherwise the
/// method with the highest accuracy wins; ties break toward the earlier
/// bank entry.
pub fn select_best(series: &DemandSeries, horizon: usize) -> Result<MethodResult> {
    let results = evaluate_all(series, horizon)?;

    if series.len() < BACKTEST_MIN_POINTS {
        return results
            .into_iter()
            .find(|r| r.kind == MethodKind::ExponentialSmoothing)
            .ok_or(ForecastError::EmptyHistory);
    }

    let mut best: Option<MethodResult> = None;
    for result in results {
        let better = match &best {
            Some(current) => result.accuracy > current.accuracy,
            None => true,
        };
        if better {
            best = Some(result);
        }
    }
    best.ok_or(ForecastError::EmptyHistory)
}

/// Accuracy percentage from MAPE against the held-out tail.
///
/// The first `tail.len()` predictions stand in for the held-out period.
/// Days with a zero actual are skipped to avoid division by zero; if
/// every tail day is zero the MAPE defaults to 1.0 (worst case).
fn backtest_accuracy(predictions: &[f64], tail: &[f64]) -> f64 {
    let mut total = 0.0;
    let mut counted = 0usize;
    for (&actual, &predicted) in tail.iter().zip(predictions.iter()) {
        if actual == 0.0 {
            continue;
        }
        total += ((actual - predicted) / actual).abs();
        counted += 1;
    }

    let mape = if counted == 0 {
        1.0
    } else {
        total / counted as f64
    };
    ((1.0 - mape) * 100.0).max(0.0)
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
    fn short_history_mandates_exponential_smoothing() {
        let series = make_series(vec![4.0; 13]);
        let winner = select_best(&series, 7).unwrap();

        assert_eq!(winner.kind, MethodKind::ExponentialSmoothing);
        assert_eq!(winner.accuracy, 0.0);
        assert_eq!(winner.predictions.len(), 7);
    }

    #[test]
    fn flat_series_ties_break_to_simple_average() {
        // Every method predicts exactly 10, so every accuracy is 100 and
        // the first bank entry wins.
        let series = make_series(vec![10.0; 30]);
        let winner = select_best(&series, 7).unwrap();

        assert_eq!(winner.kind, MethodKind::SimpleAverage);
        assert_relative_eq!(winner.accuracy, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn accuracy_reflects_tail_error() {
        // Flat series: predictions match the tail exactly.
        let series = make_series(vec![10.0; 20]);
        let results = evaluate_all(&series, 7).unwrap();

        assert_eq!(results.len(), 5);
        for result in &results {
            assert_relative_eq!(result.accuracy, 100.0, epsilon = 1e-10);
            assert!(result.accuracy >= 0.0 && result.accuracy <= 100.0);
        }
    }

    #[test]
    fn all_zero_tail_defaults_to_worst_mape() {
        // 20 days ending in a week of zeros: MAPE pins at 1.0 so every
        // accuracy is 0.
        let mut values = vec![10.0; 16];
        values.extend(vec![0.0; 4]);
        let series = make_series(values);
        let results = evaluate_all(&series, 7).unwrap();

        for result in &results {
            assert_eq!(result.accuracy, 0.0, "method {}", result.kind.as_str());
        }
    }

    #[test]
    fn test_size_scales_with_history() {
        // n = 20 -> test_size = min(7, 4) = 4: only the last 4 days are
        // scored. Make the fifth-from-last day absurd to prove it is
        // outside the tail.
        let mut values = vec![10.0; 20];
        values[15] = 1000.0;
        let series = make_series(values);
        let results = evaluate_all(&series, 7).unwrap();

        // Simple average is dragged up by the outlier inside its window,
        // but its accuracy is still scored only against the last 4 days.
        let sa = &results[0];
        assert_eq!(sa.kind, MethodKind::SimpleAverage);
        let expected_pred = ((10.0 * 13.0 + 1000.0) / 14.0f64).round();
        assert_relative_eq!(sa.predictions[0], expected_pred, epsilon = 1e-10);
        let expected_accuracy =
            (1.0 - (expected_pred - 10.0) / 10.0).max(0.0) * 100.0;
        assert_relative_eq!(sa.accuracy, expected_accuracy, epsilon = 1e-10);
    }

    #[test]
    fn winner_has_maximal_accuracy() {
        // A noisy-but-level series: whatever wins must not be beaten by
        // any other bank entry.
        let values: Vec<f64> = (0..40)
            .map(|i| 20.0 + ((i * 7) % 5) as f64)
            .collect();
        let series = make_series(values);

        let results = evaluate_all(&series, 10).unwrap();
        let winner = select_best(&series, 10).unwrap();
        for result in &results {
            assert!(winner.accuracy >= result.accuracy);
        }
    }

    #[test]
    fn empty_series_is_an_error() {
        let series = DemandSeries::new(vec![], vec![]).unwrap();
        assert!(matches!(
            select_best(&series, 7),
            Err(ForecastError::EmptyHistory)
        ));
    }
}
