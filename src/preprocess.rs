//! Series preprocessing: gap filling and outlier capping.
//!
//! Raw query output arrives as unordered (date, quantity) pairs with
//! missing days and occasional extreme values from bulk movements. The
//! preprocessor turns that into a contiguous daily series suitable for
//! the analysis and forecasting stages.

use crate::core::DemandSeries;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// IQR multiplier for the outlier capping bounds.
const IQR_MULTIPLIER: f64 = 1.5;

/// Minimum number of points for outlier capping to run at all.
const MIN_POINTS_FOR_CAPPING: usize = 4;

/// Gap-fill raw (date, quantity) pairs into a contiguous daily series.
///
/// Input may arrive in arbitrary order; rows sharing a date (multiple
/// aggregation rows for one day) are summed. Every calendar day from the
/// earliest to the latest observed date is present in the output, with
/// absent days at quantity 0.
///
/// Returns [`ForecastError::EmptyHistory`] for empty input — the engine
/// treats that as the trigger for its basic forecast path, not a fault.
pub fn gap_fill(raw: &[(NaiveDate, f64)]) -> Result<DemandSeries> {
    if raw.is_empty() {
        return Err(ForecastError::EmptyHistory);
    }

    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for &(date, quantity) in raw {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(ForecastError::InvalidInput(format!(
                "quantities must be finite and non-negative, got {quantity} on {date}"
            )));
        }
        *by_date.entry(date).or_insert(0.0) += quantity;
    }

    // BTreeMap is non-empty here, so the bounds exist.
    let first = *by_date.keys().next().ok_or(ForecastError::EmptyHistory)?;
    let last = *by_date.keys().next_back().ok_or(ForecastError::EmptyHistory)?;

    let mut dates = Vec::new();
    let mut quantities = Vec::new();
    let mut day = first;
    loop {
        dates.push(day);
        quantities.push(by_date.get(&day).copied().unwrap_or(0.0));
        if day == last {
            break;
        }
        day = day
            .succ_opt()
            .ok_or_else(|| ForecastError::DateError("calendar overflow".to_string()))?;
    }

    DemandSeries::new(dates, quantities)
}

/// Cap outliers to the IQR fences, preserving series length and alignment.
///
/// Quartiles use nearest-rank percentiles on the sorted quantities:
/// `q1 = sorted[floor(n * 0.25)]`, `q3 = sorted[floor(n * 0.75)]`. Values
/// outside `[q1 - 1.5*IQR, q3 + 1.5*IQR]` are replaced with the violated
/// bound. Series with fewer than 4 points are returned unchanged.
pub fn cap_outliers(series: &DemandSeries) -> DemandSeries {
    let n = series.len();
    if n < MIN_POINTS_FOR_CAPPING {
        return series.clone();
    }

    let mut sorted = series.quantities().to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = sorted[(n as f64 * 0.25).floor() as usize];
    let q3 = sorted[(n as f64 * 0.75).floor() as usize];
    let iqr = q3 - q1;
    let lower = q1 - IQR_MULTIPLIER * iqr;
    let upper = q3 + IQR_MULTIPLIER * iqr;

    let capped: Vec<f64> = series
        .quantities()
        .iter()
        .map(|&q| q.clamp(lower, upper))
        .collect();

    // Capping keeps quantities within the original non-negative range, so
    // revalidation cannot fail on series that passed construction.
    series
        .with_quantities(capped)
        .unwrap_or_else(|_| series.clone())
}

/// Full preprocessing pass: gap-fill then outlier capping.
///
/// Idempotent: running it again on its own output yields an identical
/// series.
pub fn preprocess(raw: &[(NaiveDate, f64)]) -> Result<DemandSeries> {
    let filled = gap_fill(raw)?;
    Ok(cap_outliers(&filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn gap_fill_covers_every_day() {
        let raw = vec![
            (date(2024, 3, 5), 4.0),
            (date(2024, 3, 1), 2.0),
            (date(2024, 3, 3), 3.0),
        ];
        let series = gap_fill(&raw).unwrap();

        assert_eq!(series.len(), 5);
        assert!(series.is_contiguous());
        assert_eq!(series.quantities(), &[2.0, 0.0, 3.0, 0.0, 4.0]);
        assert_eq!(series.first_date(), Some(date(2024, 3, 1)));
        assert_eq!(series.last_date(), Some(date(2024, 3, 5)));
    }

    #[test]
    fn gap_fill_sums_duplicate_dates() {
        let raw = vec![
            (date(2024, 3, 1), 2.0),
            (date(2024, 3, 1), 3.5),
            (date(2024, 3, 2), 1.0),
        ];
        let series = gap_fill(&raw).unwrap();
        assert_eq!(series.quantities(), &[5.5, 1.0]);
    }

    #[test]
    fn gap_fill_rejects_empty_input() {
        assert!(matches!(gap_fill(&[]), Err(ForecastError::EmptyHistory)));
    }

    #[test]
    fn gap_fill_rejects_negative_quantities() {
        let raw = vec![(date(2024, 3, 1), -1.0)];
        assert!(matches!(
            gap_fill(&raw),
            Err(ForecastError::InvalidInput(_))
        ));
    }

    #[test]
    fn capping_replaces_extremes_with_bounds() {
        // 11 steady days and one spike of 100.
        let mut raw: Vec<(NaiveDate, f64)> = (1..=11)
            .map(|d| (date(2024, 3, d), 10.0))
            .collect();
        raw.push((date(2024, 3, 12), 100.0));
        let series = gap_fill(&raw).unwrap();
        let capped = cap_outliers(&series);

        assert_eq!(capped.len(), series.len());
        // q1 = q3 = 10, iqr = 0, so every value is pinned to 10.
        for &q in capped.quantities() {
            assert_relative_eq!(q, 10.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn capping_respects_iqr_fences() {
        let quantities = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 50.0, 0.0];
        let raw: Vec<(NaiveDate, f64)> = quantities
            .iter()
            .enumerate()
            .map(|(i, &q)| (date(2024, 3, 1 + i as u32), q))
            .collect();
        let series = gap_fill(&raw).unwrap();
        let capped = cap_outliers(&series);

        let mut sorted = series.quantities().to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let q1 = sorted[2];
        let q3 = sorted[7];
        let iqr = q3 - q1;
        let lower = q1 - 1.5 * iqr;
        let upper = q3 + 1.5 * iqr;

        assert_eq!(capped.len(), series.len());
        for &q in capped.quantities() {
            assert!(q >= lower && q <= upper);
        }
        // The spike is capped, not removed.
        assert_relative_eq!(capped.quantities()[8], upper, epsilon = 1e-10);
    }

    #[test]
    fn capping_skipped_below_four_points() {
        let raw = vec![
            (date(2024, 3, 1), 1.0),
            (date(2024, 3, 2), 1000.0),
            (date(2024, 3, 3), 1.0),
        ];
        let series = gap_fill(&raw).unwrap();
        let capped = cap_outliers(&series);
        assert_eq!(capped, series);
    }

    #[test]
    fn preprocess_is_idempotent() {
        let raw = vec![
            (date(2024, 3, 1), 5.0),
            (date(2024, 3, 4), 200.0),
            (date(2024, 3, 2), 6.0),
            (date(2024, 3, 7), 5.5),
            (date(2024, 3, 9), 4.0),
            (date(2024, 3, 10), 6.5),
        ];
        let once = preprocess(&raw).unwrap();
        let again: Vec<(NaiveDate, f64)> =
            once.iter().map(|p| (p.date, p.quantity)).collect();
        let twice = preprocess(&again).unwrap();

        assert_eq!(once, twice);
    }
}
