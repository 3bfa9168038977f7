//! Daily demand series data structure.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day's demand observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub date: NaiveDate,
    pub quantity: f64,
}

/// An ordered daily demand series for one (product, store-or-all) pair.
///
/// Dates are strictly increasing with no duplicates and quantities are
/// finite and non-negative; the constructor rejects anything else, since
/// malformed data is a caller contract violation. After preprocessing the
/// series additionally covers every calendar day between its first and
/// last date (see [`crate::preprocess`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandSeries {
    dates: Vec<NaiveDate>,
    quantities: Vec<f64>,
}

impl DemandSeries {
    /// Create a series from parallel date/quantity vectors.
    pub fn new(dates: Vec<NaiveDate>, quantities: Vec<f64>) -> Result<Self> {
        if dates.len() != quantities.len() {
            return Err(ForecastError::InvalidInput(format!(
                "{} dates but {} quantities",
                dates.len(),
                quantities.len()
            )));
        }
        for window in dates.windows(2) {
            if window[1] <= window[0] {
                return Err(ForecastError::InvalidInput(
                    "dates must be strictly increasing".to_string(),
                ));
            }
        }
        for &q in &quantities {
            if !q.is_finite() || q < 0.0 {
                return Err(ForecastError::InvalidInput(format!(
                    "quantities must be finite and non-negative, got {q}"
                )));
            }
        }
        Ok(Self { dates, quantities })
    }

    /// Create a series from (date, quantity) points. Points must already be
    /// sorted and deduplicated; use [`crate::preprocess::gap_fill`] for raw
    /// query output.
    pub fn from_points(points: Vec<DemandPoint>) -> Result<Self> {
        let (dates, quantities) = points.into_iter().map(|p| (p.date, p.quantity)).unzip();
        Self::new(dates, quantities)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Observation dates, strictly increasing.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Daily quantities, aligned 1:1 with `dates`.
    pub fn quantities(&self) -> &[f64] {
        &self.quantities
    }

    /// First observation date.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Last observation date.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Iterate observations as [`DemandPoint`]s.
    pub fn iter(&self) -> impl Iterator<Item = DemandPoint> + '_ {
        self.dates
            .iter()
            .zip(self.quantities.iter())
            .map(|(&date, &quantity)| DemandPoint { date, quantity })
    }

    /// Check whether every calendar day between the first and last date is
    /// present. Trivially true for series with fewer than two points.
    pub fn is_contiguous(&self) -> bool {
        self.dates
            .windows(2)
            .all(|w| (w[1] - w[0]).num_days() == 1)
    }

    /// Return a copy with the quantities replaced. The replacement must
    /// have the same length as the original.
    pub(crate) fn with_quantities(&self, quantities: Vec<f64>) -> Result<Self> {
        if quantities.len() != self.dates.len() {
            return Err(ForecastError::InvalidInput(format!(
                "{} dates but {} quantities",
                self.dates.len(),
                quantities.len()
            )));
        }
        Self::new(self.dates.clone(), quantities)
    }
}
