//! Confidence interval construction from residual dispersion.

use crate::stats;
use serde::{Deserialize, Serialize};

/// Two-sided 95% z-score.
const Z_95: f64 = 1.96;

/// 95% confidence bounds around a prediction sequence.
///
/// Same length as the predictions; the lower bound is clamped to ≥ 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl ConfidenceInterval {
    /// Number of horizon days covered.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Check if the interval is empty.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }
}

/// Derive a fixed-width Gaussian interval from the dispersion of the
/// historical quantities.
///
/// The width is `1.96 ×` the population standard deviation of the whole
/// history, applied uniformly to every horizon day rather than
/// re-estimated per step. An empty history degenerates to a zero-width
/// interval around the predictions.
pub fn estimate(history: &[f64], predictions: &[f64]) -> ConfidenceInterval {
    let std_dev = stats::population_std_dev(history);
    let spread = Z_95 * std_dev;

    let lower = predictions
        .iter()
        .map(|&p| (p - spread).round().max(0.0))
        .collect();
    let upper = predictions.iter().map(|&p| (p + spread).round()).collect();

    ConfidenceInterval { lower, upper }
}
