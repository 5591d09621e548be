//! Summary statistics over a set of grades.
//!
//! These functions take plain slices and return `None` when the input is
//! empty; [`crate::GradeStore`] turns that into an error.

use serde::Serialize;

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Middle value of the sorted input, or the mean of the two central values
/// when the count is even.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// All four statistics for one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssignmentStats {
    pub average: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl AssignmentStats {
    /// Compute every statistic, or `None` for an empty input.
    pub fn compute(values: &[f64]) -> Option<Self> {
        Some(Self {
            average: mean(values)?,
            median: median(values)?,
            min: min(values)?,
            max: max(values)?,
        })
    }
}
