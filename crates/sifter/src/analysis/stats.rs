//! Descriptive statistics over numeric slices.
//!
//! All functions ignore `NaN` inputs and return `NaN` when there is nothing
//! left to summarize.

use serde::Serialize;

use crate::data::Column;

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1).
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub q1: f64,
    #[serde(rename = "50%")]
    pub median: f64,
    #[serde(rename = "75%")]
    pub q3: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Summarize the non-missing numbers of a column.
    pub fn from_column(column: &Column) -> Self {
        Self::from_values(&column.numbers())
    }

    pub fn from_values(values: &[f64]) -> Self {
        let sorted = finite_sorted(values);
        let count = sorted.len();

        Self {
            count,
            mean: mean(&sorted),
            std: sample_std(&sorted),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }
}

fn finite_sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

pub fn mean(values: &[f64]) -> f64 {
    let (sum, n) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

fn variance(values: &[f64], ddof: usize) -> f64 {
    let clean: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if clean.len() <= ddof {
        return f64::NAN;
    }
    let m = mean(&clean);
    let ss: f64 = clean.iter().map(|v| (v - m).powi(2)).sum();
    ss / (clean.len() - ddof) as f64
}

/// Population standard deviation (divides by n).
pub fn population_std(values: &[f64]) -> f64 {
    variance(values, 0).sqrt()
}

/// Sample standard deviation (divides by n - 1).
pub fn sample_std(values: &[f64]) -> f64 {
    variance(values, 1).sqrt()
}

/// Median with linear interpolation between the two middle values.
pub fn median(values: &[f64]) -> f64 {
    quantile_sorted(&finite_sorted(values), 0.5)
}

/// Quantile of already-sorted data using linear interpolation
/// between closest ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            let frac = pos - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * frac
        }
    }
}
