//! Pearson correlation between numeric columns.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::stats::mean;
use crate::data::Column;

/// Symmetric matrix of Pearson coefficients, indexed by column name.
///
/// Pairs involving a zero-variance column are `NaN`, which serializes as
/// `null`. The diagonal is always 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlate every pair of the given columns.
    pub fn compute<'a>(columns: impl IntoIterator<Item = &'a Column>) -> Self {
        let columns: Vec<&Column> = columns.into_iter().collect();
        let n = columns.len();
        let cells: Vec<Vec<f64>> = columns.iter().map(|c| row_aligned(c)).collect();
        let mut values = vec![vec![1.0; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let r = pearson(&cells[i], &cells[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self {
            columns: columns.iter().map(|c| c.name.clone()).collect(),
            values,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient for a pair of columns by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Coefficient by position.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

impl Serialize for CorrelationMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, row) in self.columns.iter().zip(&self.values) {
            let entries: IndexMap<&str, f64> = self
                .columns
                .iter()
                .map(String::as_str)
                .zip(row.iter().copied())
                .collect();
            map.serialize_entry(name, &entries)?;
        }
        map.end()
    }
}

/// Per-row numbers with `NaN` standing in for missing cells.
fn row_aligned(column: &Column) -> Vec<f64> {
    column
        .values
        .iter()
        .map(|v| v.as_f64().unwrap_or(f64::NAN))
        .collect()
}

/// Pearson coefficient over rows where both sides are present.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(a, b)| (*a, *b))
        .unzip();

    if xs.len() < 2 {
        return f64::NAN;
    }

    let mx = mean(&xs);
    let my = mean(&ys);
    let (mut cov, mut vx, mut vy) = (0.0, 0.0, 0.0);
    for (a, b) in xs.iter().zip(&ys) {
        let dx = a - mx;
        let dy = b - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }

    if vx == 0.0 || vy == 0.0 {
        return f64::NAN;
    }
    (cov / (vx * vy).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(name: &str, values: &[f64]) -> Column {
        Column::numeric(name, values.iter().map(|&v| Some(v)).collect())
    }

    #[test]
    fn test_perfect_correlations() {
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]), 1.0);
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), -1.0);
    }

    #[test]
    fn test_zero_variance_is_nan() {
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let a = numeric("a", &[1.0, 2.0, 3.0, 4.0]);
        let b = numeric("b", &[2.0, 1.0, 4.0, 3.0]);
        let c = numeric("c", &[9.0, 7.0, 8.0, 1.0]);
        let matrix = CorrelationMatrix::compute([&a, &b, &c]);

        for x in ["a", "b", "c"] {
            assert_eq!(matrix.get(x, x), Some(1.0));
            for y in ["a", "b", "c"] {
                assert_eq!(matrix.get(x, y), matrix.get(y, x));
            }
        }
        assert_eq!(matrix.get("a", "b"), Some(0.6));
    }

    #[test]
    fn test_constant_column_reports_nan_not_error() {
        let a = numeric("a", &[1.0, 2.0, 3.0]);
        let k = numeric("k", &[5.0, 5.0, 5.0]);
        let matrix = CorrelationMatrix::compute([&a, &k]);

        assert!(matrix.get("a", "k").unwrap().is_nan());
        assert_eq!(matrix.get("k", "k"), Some(1.0));

        let json = serde_json::to_value(&matrix).unwrap();
        assert!(json["a"]["k"].is_null());
        assert_eq!(json["a"]["a"], 1.0);
    }

    #[test]
    fn test_empty_and_single() {
        let empty = CorrelationMatrix::compute(std::iter::empty::<&Column>());
        assert!(empty.is_empty());
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");

        let a = numeric("a", &[1.0, 2.0]);
        let single = CorrelationMatrix::compute([&a]);
        assert_eq!(single.len(), 1);
        assert_eq!(single.at(0, 0), 1.0);
    }
}
