//! Z-score outlier clamping for numeric columns.

use tracing::debug;

use crate::analysis::stats::{mean, population_std};
use crate::data::{Column, Table, Value};

/// Default z-score threshold.
pub const DEFAULT_THRESHOLD: f64 = 3.0;

/// Clamps numeric values whose z-score exceeds a threshold.
///
/// Bounds are `mean ± threshold * std` of the column as given (population
/// standard deviation), computed once. Rows are never dropped.
#[derive(Debug, Clone, Copy)]
pub struct OutlierTreater {
    threshold: f64,
}

impl OutlierTreater {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Treat every numeric column; other columns pass through.
    pub fn treat(&self, table: &Table) -> Table {
        table.map_columns(|column| self.treat_column(column).0)
    }

    /// Clamp one column, returning the new column and how many values moved.
    pub fn treat_column(&self, column: &Column) -> (Column, usize) {
        if !column.kind.is_numeric() {
            return (column.clone(), 0);
        }

        let numbers = column.numbers();
        let mu = mean(&numbers);
        let sigma = population_std(&numbers);
        if !sigma.is_finite() || sigma == 0.0 {
            return (column.clone(), 0);
        }

        let lower = mu - self.threshold * sigma;
        let upper = mu + self.threshold * sigma;
        let mut clamped = 0;

        let values = column
            .values
            .iter()
            .map(|value| match value {
                Value::Number(v) if ((v - mu) / sigma).abs() > self.threshold => {
                    clamped += 1;
                    Value::Number(v.clamp(lower, upper))
                }
                other => other.clone(),
            })
            .collect();

        if clamped > 0 {
            debug!(column = %column.name, clamped, lower, upper, "clamped outliers");
        }

        (column.with_values(column.kind, values), clamped)
    }
}

impl Default for OutlierTreater {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnKind;

    fn numeric(values: &[f64]) -> Column {
        Column::numeric("x", values.iter().map(|&v| Some(v)).collect())
    }

    #[test]
    fn test_clamps_to_original_bound() {
        let mut values = vec![10.0; 20];
        values.push(1000.0);
        let column = numeric(&values);

        let mu = mean(&values);
        let sigma = population_std(&values);
        let (treated, clamped) = OutlierTreater::new(3.0).treat_column(&column);

        assert_eq!(clamped, 1);
        assert_eq!(treated.len(), column.len());
        let last = treated.values[20].as_f64().unwrap();
        assert!((last - (mu + 3.0 * sigma)).abs() < 1e-9);
        assert_eq!(treated.values[0], Value::Number(10.0));
    }

    #[test]
    fn test_short_column_below_threshold_is_untouched() {
        // Five values cannot reach a population z-score above 2
        let column = numeric(&[10.0, 12.0, 11.0, 13.0, 1000.0]);
        let (treated, clamped) = OutlierTreater::new(3.0).treat_column(&column);
        assert_eq!(clamped, 0);
        assert_eq!(treated, column);
    }

    #[test]
    fn test_lower_threshold_clamps_short_column() {
        let values = [10.0, 12.0, 11.0, 13.0, 1000.0];
        let mu = mean(&values);
        let sigma = population_std(&values);
        let (treated, clamped) = OutlierTreater::new(1.5).treat_column(&numeric(&values));

        assert_eq!(clamped, 1);
        let last = treated.values[4].as_f64().unwrap();
        assert!((last - (mu + 1.5 * sigma)).abs() < 1e-9);
    }

    #[test]
    fn test_low_outlier_clamped_to_lower_bound() {
        let mut values = vec![50.0; 20];
        values.push(-1000.0);
        let mu = mean(&values);
        let sigma = population_std(&values);
        let (treated, _) = OutlierTreater::default().treat_column(&numeric(&values));

        let last = treated.values[20].as_f64().unwrap();
        assert!((last - (mu - 3.0 * sigma)).abs() < 1e-9);
    }

    #[test]
    fn test_constant_column_not_flagged() {
        let column = numeric(&[4.0, 4.0, 4.0]);
        let (treated, clamped) = OutlierTreater::default().treat_column(&column);
        assert_eq!(clamped, 0);
        assert_eq!(treated, column);
    }

    #[test]
    fn test_non_numeric_passes_through() {
        let column = Column::new("s", ColumnKind::String, vec![Value::Text("a".into())]);
        let (treated, clamped) = OutlierTreater::default().treat_column(&column);
        assert_eq!(clamped, 0);
        assert_eq!(treated, column);
    }
}
