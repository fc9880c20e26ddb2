//! Type-aware imputation of missing values.

use crate::analysis::stats::median;
use crate::data::{Column, ColumnKind, Value};

/// Placeholder written into string and boolean columns.
pub const MISSING_SENTINEL: &str = "unknown";

/// Fill value for a numeric column with no numbers at all.
pub const NEUTRAL_NUMBER: f64 = 0.0;

/// Fills missing values per column.
///
/// - numeric: the median of the column's numbers
/// - string and boolean: [`MISSING_SENTINEL`]
/// - datetime: left missing
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingValueHandler;

impl MissingValueHandler {
    pub fn new() -> Self {
        Self
    }

    /// Return a filled copy of the column.
    pub fn fill(&self, column: &Column) -> Column {
        if column.missing_count() == 0 {
            return column.clone();
        }

        let fill = match column.kind {
            ColumnKind::Numeric => {
                let m = median(&column.numbers());
                Value::Number(if m.is_nan() { NEUTRAL_NUMBER } else { m })
            }
            ColumnKind::String | ColumnKind::Boolean => Value::Text(MISSING_SENTINEL.to_string()),
            ColumnKind::DateTime => return column.clone(),
        };

        let values = column
            .values
            .iter()
            .map(|v| if v.is_missing() { fill.clone() } else { v.clone() })
            .collect();

        column.with_values(column.kind, values)
    }
}
