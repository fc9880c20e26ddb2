//! Final representation pass and duplicate-row removal.

use std::collections::HashSet;

use tracing::debug;

use crate::data::{Column, ColumnKind, Table, Value};

/// Makes every column's storage match its declared kind, then drops
/// exact-duplicate rows.
///
/// A column whose values no longer share one kind (a boolean column that
/// received the missing-value sentinel) is demoted to a string column of
/// canonical renderings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeStandardizer;

impl TypeStandardizer {
    pub fn new() -> Self {
        Self
    }

    /// Standardize column storage and deduplicate rows.
    pub fn standardize(&self, table: &Table) -> Table {
        self.deduplicate(&table.map_columns(|c| self.standardize_column(c)))
    }

    /// Ensure every non-missing value matches the column kind.
    pub fn standardize_column(&self, column: &Column) -> Column {
        let uniform = column
            .values
            .iter()
            .all(|v| v.is_missing() || v.matches_kind(column.kind));
        if uniform {
            return column.clone();
        }

        debug!(column = %column.name, from = %column.kind, "demoting mixed column to string");
        let values = column
            .values
            .iter()
            .map(|v| v.render().map_or(Value::Missing, Value::Text))
            .collect();
        column.with_values(ColumnKind::String, values)
    }

    /// Drop rows equal to an earlier row in every column, keeping order.
    pub fn deduplicate(&self, table: &Table) -> Table {
        let mut seen: HashSet<Vec<Option<String>>> = HashSet::new();
        let keep: Vec<usize> = (0..table.row_count())
            .filter(|&row| {
                let key = table
                    .columns()
                    .iter()
                    .map(|c| dedup_key(&c.values[row]))
                    .collect();
                seen.insert(key)
            })
            .collect();

        if keep.len() == table.row_count() {
            return table.clone();
        }

        debug!(
            removed = table.row_count() - keep.len(),
            "removed duplicate rows"
        );
        table.select_rows(&keep)
    }
}

/// Rendering used to compare cells; `-0.0` and `0.0` are the same number.
fn dedup_key(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if *n == 0.0 => Some("0".to_string()),
        other => other.render(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicate_keeps_first_in_order() {
        let table = Table::new(vec![
            Column::numeric("id", vec![Some(1.0), Some(2.0), Some(1.0), Some(3.0), Some(2.0)]),
            Column::text("name", vec![Some("a"), Some("b"), Some("a"), Some("c"), Some("x")]),
        ])
        .unwrap();

        let deduped = TypeStandardizer::new().deduplicate(&table);

        assert_eq!(deduped.row_count(), 4);
        assert_eq!(deduped.column("id").unwrap().numbers(), vec![1.0, 2.0, 3.0, 2.0]);
        assert_eq!(
            deduped.column("name").unwrap().values[3],
            Value::Text("x".into())
        );
    }

    #[test]
    fn test_uniform_column_unchanged() {
        let column = Column::numeric("n", vec![Some(1.0), Some(2.0)]);
        assert_eq!(TypeStandardizer::new().standardize_column(&column), column);
    }

    #[test]
    fn test_mixed_boolean_demoted_to_string() {
        let column = Column::new(
            "active",
            ColumnKind::Boolean,
            vec![Value::Boolean(true), Value::Text("unknown".into()), Value::Boolean(false)],
        );
        let standardized = TypeStandardizer::new().standardize_column(&column);

        assert_eq!(standardized.kind, ColumnKind::String);
        assert_eq!(
            standardized.values,
            vec![
                Value::Text("true".into()),
                Value::Text("unknown".into()),
                Value::Text("false".into())
            ]
        );
    }

    #[test]
    fn test_missing_cells_compare_equal() {
        let table = Table::new(vec![Column::new(
            "when",
            ColumnKind::DateTime,
            vec![Value::Missing, Value::Missing],
        )])
        .unwrap();
        assert_eq!(TypeStandardizer::new().deduplicate(&table).row_count(), 1);
    }

    #[test]
    fn test_signed_zeros_deduplicate() {
        let table = Table::new(vec![Column::numeric(
            "x",
            vec![Some(0.0), Some(-0.0), Some(1.0)],
        )])
        .unwrap();

        let deduped = TypeStandardizer::new().deduplicate(&table);
        assert_eq!(deduped.row_count(), 2);
        assert_eq!(deduped.column("x").unwrap().numbers(), vec![0.0, 1.0]);
    }
}
