//! An immutable table of aligned columns.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Result, SifterError};
use crate::input::DataTable;

use super::column::Column;
use super::value::{ColumnKind, Value};

/// Ordered, named columns of equal length.
///
/// Every pipeline stage takes a `&Table` and returns a new one; nothing
/// mutates a table once it has been built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    #[serde(skip)]
    row_count: usize,
}

impl Table {
    /// Build a table, rejecting ragged columns and duplicate names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SifterError::InvalidTable(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
            if column.len() != row_count {
                return Err(SifterError::InvalidTable(format!(
                    "column '{}' has {} values, expected {}",
                    column.name,
                    column.len(),
                    row_count
                )));
            }
        }

        Ok(Self { columns, row_count })
    }

    /// Convert a parsed file into a table of untyped text cells.
    ///
    /// Null tokens (`NA`, empty, `null`, ...) become [`Value::Missing`].
    pub fn from_raw(raw: &DataTable) -> Result<Self> {
        let columns = raw
            .headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let values = raw
                    .column_values(idx)
                    .map(|cell| {
                        if DataTable::is_null_value(cell) {
                            Value::Missing
                        } else {
                            Value::Text(cell.to_string())
                        }
                    })
                    .collect();
                Column::new(header.trim(), ColumnKind::String, values)
            })
            .collect();

        Self::new(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// Columns declared numeric.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.kind.is_numeric())
    }

    /// Apply a length-preserving transform to every column.
    pub(crate) fn map_columns(&self, mut f: impl FnMut(&Column) -> Column) -> Table {
        let columns: Vec<Column> = self.columns.iter().map(|c| f(c)).collect();
        debug_assert!(columns.iter().all(|c| c.len() == self.row_count));
        Table {
            columns,
            row_count: self.row_count,
        }
    }

    /// Keep only the given rows, in the given order.
    pub(crate) fn select_rows(&self, rows: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = rows.iter().map(|&r| c.values[r].clone()).collect();
                c.with_values(c.kind, values)
            })
            .collect();
        Table {
            columns,
            row_count: rows.len(),
        }
    }
}
