//! A named, typed column of cells.

use serde::Serialize;

use super::value::{ColumnKind, Value};

/// A named sequence of values sharing one declared kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Build a string column from raw cells, `None` meaning missing.
    pub fn text<S: Into<String>>(name: impl Into<String>, cells: Vec<Option<S>>) -> Self {
        let values = cells
            .into_iter()
            .map(|c| c.map_or(Value::Missing, |s| Value::Text(s.into())))
            .collect();
        Self::new(name, ColumnKind::String, values)
    }

    /// Build a numeric column, `None` meaning missing.
    pub fn numeric(name: impl Into<String>, cells: Vec<Option<f64>>) -> Self {
        let values = cells
            .into_iter()
            .map(|c| c.map_or(Value::Missing, Value::Number))
            .collect();
        Self::new(name, ColumnKind::Numeric, values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// True when there is no value to infer anything from.
    pub fn is_all_missing(&self) -> bool {
        self.values.iter().all(Value::is_missing)
    }

    /// The non-missing numeric payloads, in row order.
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }

    /// Same column with different values.
    pub fn with_values(&self, kind: ColumnKind, values: Vec<Value>) -> Self {
        Self::new(self.name.clone(), kind, values)
    }
}
