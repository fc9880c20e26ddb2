//! Coercion of column values to an inferred kind.

use tracing::debug;

use crate::data::{Column, ColumnKind, Value};
use crate::inference::{parse_boolean, parse_datetime, parse_number};

/// Converts columns to their inferred kind.
///
/// A value that cannot be converted becomes [`Value::Missing`] instead of
/// failing the column. String columns are trimmed and lowercased.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueConverter;

impl ValueConverter {
    pub fn new() -> Self {
        Self
    }

    /// Return a new column holding values of `kind`.
    pub fn convert(&self, column: &Column, kind: ColumnKind) -> Column {
        let values: Vec<Value> = column
            .values
            .iter()
            .map(|value| convert_value(value, kind))
            .collect();

        let lost = values.iter().filter(|v| v.is_missing()).count() - column.missing_count();
        if lost > 0 {
            debug!(column = %column.name, kind = %kind, lost, "values failed conversion");
        }

        column.with_values(kind, values)
    }
}

fn convert_value(value: &Value, kind: ColumnKind) -> Value {
    if value.matches_kind(kind) && kind != ColumnKind::String {
        return value.clone();
    }
    let Some(text) = value.render() else {
        return Value::Missing;
    };

    let converted = match kind {
        ColumnKind::Numeric => parse_number(&text).map(Value::Number),
        ColumnKind::DateTime => parse_datetime(&text).map(Value::DateTime),
        ColumnKind::Boolean => parse_boolean(&text).map(Value::Boolean),
        ColumnKind::String => {
            let normalized = text.trim().to_lowercase();
            (!normalized.is_empty()).then_some(Value::Text(normalized))
        }
    };

    converted.unwrap_or(Value::Missing)
}
