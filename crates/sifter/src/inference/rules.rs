//! Rule-based column type inference.

use serde::Serialize;
use tracing::debug;

use super::parse::{parse_boolean, parse_datetime, parse_number};
use crate::data::{Column, ColumnKind, Table};

/// A per-value test; a rule fires when every non-missing value passes.
type Predicate = fn(&str) -> bool;

/// Inference rules in priority order. First rule satisfied by every
/// non-missing value wins; anything left over is a string column.
const RULES: &[(ColumnKind, Predicate)] = &[
    (ColumnKind::DateTime, is_datetime),
    (ColumnKind::Numeric, is_number),
    (ColumnKind::Boolean, is_boolean),
];

fn is_datetime(value: &str) -> bool {
    parse_datetime(value).is_some()
}

fn is_number(value: &str) -> bool {
    parse_number(value).is_some()
}

fn is_boolean(value: &str) -> bool {
    parse_boolean(value).is_some()
}

/// Inferred kind and missing count for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub missing: usize,
    pub total: usize,
}

/// Classifies columns into numeric, datetime, boolean or string.
///
/// Never fails: a column that matches no rule, or has no values at all,
/// is a string column.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeInferencer;

impl TypeInferencer {
    pub fn new() -> Self {
        Self
    }

    /// Infer the kind of a column from its current values.
    ///
    /// Typed values are judged by their canonical rendering, so a column
    /// that was already cleaned infers to the kind it was cleaned into.
    pub fn infer(&self, column: &Column) -> ColumnKind {
        let rendered: Vec<String> = column.values.iter().filter_map(|v| v.render()).collect();
        let kind = self.infer_values(rendered.iter().map(String::as_str));
        debug!(column = %column.name, kind = %kind, "inferred column kind");
        kind
    }

    /// Infer a kind from raw, non-missing text values.
    pub fn infer_values<'a>(&self, values: impl IntoIterator<Item = &'a str>) -> ColumnKind {
        let values: Vec<&str> = values.into_iter().collect();
        if values.is_empty() {
            return ColumnKind::String;
        }

        RULES
            .iter()
            .find(|(_, accepts)| values.iter().all(|v| accepts(v)))
            .map(|(kind, _)| *kind)
            .unwrap_or(ColumnKind::String)
    }

    /// Profile every column of a table without converting anything.
    pub fn profile(&self, table: &Table) -> Vec<ColumnProfile> {
        table
            .columns()
            .iter()
            .map(|column| ColumnProfile {
                name: column.name.clone(),
                kind: self.infer(column),
                missing: column.missing_count(),
                total: column.len(),
            })
            .collect()
    }
}
