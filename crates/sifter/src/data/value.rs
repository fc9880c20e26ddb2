//! Cell values and column kinds.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Semantic kind of a column after inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integers and floats.
    Numeric,
    /// Calendar dates and timestamps.
    #[serde(rename = "datetime")]
    DateTime,
    /// true/false flags.
    Boolean,
    /// Free text; also the fallback when nothing else fits.
    String,
}

impl ColumnKind {
    /// Returns true if this kind holds numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }
}

impl Default for ColumnKind {
    fn default() -> Self {
        ColumnKind::String
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::DateTime => write!(f, "datetime"),
            ColumnKind::Boolean => write!(f, "boolean"),
            ColumnKind::String => write!(f, "string"),
        }
    }
}

/// A single cell.
///
/// `Missing` is distinct from every domain value, so a numeric column may
/// hold a genuine `NaN` without being mistaken for an empty one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Missing,
    Number(f64),
    DateTime(NaiveDateTime),
    Boolean(bool),
    Text(String),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric payload, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether the value's variant belongs to `kind`.
    pub fn matches_kind(&self, kind: ColumnKind) -> bool {
        matches!(
            (self, kind),
            (Value::Number(_), ColumnKind::Numeric)
                | (Value::DateTime(_), ColumnKind::DateTime)
                | (Value::Boolean(_), ColumnKind::Boolean)
                | (Value::Text(_), ColumnKind::String)
        )
    }

    /// Canonical text form, `None` for missing.
    ///
    /// Every rendering parses back to the same value under the kind it was
    /// rendered from, which keeps a second cleaning pass stable.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Missing => None,
            Value::Number(n) => Some(n.to_string()),
            Value::DateTime(dt) => Some(if dt.time() == NaiveTime::MIN {
                dt.format("%Y-%m-%d").to_string()
            } else {
                dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()
            }),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Text(s) => Some(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_render_number_without_trailing_zero() {
        assert_eq!(Value::Number(3.0).render().as_deref(), Some("3"));
        assert_eq!(Value::Number(-1.25).render().as_deref(), Some("-1.25"));
    }

    #[test]
    fn test_render_midnight_as_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(Value::DateTime(date).render().as_deref(), Some("2024-03-09"));

        let stamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(
            Value::DateTime(stamp).render().as_deref(),
            Some("2024-03-09 14:05:00")
        );
    }

    #[test]
    fn test_missing_renders_empty() {
        assert_eq!(Value::Missing.render(), None);
        assert_eq!(Value::Missing.to_string(), "");
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ColumnKind::DateTime).unwrap();
        assert_eq!(json, "\"datetime\"");
    }
}
