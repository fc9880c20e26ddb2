//! Column type inference.

mod parse;
mod rules;

pub(crate) use parse::{parse_boolean, parse_datetime, parse_number};
pub use rules::{ColumnProfile, TypeInferencer};
