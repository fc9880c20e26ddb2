//! Typed tabular data: values, columns and tables.

mod column;
mod table;
mod value;

pub use column::Column;
pub use table::Table;
pub use value::{ColumnKind, Value};
