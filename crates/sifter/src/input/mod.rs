//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig, SUPPORTED_EXTENSIONS};
pub use source::{DataTable, SourceMetadata};
