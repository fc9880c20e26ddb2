//! Sifter: type inference, cleaning and correlation analysis for tabular data.
//!
//! Sifter reads a delimited file or an xlsx workbook, infers a kind for every
//! column, converts and cleans the values, and produces descriptive
//! statistics, a Pearson correlation matrix and a heatmap of that matrix.
//!
//! # Core Principles
//!
//! - **Never guess loudly**: unparseable values become missing, ambiguous
//!   columns become strings, degenerate statistics become `NaN`
//! - **Non-destructive**: every stage takes a table and returns a new one
//! - **Deterministic**: the same input always yields the same output
//!
//! # Example
//!
//! ```no_run
//! use sifter::Sifter;
//!
//! let sifter = Sifter::new();
//! let result = sifter.process_file("customers.csv").unwrap();
//!
//! println!("Rows after cleaning: {}", result.cleaned.row_count());
//! println!("Numeric columns: {}", result.analysis.summary.len());
//! ```

pub mod analysis;
pub mod data;
pub mod error;
pub mod inference;
pub mod input;
pub mod output;
pub mod transform;

mod sifter;

pub use crate::sifter::{AnalysisResponse, ProcessResult, Sifter, SifterConfig};
pub use analysis::{AnalysisResult, CorrelationMatrix, DataAnalyzer, HeatmapConfig};
pub use data::{Column, ColumnKind, Table, Value};
pub use error::{Result, SifterError};
pub use inference::{ColumnProfile, TypeInferencer};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use transform::{CleaningConfig, CleaningStats, DataCleaner};
