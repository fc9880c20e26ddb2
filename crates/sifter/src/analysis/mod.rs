//! Statistics, correlation and heatmap rendering over cleaned tables.

mod analyzer;
mod correlation;
mod heatmap;
pub mod stats;

pub use analyzer::{AnalysisResult, DataAnalyzer};
pub use correlation::{CorrelationMatrix, pearson};
pub use heatmap::{HeatmapConfig, HeatmapRenderer, diverging_color};
pub use stats::ColumnSummary;
