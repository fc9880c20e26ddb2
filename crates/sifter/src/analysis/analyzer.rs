//! Descriptive analysis of a cleaned table.

use base64::{Engine as _, engine::general_purpose};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info_span};

use super::correlation::CorrelationMatrix;
use super::heatmap::{HeatmapConfig, HeatmapRenderer};
use super::stats::ColumnSummary;
use crate::data::Table;
use crate::error::Result;

/// Summary statistics, correlations and the rendered heatmap.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Per numeric column, in table order.
    pub summary: IndexMap<String, ColumnSummary>,
    pub correlations: CorrelationMatrix,
    /// Base64-encoded PNG heatmap of `correlations`.
    pub correlation_plot: String,
    #[serde(skip)]
    plot_png: Vec<u8>,
}

impl AnalysisResult {
    /// The heatmap as raw PNG bytes.
    pub fn plot_png(&self) -> &[u8] {
        &self.plot_png
    }
}

/// Computes an [`AnalysisResult`] from the numeric columns of a table.
///
/// Degenerate input (no numeric columns, a single column, constant
/// columns) still produces a complete result.
#[derive(Debug, Clone, Default)]
pub struct DataAnalyzer {
    renderer: HeatmapRenderer,
}

impl DataAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heatmap(config: HeatmapConfig) -> Self {
        Self {
            renderer: HeatmapRenderer::new(config),
        }
    }

    /// Only PNG encoding can fail.
    pub fn analyze(&self, table: &Table) -> Result<AnalysisResult> {
        let _span = info_span!("analyze", rows = table.row_count()).entered();
        let numeric: Vec<_> = table.numeric_columns().collect();

        let summary: IndexMap<String, ColumnSummary> = numeric
            .iter()
            .map(|column| (column.name.clone(), ColumnSummary::from_column(column)))
            .collect();

        let correlations = CorrelationMatrix::compute(numeric.iter().copied());
        debug!(columns = correlations.len(), "computed correlation matrix");

        let plot_png = self.renderer.render_png(&correlations)?;
        let correlation_plot = general_purpose::STANDARD.encode(&plot_png);
        debug!(bytes = plot_png.len(), "rendered correlation heatmap");

        Ok(AnalysisResult {
            summary,
            correlations,
            correlation_plot,
            plot_png,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, ColumnKind, Value};

    fn table() -> Table {
        Table::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            Column::numeric("b", vec![Some(2.0), Some(4.0), Some(6.0), Some(8.5)]),
            Column::text("name", vec![Some("w"), Some("x"), Some("y"), Some("z")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_summary_covers_numeric_columns_only() {
        let result = DataAnalyzer::new().analyze(&table()).unwrap();
        let names: Vec<&str> = result.summary.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b"]);

        let a = &result.summary["a"];
        assert_eq!(a.count, 4);
        assert_eq!(a.mean, 2.5);
        assert_eq!(a.median, 2.5);
        assert_eq!(a.min, 1.0);
        assert_eq!(a.max, 4.0);
    }

    #[test]
    fn test_correlations_and_plot() {
        let result = DataAnalyzer::new().analyze(&table()).unwrap();
        assert_eq!(result.correlations.columns(), &["a", "b"]);
        assert_eq!(result.correlations.get("a", "a"), Some(1.0));
        assert!(result.correlations.get("a", "b").unwrap() > 0.99);

        assert!(!result.correlation_plot.is_empty());
        assert_eq!(&result.plot_png()[1..4], b"PNG");
    }

    #[test]
    fn test_no_numeric_columns() {
        let table = Table::new(vec![Column::new(
            "flag",
            ColumnKind::Boolean,
            vec![Value::Boolean(true), Value::Boolean(false)],
        )])
        .unwrap();

        let result = DataAnalyzer::new().analyze(&table).unwrap();
        assert!(result.summary.is_empty());
        assert!(result.correlations.is_empty());
        assert!(!result.correlation_plot.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let result = DataAnalyzer::new().analyze(&table()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert!(json["summary"]["a"]["25%"].is_number());
        assert_eq!(json["correlations"]["b"]["b"], 1.0);
        assert!(json["correlation_plot"].is_string());
        assert!(json.get("plot_png").is_none());
    }
}
