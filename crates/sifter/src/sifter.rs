//! Main Sifter struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{AnalysisResult, DataAnalyzer, HeatmapConfig};
use crate::data::Table;
use crate::error::Result;
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::transform::{CleaningConfig, CleaningStats, DataCleaner};

/// Configuration for a Sifter run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SifterConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Cleaning pipeline configuration.
    pub cleaning: CleaningConfig,
    /// Heatmap layout.
    pub heatmap: HeatmapConfig,
}

impl SifterConfig {
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_cleaning(mut self, cleaning: CleaningConfig) -> Self {
        self.cleaning = cleaning;
        self
    }

    pub fn with_heatmap(mut self, heatmap: HeatmapConfig) -> Self {
        self.heatmap = heatmap;
        self
    }
}

/// Result of processing one input.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// Name the input was submitted under.
    pub filename: String,
    /// Source metadata, when the input was parsed from bytes or a file.
    pub source: Option<SourceMetadata>,
    /// The cleaned table.
    pub cleaned: Table,
    /// What cleaning changed.
    pub stats: CleaningStats,
    /// Statistics, correlations and heatmap of the cleaned table.
    pub analysis: AnalysisResult,
}

/// The JSON payload returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse<'a> {
    pub filename: &'a str,
    /// Column names of the cleaned table.
    pub columns: Vec<&'a str>,
    pub analysis: &'a AnalysisResult,
}

impl ProcessResult {
    pub fn response(&self) -> AnalysisResponse<'_> {
        AnalysisResponse {
            filename: &self.filename,
            columns: self.cleaned.column_names(),
            analysis: &self.analysis,
        }
    }
}

/// Parses, cleans and analyzes tabular data.
#[derive(Debug, Clone)]
pub struct Sifter {
    parser: Parser,
    cleaner: DataCleaner,
    analyzer: DataAnalyzer,
}

impl Sifter {
    /// Create a Sifter with default configuration.
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            cleaner: DataCleaner::new(),
            analyzer: DataAnalyzer::new(),
        }
    }

    /// Create a Sifter from a configuration, rejecting invalid settings.
    pub fn with_config(config: SifterConfig) -> Result<Self> {
        Ok(Self {
            cleaner: DataCleaner::with_config(&config.cleaning)?,
            parser: Parser::with_config(config.parser),
            analyzer: DataAnalyzer::with_heatmap(config.heatmap),
        })
    }

    pub fn cleaner(&self) -> &DataCleaner {
        &self.cleaner
    }

    /// Parse a file without cleaning it.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let (raw, source) = self.parser.parse_file(path)?;
        Ok((Table::from_raw(&raw)?, source))
    }

    /// Process a file on disk.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<ProcessResult> {
        let (raw, source) = self.parser.parse_file(path)?;
        self.process_raw(&raw, source)
    }

    /// Process an in-memory upload identified by its file name.
    pub fn process_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<ProcessResult> {
        let (raw, source) = self.parser.parse_bytes_named(file_name, bytes)?;
        self.process_raw(&raw, source)
    }

    fn process_raw(&self, raw: &DataTable, source: SourceMetadata) -> Result<ProcessResult> {
        let table = Table::from_raw(raw)?;
        let mut result = self.process_table(&source.file, &table)?;
        result.source = Some(source);
        Ok(result)
    }

    /// Clean and analyze an already-built table.
    pub fn process_table(&self, filename: &str, table: &Table) -> Result<ProcessResult> {
        let (cleaned, stats) = self.cleaner.clean_with_stats(table);
        let analysis = self.analyzer.analyze(&cleaned)?;

        info!(
            file = filename,
            rows = cleaned.row_count(),
            numeric_columns = analysis.summary.len(),
            "processed table"
        );

        Ok(ProcessResult {
            filename: filename.to_string(),
            source: None,
            cleaned,
            stats,
            analysis,
        })
    }
}

impl Default for Sifter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SifterError;

    #[test]
    fn test_process_bytes() {
        let sifter = Sifter::new();
        let result = sifter
            .process_bytes("scores.csv", b"id,score\n1,10\n2,\n3,30\n")
            .unwrap();

        assert_eq!(result.filename, "scores.csv");
        assert_eq!(result.cleaned.row_count(), 3);
        assert_eq!(result.stats.filled, 1);
        assert_eq!(result.source.unwrap().format, "csv");
    }

    #[test]
    fn test_response_shape() {
        let result = Sifter::new()
            .process_bytes("t.tsv", b"a\tb\n1\t2\n2\t5\n3\t4\n")
            .unwrap();
        let json = serde_json::to_value(result.response()).unwrap();

        assert_eq!(json["filename"], "t.tsv");
        assert_eq!(json["columns"], serde_json::json!(["a", "b"]));
        assert!(json["analysis"]["summary"]["a"].is_object());
        assert_eq!(json["analysis"]["correlations"]["a"]["a"], 1.0);
        assert!(json["analysis"]["correlation_plot"].is_string());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let config = SifterConfig::default()
            .with_cleaning(CleaningConfig::default().with_outlier_threshold(-1.0));
        let err = Sifter::with_config(config).unwrap_err();
        assert!(matches!(err, SifterError::Config(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_unsupported_upload() {
        let err = Sifter::new().process_bytes("data.pdf", b"abc").unwrap_err();
        assert!(matches!(err, SifterError::UnsupportedFormat(_)));
    }
}
