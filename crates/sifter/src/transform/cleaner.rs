//! The fixed cleaning pipeline.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::convert::ValueConverter;
use super::missing::MissingValueHandler;
use super::outliers::{DEFAULT_THRESHOLD, OutlierTreater};
use super::standardize::TypeStandardizer;
use crate::data::{Column, ColumnKind, Table};
use crate::error::{Result, SifterError};
use crate::inference::TypeInferencer;

/// Configuration for the cleaning pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Z-score beyond which numeric values are clamped.
    pub outlier_threshold: f64,
}

impl CleaningConfig {
    pub fn with_outlier_threshold(mut self, threshold: f64) -> Self {
        self.outlier_threshold = threshold;
        self
    }

    /// Reject thresholds that would clamp everything or nothing.
    pub fn validate(&self) -> Result<()> {
        if !self.outlier_threshold.is_finite() || self.outlier_threshold <= 0.0 {
            return Err(SifterError::Config(format!(
                "outlier_threshold must be a positive number, got {}",
                self.outlier_threshold
            )));
        }
        Ok(())
    }
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            outlier_threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// What one cleaning run did. Not part of the cleaned output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningStats {
    /// Final kind of every column, in table order.
    pub column_kinds: IndexMap<String, ColumnKind>,
    /// Values that failed conversion and became missing.
    pub unconvertible: usize,
    /// Missing values replaced by a median or sentinel.
    pub filled: usize,
    /// Numeric values clamped to the outlier bound.
    pub clamped: usize,
    /// Exact-duplicate rows removed.
    pub duplicates_removed: usize,
    pub rows_in: usize,
    pub rows_out: usize,
}

/// Runs infer → convert → fill → treat outliers → standardize and dedup.
///
/// Pure: the same table always cleans to the same result, and the input
/// table is never modified.
#[derive(Debug, Clone)]
pub struct DataCleaner {
    inferencer: TypeInferencer,
    converter: ValueConverter,
    missing: MissingValueHandler,
    outliers: OutlierTreater,
    standardizer: TypeStandardizer,
}

impl DataCleaner {
    /// Create a cleaner with the default threshold.
    pub fn new() -> Self {
        Self::build(&CleaningConfig::default())
    }

    /// Create a cleaner from a validated configuration.
    pub fn with_config(config: &CleaningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &CleaningConfig) -> Self {
        Self {
            inferencer: TypeInferencer::new(),
            converter: ValueConverter::new(),
            missing: MissingValueHandler::new(),
            outliers: OutlierTreater::new(config.outlier_threshold),
            standardizer: TypeStandardizer::new(),
        }
    }

    /// Clean a table.
    pub fn clean(&self, table: &Table) -> Table {
        self.clean_with_stats(table).0
    }

    /// Clean a table and report what changed.
    pub fn clean_with_stats(&self, table: &Table) -> (Table, CleaningStats) {
        let mut stats = CleaningStats {
            rows_in: table.row_count(),
            ..CleaningStats::default()
        };

        let typed = table.map_columns(|column| {
            let converted = self.infer_and_convert(column);
            stats.unconvertible += converted.missing_count() - column.missing_count();
            converted
        });

        let filled = typed.map_columns(|column| {
            let filled = self.missing.fill(column);
            stats.filled += column.missing_count() - filled.missing_count();
            filled
        });

        let treated = filled.map_columns(|column| {
            let (treated, clamped) = self.outliers.treat_column(column);
            stats.clamped += clamped;
            treated
        });

        let standardized = treated.map_columns(|c| self.standardizer.standardize_column(c));
        let cleaned = self.standardizer.deduplicate(&standardized);

        stats.rows_out = cleaned.row_count();
        stats.duplicates_removed = stats.rows_in - stats.rows_out;
        stats.column_kinds = cleaned
            .columns()
            .iter()
            .map(|c| (c.name.clone(), c.kind))
            .collect();

        info!(
            rows_in = stats.rows_in,
            rows_out = stats.rows_out,
            filled = stats.filled,
            clamped = stats.clamped,
            unconvertible = stats.unconvertible,
            "cleaned table"
        );

        (cleaned, stats)
    }

    fn infer_and_convert(&self, column: &Column) -> Column {
        // Nothing to infer from; keep as a string column of missing values.
        if column.is_all_missing() {
            debug!(column = %column.name, "column entirely missing");
            return column.with_values(ColumnKind::String, column.values.clone());
        }
        let kind = self.inferencer.infer(column);
        self.converter.convert(column, kind)
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new()
    }
}
