//! Error types for the sifter library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sifter operations.
#[derive(Debug, Error)]
pub enum SifterError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook could not be opened or its first sheet read.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to clean.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Table shape violates a table invariant.
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Heatmap rendering or PNG encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The embedded label font failed to load.
    #[error("Font error: {0}")]
    Font(#[from] ab_glyph::InvalidFont),
}

impl SifterError {
    /// Whether the error was caused by the caller's input rather than
    /// an internal failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SifterError::FileNotFound(_)
                | SifterError::Csv(_)
                | SifterError::Spreadsheet(_)
                | SifterError::UnsupportedFormat(_)
                | SifterError::EmptyData(_)
                | SifterError::InvalidTable(_)
                | SifterError::Config(_)
        )
    }
}

/// Result type alias for sifter operations.
pub type Result<T> = std::result::Result<T, SifterError>;
