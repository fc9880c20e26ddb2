//! CSV/TSV and spreadsheet parser with delimiter detection.

use std::fs;
use std::io::{BufRead, BufReader, Cursor, ErrorKind};
use std::path::{Path, PathBuf};

use calamine::{Data, DataType, Reader, Xlsx};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{DataTable, SourceMetadata};
use crate::error::{Result, SifterError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// File extensions accepted as input.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt", "xlsx", "xlsm"];

/// Extensions read as workbooks rather than delimited text.
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm"];

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses tabular data files.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        check_extension(path)?;

        let contents = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SifterError::FileNotFound(path.to_path_buf()),
            _ => SifterError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        self.parse_contents(path.to_path_buf(), &contents)
    }

    /// Parse an in-memory upload identified by its file name.
    pub fn parse_bytes_named(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<(DataTable, SourceMetadata)> {
        let path = PathBuf::from(file_name);
        check_extension(&path)?;
        self.parse_contents(path, bytes)
    }

    fn parse_contents(&self, path: PathBuf, contents: &[u8]) -> Result<(DataTable, SourceMetadata)> {
        let mut hasher = Sha256::new();
        hasher.update(contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (data_table, format) = if is_spreadsheet(&path) {
            (self.parse_spreadsheet(contents)?, "xlsx".to_string())
        } else {
            let delimiter = match self.config.delimiter {
                Some(d) => d,
                None => detect_delimiter(contents)?,
            };
            let format = match delimiter {
                b'\t' => "tsv",
                b',' => "csv",
                b';' => "csv-semicolon",
                b'|' => "psv",
                _ => "delimited",
            };
            (self.parse_bytes(contents, delimiter)?, format.to_string())
        };

        debug!(
            file = %path.display(),
            format = %format,
            rows = data_table.row_count(),
            columns = data_table.column_count(),
            "parsed input"
        );

        let source_metadata = SourceMetadata::new(
            path,
            hash,
            contents.len() as u64,
            format,
            data_table.row_count(),
            data_table.column_count(),
        );

        Ok((data_table, source_metadata))
    }

    /// Parse bytes with a known delimiter.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let records = reader.records().map(|result| {
            result
                .map(|record| record.iter().map(String::from).collect())
                .map_err(SifterError::from)
        });

        self.build_table(records, delimiter)
    }

    /// Parse the first worksheet of an xlsx workbook.
    ///
    /// Cells are rendered to text so the result looks exactly like a parsed
    /// CSV file: numbers in shortest form, dates as ISO dates, empty cells
    /// as empty strings.
    pub fn parse_spreadsheet(&self, bytes: &[u8]) -> Result<DataTable> {
        let mut workbook = Xlsx::new(Cursor::new(bytes))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| SifterError::EmptyData("Workbook has no worksheets".to_string()))??;

        let records = range
            .rows()
            .map(|row| Ok(row.iter().map(cell_text).collect::<Vec<String>>()));

        self.build_table(records, b',')
    }

    /// Split off the header row and collect the data rows.
    fn build_table(
        &self,
        mut records: impl Iterator<Item = Result<Vec<String>>>,
        delimiter: u8,
    ) -> Result<DataTable> {
        let (headers, first) = match records.next() {
            Some(Ok(record)) if self.config.has_header => {
                let headers: Vec<String> = record.iter().map(|s| s.trim().to_string()).collect();
                (headers, None)
            }
            Some(Ok(record)) => {
                // No header row: synthesize names and keep the record as data.
                let names = (0..record.len()).map(|i| format!("column_{}", i + 1)).collect();
                (names, Some(record))
            }
            Some(Err(e)) => return Err(e),
            None => return Err(SifterError::EmptyData("No data rows found".to_string())),
        };

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(SifterError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        let all = first.into_iter().map(Ok).chain(records);
        for (row_idx, result) in all.enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let mut row = result?;

            // Ragged rows are padded or truncated to the header width
            row.resize(expected_cols, String::new());
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(SifterError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn is_spreadsheet(path: &Path) -> bool {
    SPREADSHEET_EXTENSIONS.contains(&extension(path).as_str())
}

/// Render a worksheet cell the way it would appear in a CSV export.
fn cell_text(cell: &Data) -> String {
    if cell.is_datetime() {
        if let Some(dt) = cell.as_datetime() {
            return if dt.time() == NaiveTime::MIN {
                dt.format("%Y-%m-%d").to_string()
            } else {
                dt.format("%Y-%m-%d %H:%M:%S").to_string()
            };
        }
    }
    cell.to_string()
}

/// Reject files that are neither delimited text nor a spreadsheet.
fn check_extension(path: &Path) -> Result<()> {
    if SUPPORTED_EXTENSIONS.contains(&extension(path).as_str()) {
        Ok(())
    } else {
        Err(SifterError::UnsupportedFormat(format!(
            "'{}' (expected one of: {})",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        )))
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(SifterError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs get a small bonus
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
