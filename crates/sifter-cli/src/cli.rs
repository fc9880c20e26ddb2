//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sifter: type inference, cleaning and correlation analysis for tabular data
#[derive(Parser)]
#[command(name = "sifter")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Field delimiter (default: auto-detect). Accepts a single character or "tab"
    #[arg(long, global = true, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Read at most this many data rows
    #[arg(long, global = true)]
    pub max_rows: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a data file and report statistics and correlations
    Analyze {
        /// Path to the data file (CSV, TSV or xlsx)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the JSON response (default: <file>.analysis.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the correlation heatmap as PNG
        #[arg(long, value_name = "PNG")]
        plot: Option<PathBuf>,

        /// Also write the cleaned table as CSV
        #[arg(long, value_name = "CSV")]
        cleaned: Option<PathBuf>,

        /// Z-score beyond which numeric values are clamped
        #[arg(long, value_name = "T")]
        outlier_threshold: Option<f64>,

        /// Print the JSON response to stdout instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Clean a data file and export the cleaned table
    Clean {
        /// Path to the data file (CSV, TSV or xlsx)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>_cleaned.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "tsv")]
        format: OutputFormat,

        /// Z-score beyond which numeric values are clamped
        #[arg(long, value_name = "T")]
        outlier_threshold: Option<f64>,
    },

    /// Show the inferred kind of every column without changing anything
    Infer {
        /// Path to the data file (CSV, TSV or xlsx)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Tsv,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use tsv, csv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!(
            "Invalid delimiter: {:?}. Use a single ASCII character or \"tab\".",
            s
        )),
    }
}
