//! Clean command - clean a data file and export the cleaned table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use colored::Colorize;
use sifter::output::{write_delimited, write_json};

use super::{Options, ensure_exists, sibling_path};
use crate::cli::OutputFormat;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    outlier_threshold: Option<f64>,
    options: &Options,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;
    let sifter = options.sifter(outlier_threshold)?;

    println!(
        "{} {}",
        "Cleaning".cyan().bold(),
        file.display().to_string().white()
    );

    let (table, _source) = sifter.load_file(&file)?;
    let (cleaned, stats) = sifter.cleaner().clean_with_stats(&table);

    let output_path = output
        .unwrap_or_else(|| sibling_path(&file, &format!("_cleaned.{}", format.extension())));

    let mut writer = BufWriter::new(File::create(&output_path)?);
    match format {
        OutputFormat::Tsv => write_delimited(&cleaned, &mut writer, b'\t')?,
        OutputFormat::Csv => write_delimited(&cleaned, &mut writer, b',')?,
        OutputFormat::Json => write_json(&cleaned, &mut writer)?,
    }
    writer.flush()?;

    println!(
        "{} rows kept of {} ({} duplicates removed, {} values filled, {} clamped)",
        stats.rows_out.to_string().white().bold(),
        stats.rows_in,
        stats.duplicates_removed.to_string().yellow(),
        stats.filled.to_string().blue(),
        stats.clamped.to_string().yellow()
    );
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}
