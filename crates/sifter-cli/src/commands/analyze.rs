//! Analyze command - clean a data file and report statistics and correlations.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use colored::Colorize;
use sifter::output::write_delimited;

use super::{Options, ensure_exists, sibling_path};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    plot: Option<PathBuf>,
    cleaned: Option<PathBuf>,
    outlier_threshold: Option<f64>,
    json_output: bool,
    options: &Options,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;
    let sifter = options.sifter(outlier_threshold)?;

    if !json_output {
        println!(
            "{} {}",
            "Analyzing".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let result = sifter.process_file(&file)?;
    let response = serde_json::to_string_pretty(&result.response())?;

    if let Some(ref path) = plot {
        fs::write(path, result.analysis.plot_png())?;
    }
    if let Some(ref path) = cleaned {
        write_delimited(&result.cleaned, BufWriter::new(File::create(path)?), b',')?;
    }

    if json_output {
        println!("{}", response);
        if let Some(path) = output {
            fs::write(path, &response)?;
        }
        return Ok(());
    }

    let output_path = output.unwrap_or_else(|| sibling_path(&file, ".analysis.json"));
    fs::write(&output_path, &response)?;

    let stats = &result.stats;
    println!();
    println!("{}", "Columns:".yellow().bold());
    for (name, kind) in &stats.column_kinds {
        println!("  {:20} {}", name, kind.to_string().cyan());
    }

    println!();
    println!(
        "Rows: {} in, {} out ({} duplicates removed)",
        stats.rows_in.to_string().white().bold(),
        stats.rows_out.to_string().white().bold(),
        stats.duplicates_removed.to_string().yellow()
    );
    println!(
        "Values: {} filled, {} clamped, {} unconvertible",
        stats.filled.to_string().blue(),
        stats.clamped.to_string().yellow(),
        stats.unconvertible.to_string().red()
    );

    let summary = &result.analysis.summary;
    if summary.is_empty() {
        println!("{}", "No numeric columns to summarize.".dimmed());
    } else {
        println!();
        println!("{}", "Summary:".yellow().bold());
        println!(
            "  {:20} {:>8} {:>12} {:>12} {:>12} {:>12}",
            "column", "count", "mean", "std", "min", "max"
        );
        for (name, s) in summary {
            println!(
                "  {:20} {:>8} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                name, s.count, s.mean, s.std, s.min, s.max
            );
        }
    }

    if options.verbose {
        let matrix = &result.analysis.correlations;
        if !matrix.is_empty() {
            println!();
            println!("{}", "Correlations:".yellow().bold());
            for (i, name) in matrix.columns().iter().enumerate() {
                let row: Vec<String> = (0..matrix.len())
                    .map(|j| format!("{:>7.3}", matrix.at(i, j)))
                    .collect();
                println!("  {:20} {}", name, row.join(" "));
            }
        }
    }

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );
    if let Some(path) = plot {
        println!(
            "{} {}",
            "Heatmap".green().bold(),
            path.display().to_string().white()
        );
    }
    if let Some(path) = cleaned {
        println!(
            "{} {}",
            "Cleaned data".green().bold(),
            path.display().to_string().white()
        );
    }

    Ok(())
}
