//! Infer command - show inferred column kinds without modifying data.

use std::path::PathBuf;

use colored::Colorize;
use sifter::{ColumnKind, TypeInferencer};

use super::{Options, ensure_exists};

pub fn run(
    file: PathBuf,
    json_output: bool,
    options: &Options,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;
    let sifter = options.sifter(None)?;

    let (table, source) = sifter.load_file(&file)?;
    let profiles = TypeInferencer::new().profile(&table);

    if json_output {
        let report = serde_json::json!({
            "file": source.file,
            "format": source.format,
            "rows": source.row_count,
            "columns": profiles,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {})",
        "Columns of".cyan().bold(),
        source.file.white(),
        source.row_count,
        source.format
    );
    println!();

    for profile in &profiles {
        let kind = match profile.kind {
            ColumnKind::Numeric => profile.kind.to_string().blue(),
            ColumnKind::DateTime => profile.kind.to_string().magenta(),
            ColumnKind::Boolean => profile.kind.to_string().green(),
            ColumnKind::String => profile.kind.to_string().normal(),
        };
        let missing = if profile.missing > 0 {
            format!("{} missing", profile.missing).yellow()
        } else {
            "complete".dimmed()
        };
        println!("  {:20} {:10} {}", profile.name, kind, missing);
    }

    Ok(())
}
