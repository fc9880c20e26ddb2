//! Sifter CLI - clean and analyze tabular data files.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::Options;
use sifter::SifterError;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = Options {
        delimiter: cli.delimiter,
        max_rows: cli.max_rows,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Commands::Analyze {
            file,
            output,
            plot,
            cleaned,
            outlier_threshold,
            json,
        } => commands::analyze::run(
            file,
            output,
            plot,
            cleaned,
            outlier_threshold,
            json,
            &options,
        ),

        Commands::Clean {
            file,
            output,
            format,
            outlier_threshold,
        } => commands::clean::run(file, output, format, outlier_threshold, &options),

        Commands::Infer { file, json } => commands::infer::run(file, json, &options),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let client_error = e
            .downcast_ref::<SifterError>()
            .is_some_and(SifterError::is_client_error);
        std::process::exit(if client_error { 2 } else { 1 });
    }
}
