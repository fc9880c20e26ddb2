//! CLI command implementations.

pub mod analyze;
pub mod clean;
pub mod infer;

use std::path::{Path, PathBuf};

use sifter::{CleaningConfig, ParserConfig, Sifter, SifterConfig, SifterError};
use tracing::debug;

/// Flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub delimiter: Option<u8>,
    pub max_rows: Option<usize>,
    pub verbose: bool,
}

impl Options {
    /// Build a configured Sifter, validating the outlier threshold.
    pub fn sifter(&self, outlier_threshold: Option<f64>) -> sifter::Result<Sifter> {
        debug!(
            delimiter = ?self.delimiter.map(char::from),
            max_rows = ?self.max_rows,
            outlier_threshold = ?outlier_threshold,
            "configuring sifter"
        );

        let parser = ParserConfig {
            delimiter: self.delimiter,
            max_rows: self.max_rows,
            ..ParserConfig::default()
        };

        let mut cleaning = CleaningConfig::default();
        if let Some(t) = outlier_threshold {
            cleaning = cleaning.with_outlier_threshold(t);
        }

        Sifter::with_config(
            SifterConfig::default()
                .with_parser(parser)
                .with_cleaning(cleaning),
        )
    }
}

/// `dir/stem<suffix>` next to the input file.
fn sibling_path(file: &Path, suffix: &str) -> PathBuf {
    let stem = file.file_stem().unwrap_or_default().to_string_lossy();
    file.with_file_name(format!("{}{}", stem, suffix))
}

fn ensure_exists(file: &Path) -> sifter::Result<()> {
    if !file.exists() {
        return Err(SifterError::FileNotFound(file.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_path() {
        let path = sibling_path(Path::new("/data/people.csv"), ".analysis.json");
        assert_eq!(path, PathBuf::from("/data/people.analysis.json"));
    }

    #[test]
    fn test_invalid_threshold() {
        let options = Options::default();
        assert!(options.sifter(Some(0.0)).is_err());
        assert!(options.sifter(Some(f64::NAN)).is_err());
        assert!(options.sifter(Some(2.0)).is_ok());
        assert!(options.sifter(None).is_ok());
    }

    #[test]
    fn test_missing_input_is_client_error() {
        let err = ensure_exists(Path::new("/nonexistent/input.csv")).unwrap_err();
        assert!(matches!(err, SifterError::FileNotFound(_)));
        assert!(err.is_client_error());

        // The boxed form main() inspects for the exit code
        let boxed: Box<dyn std::error::Error> = err.into();
        assert!(boxed
            .downcast_ref::<SifterError>()
            .is_some_and(SifterError::is_client_error));
    }
}
