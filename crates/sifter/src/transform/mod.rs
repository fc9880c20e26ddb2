//! The cleaning pipeline and its stages.

mod cleaner;
mod convert;
mod missing;
mod outliers;
mod standardize;

pub use cleaner::{CleaningConfig, CleaningStats, DataCleaner};
pub use convert::ValueConverter;
pub use missing::{MISSING_SENTINEL, MissingValueHandler, NEUTRAL_NUMBER};
pub use outliers::{DEFAULT_THRESHOLD, OutlierTreater};
pub use standardize::TypeStandardizer;
