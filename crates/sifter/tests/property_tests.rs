//! Property-based tests for the cleaning and analysis pipeline.
//!
//! Property-based tests verify:
//! 1. **No panics**: inference and cleaning accept any input
//! 2. **Determinism**: the same table always cleans the same way
//! 3. **Invariants**: row counts, column kinds and matrix symmetry hold
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p sifter --test property_tests
//! ```

use proptest::prelude::*;

use sifter::analysis::stats::{mean, population_std};
use sifter::transform::OutlierTreater;
use sifter::{Column, ColumnKind, CorrelationMatrix, DataCleaner, DataTable, Table, TypeInferencer};

// =============================================================================
// Test Strategies
// =============================================================================

/// Cells of the shapes real files contain.
fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1000i64..1000).prop_map(|n| n.to_string()),
        (-1000.0f64..1000.0).prop_map(|x| format!("{:.2}", x)),
        prop::sample::select(vec!["yes", "No", "TRUE", "false", "1", "0"]).prop_map(String::from),
        (2000u32..2030, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| format!("{}-{:02}-{:02}", y, m, d)),
        "[A-Za-z ]{1,8}",
        prop::sample::select(vec!["", "NA", "null"]).prop_map(String::from),
    ]
}

/// A raw table of three columns, where each column draws from one cell family
/// often enough to infer something other than string.
fn raw_table() -> impl Strategy<Value = Table> {
    prop::collection::vec(prop::collection::vec(cell(), 3), 1..25).prop_map(|rows| {
        let headers = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        Table::from_raw(&DataTable::new(headers, rows, b',')).unwrap()
    })
}

fn numeric_cells() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.9, -1e4f64..1e4), 0..40)
}

// =============================================================================
// Inference
// =============================================================================

proptest! {
    #[test]
    fn inference_never_panics(values in prop::collection::vec(".{0,20}", 0..20)) {
        let inferencer = TypeInferencer::new();
        let first = inferencer.infer_values(values.iter().map(String::as_str));
        let second = inferencer.infer_values(values.iter().map(String::as_str));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn integer_columns_are_numeric(values in prop::collection::vec(-100000i64..100000, 1..20)) {
        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let kind = TypeInferencer::new().infer_values(rendered.iter().map(String::as_str));
        // 0/1-only columns are numeric too; the numeric rule runs before boolean
        prop_assert_eq!(kind, ColumnKind::Numeric);
    }
}

// =============================================================================
// Outlier Treatment
// =============================================================================

proptest! {
    #[test]
    fn outlier_treatment_keeps_row_count(cells in numeric_cells(), t in 0.5f64..5.0) {
        let column = Column::numeric("x", cells);
        let (treated, _) = OutlierTreater::new(t).treat_column(&column);
        prop_assert_eq!(treated.len(), column.len());
        prop_assert_eq!(treated.missing_count(), column.missing_count());
    }

    #[test]
    fn clamped_values_stay_within_bound(cells in numeric_cells(), t in 0.5f64..5.0) {
        let column = Column::numeric("x", cells);
        let numbers = column.numbers();
        let mu = mean(&numbers);
        let sigma = population_std(&numbers);

        let (treated, _) = OutlierTreater::new(t).treat_column(&column);
        if sigma > 0.0 {
            let slack = 1e-9 * (mu.abs() + t * sigma + 1.0);
            for x in treated.numbers() {
                prop_assert!((x - mu).abs() <= t * sigma + slack);
            }
        } else {
            prop_assert_eq!(treated, column);
        }
    }
}

// =============================================================================
// Correlation
// =============================================================================

proptest! {
    #[test]
    fn correlation_is_symmetric_with_unit_diagonal(
        rows in prop::collection::vec(
            (
                prop::option::weighted(0.9, -100.0f64..100.0),
                prop::option::weighted(0.9, -100.0f64..100.0),
                prop::option::weighted(0.9, -100.0f64..100.0),
            ),
            0..30,
        )
    ) {
        let a = Column::numeric("a", rows.iter().map(|r| r.0).collect());
        let b = Column::numeric("b", rows.iter().map(|r| r.1).collect());
        let c = Column::numeric("c", rows.iter().map(|r| r.2).collect());
        let matrix = CorrelationMatrix::compute([&a, &b, &c]);

        for i in 0..3 {
            prop_assert_eq!(matrix.at(i, i), 1.0);
            for j in 0..3 {
                let (x, y) = (matrix.at(i, j), matrix.at(j, i));
                prop_assert!(x == y || (x.is_nan() && y.is_nan()));
                prop_assert!(x.is_nan() || (-1.0..=1.0).contains(&x));
            }
        }
    }
}

// =============================================================================
// Cleaning
// =============================================================================

proptest! {
    #[test]
    fn cleaning_is_deterministic(table in raw_table()) {
        let cleaner = DataCleaner::new();
        prop_assert_eq!(cleaner.clean(&table), cleaner.clean(&table));
    }

    #[test]
    fn cleaned_values_match_column_kind(table in raw_table()) {
        let cleaned = DataCleaner::new().clean(&table);

        prop_assert!(cleaned.row_count() <= table.row_count());
        prop_assert!(cleaned.row_count() >= 1);
        prop_assert_eq!(cleaned.column_names(), table.column_names());

        for column in cleaned.columns() {
            for value in &column.values {
                if column.kind == ColumnKind::DateTime {
                    prop_assert!(value.is_missing() || value.matches_kind(column.kind));
                } else {
                    prop_assert!(value.matches_kind(column.kind), "{:?} in {}", value, column.kind);
                }
            }
        }
    }

    #[test]
    fn small_tables_clean_idempotently(table in raw_table()) {
        // Below ten rows no z-score can reach the default threshold of 3
        prop_assume!(table.row_count() < 10);
        let cleaner = DataCleaner::new();
        let once = cleaner.clean(&table);
        prop_assert_eq!(cleaner.clean(&once), once);
    }
}
