//! Property-based tests for the imputation pipeline.
//!
//! These tests use proptest to generate random datasets and verify that
//! the pipeline maintains its invariants under all conditions.
//!
//! # Testing Philosophy
//!
//! Property-based tests verify:
//! 1. **Completeness**: No missing values survive a default run
//! 2. **Idempotence**: Filling a filled dataset changes nothing
//! 3. **Preservation**: Observed values and shapes are never altered
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p lex-imputation --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p lex-imputation --test property_tests
//! ```

use proptest::prelude::*;

use lex_imputation::{ColumnOrder, FillPipeline, ImputationConfig, fill_dataframe, total_missing};
use polars::prelude::*;

// =============================================================================
// Test Strategies
// =============================================================================

/// Generate nullable integer cells drawn from a small range so modes repeat
fn int_cells(len: usize) -> impl Strategy<Value = Vec<Option<i32>>> {
    prop::collection::vec(prop::option::weighted(0.7, -3i32..3), len)
}

/// Generate nullable float cells, including NaN
fn float_cells(len: usize) -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(
        prop::option::weighted(
            0.7,
            prop_oneof![
                4 => (0i32..4).prop_map(|v| v as f64 * 0.5),
                1 => Just(f64::NAN),
            ],
        ),
        len,
    )
}

/// Generate nullable short strings from a small alphabet
fn text_cells(len: usize) -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(prop::option::weighted(0.7, "[abc]{1,2}"), len)
}

/// Generate a three-column dataset with 0 to 30 rows
fn dataset() -> impl Strategy<Value = DataFrame> {
    (0usize..30).prop_flat_map(|rows| {
        (int_cells(rows), float_cells(rows), text_cells(rows)).prop_map(|(ints, floats, texts)| {
            df![
                "ints" => ints,
                "floats" => floats,
                "texts" => texts,
            ]
            .expect("columns have equal length")
        })
    })
}

/// Generate a dataset without any missing values
fn complete_dataset() -> impl Strategy<Value = DataFrame> {
    (1usize..30).prop_flat_map(|rows| {
        (
            prop::collection::vec(-5i32..5, rows),
            prop::collection::vec("[a-z]{1,4}", rows),
        )
            .prop_map(|(ints, texts)| {
                df![
                    "ints" => ints,
                    "texts" => texts,
                ]
                .expect("columns have equal length")
            })
    })
}

// =============================================================================
// Pipeline Properties
// =============================================================================

mod pipeline_properties {
    use super::*;

    proptest! {
        /// A default run never leaves missing values behind.
        #[test]
        fn fill_leaves_no_missing_values(df in dataset()) {
            let filled = fill_dataframe(&df).unwrap();
            prop_assert_eq!(total_missing(&filled), 0);
        }

        /// A default run keeps the shape and column names.
        #[test]
        fn fill_preserves_shape(df in dataset()) {
            let filled = fill_dataframe(&df).unwrap();
            prop_assert_eq!(filled.shape(), df.shape());
            prop_assert_eq!(filled.get_column_names(), df.get_column_names());
        }

        /// Filling a filled dataset changes nothing.
        #[test]
        fn fill_is_idempotent(df in dataset()) {
            let once = fill_dataframe(&df).unwrap();
            let twice = fill_dataframe(&once).unwrap();
            prop_assert!(once.equals_missing(&twice));
        }

        /// Complete datasets come back unchanged.
        #[test]
        fn complete_dataset_is_unchanged(df in complete_dataset()) {
            let result = FillPipeline::default().fill(&df).unwrap();
            prop_assert!(result.dataframe.equals_missing(&df));
            prop_assert!(result.report.imputations.is_empty());
        }

        /// Observed integer values are never overwritten.
        #[test]
        fn observed_values_are_kept(df in dataset()) {
            let filled = fill_dataframe(&df).unwrap();
            let before = df.column("ints").unwrap().i32().unwrap();
            let after = filled.column("ints").unwrap().i32().unwrap();
            for (b, a) in before.into_iter().zip(after.into_iter()) {
                if let Some(value) = b {
                    prop_assert_eq!(a, Some(value));
                }
            }
        }

        /// Processing order does not change the values filled by the mode imputer.
        #[test]
        fn column_order_does_not_change_values(df in dataset()) {
            let sorted = fill_dataframe(&df).unwrap();
            let original = FillPipeline::builder()
                .config(ImputationConfig::builder().column_order(ColumnOrder::Original).build())
                .build()
                .fill(&df)
                .unwrap()
                .dataframe;
            prop_assert!(sorted.equals_missing(&original));
        }

        /// The report accounts for every missing value.
        #[test]
        fn report_counts_are_consistent(df in dataset()) {
            let report = FillPipeline::default().fill(&df).unwrap().report;
            let imputed: usize = report.imputations.iter().map(|i| i.missing_count).sum();
            prop_assert_eq!(imputed, report.missing_before);
            prop_assert_eq!(report.missing_after, 0);
            prop_assert_eq!(report.feature_columns.len(), df.width());
        }
    }
}
