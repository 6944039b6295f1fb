//! Integration tests for the imputation pipeline.
//!
//! These tests verify end-to-end behavior of the pipeline using small CSV
//! datasets from `tests/fixtures`.

use lex_imputation::io::read_csv;
use lex_imputation::{
    ColumnImputer, ColumnOrder, FillMethod, FillPipeline, ImputationConfig, ImputationResult,
    ImputedColumn, fill_dataframe, total_missing,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::Arc;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_csv(filename: &str) -> DataFrame {
    read_csv(fixtures_path().join(filename)).expect("Failed to read CSV file")
}

fn imputed_columns(report: &lex_imputation::FillReport) -> Vec<&str> {
    report
        .imputations
        .iter()
        .map(|i| i.column.as_str())
        .collect()
}

/// Returns the target column untouched.
struct PassthroughImputer;

impl ColumnImputer for PassthroughImputer {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn impute(
        &self,
        df: &DataFrame,
        target: &str,
        _feature_columns: &[String],
    ) -> ImputationResult<ImputedColumn> {
        Ok(ImputedColumn {
            series: df.column(target)?.as_materialized_series().clone(),
            method: FillMethod::Mode,
            fill_value: None,
        })
    }
}

// ============================================================================
// Fixture Datasets
// ============================================================================

#[test]
fn test_fixture_shapes() {
    let sensors = load_csv("sensors.csv");
    assert_eq!(sensors.shape(), (6, 5));
    assert_eq!(total_missing(&sensors), 8);

    let clean = load_csv("no_missing.csv");
    assert_eq!(total_missing(&clean), 0);
}

#[test]
fn test_sensors_fill_with_modes() {
    let df = load_csv("sensors.csv");

    let result = FillPipeline::default().fill(&df).unwrap();
    let filled = &result.dataframe;

    assert_eq!(total_missing(filled), 0);
    assert_eq!(filled.shape(), df.shape());

    // Tie between north and south goes to the first one seen
    let region = filled.column("region").unwrap().str().unwrap();
    assert_eq!(region.get(3), Some("north"));

    let humidity = filled.column("humidity").unwrap().i64().unwrap();
    assert_eq!(humidity.get(2), Some(75));
    assert_eq!(humidity.get(4), Some(75));

    let status = filled.column("status").unwrap().str().unwrap();
    assert_eq!(status.get(2), Some("ok"));
    assert_eq!(status.get(5), Some("ok"));

    let temperature = filled.column("temperature").unwrap().f64().unwrap();
    assert_eq!(temperature.get(1), Some(12.5));
    assert_eq!(temperature.get(5), Some(12.5));

    // Observed values are untouched
    assert_eq!(temperature.get(3), Some(14.0));
    assert_eq!(status.get(3), Some("fault"));
}

#[test]
fn test_sensors_processing_order() {
    let df = load_csv("sensors.csv");

    let report = FillPipeline::default().fill(&df).unwrap().report;

    assert_eq!(
        imputed_columns(&report),
        vec!["region", "humidity", "status", "temperature"]
    );
    assert_eq!(
        report.feature_columns,
        vec!["station", "region", "humidity", "status", "temperature"]
    );
    assert_eq!(report.missing_before, 8);
    assert_eq!(report.missing_after, 0);
    assert_eq!(report.zero_filled_values, 0);
    assert!(
        report
            .imputations
            .iter()
            .all(|i| i.method == FillMethod::Mode)
    );
}

#[test]
fn test_original_order_fills_same_values() {
    let df = load_csv("sensors.csv");

    let pipeline = FillPipeline::builder()
        .config(
            ImputationConfig::builder()
                .column_order(ColumnOrder::Original)
                .build(),
        )
        .build();
    let result = pipeline.fill(&df).unwrap();

    assert_eq!(
        imputed_columns(&result.report),
        vec!["region", "temperature", "humidity", "status"]
    );

    let sorted = fill_dataframe(&df).unwrap();
    assert!(result.dataframe.equals_missing(&sorted));
}

#[test]
fn test_clean_dataset_is_unchanged() {
    let df = load_csv("no_missing.csv");

    let result = FillPipeline::default().fill(&df).unwrap();

    assert!(result.dataframe.equals_missing(&df));
    assert!(result.report.imputations.is_empty());
    assert_eq!(result.report.feature_columns.len(), 4);
}

#[test]
fn test_all_missing_column_uses_zero_fallback() {
    let df = load_csv("empty_notes.csv");

    let result = FillPipeline::default().fill(&df).unwrap();
    let report = &result.report;

    assert_eq!(total_missing(&result.dataframe), 0);
    assert_eq!(imputed_columns(report), vec!["value", "notes"]);
    assert_eq!(report.imputations[0].method, FillMethod::Mode);
    assert_eq!(report.imputations[0].fill_value.as_deref(), Some("10"));
    assert_eq!(report.imputations[1].method, FillMethod::ZeroFallback);
    assert_eq!(report.imputations[1].missing_count, 3);
}

#[test]
fn test_fill_is_idempotent() {
    let df = load_csv("sensors.csv");

    let once = fill_dataframe(&df).unwrap();
    let twice = fill_dataframe(&once).unwrap();

    assert!(once.equals_missing(&twice));
}

#[test]
fn test_in_memory_scenario() {
    let df = df![
        "A" => [Some(1i64), Some(1), None],
        "B" => [Option::<i64>::None, None, None],
    ]
    .unwrap();

    let filled = fill_dataframe(&df).unwrap();

    let expected = df![
        "A" => [1i64, 1, 1],
        "B" => [0i64, 0, 0],
    ]
    .unwrap();
    assert!(filled.equals_missing(&expected));
}

// ============================================================================
// Custom Imputers and Final Zero Fill
// ============================================================================

#[test]
fn test_zero_fill_catches_unfilled_values() {
    let df = load_csv("sensors.csv");

    let result = FillPipeline::builder()
        .imputer(Arc::new(PassthroughImputer))
        .build()
        .fill(&df)
        .unwrap();

    assert_eq!(result.report.zero_filled_values, 8);
    assert_eq!(result.report.missing_after, 0);

    let region = result.dataframe.column("region").unwrap().str().unwrap();
    assert_eq!(region.get(3), Some("0"));
    let humidity = result.dataframe.column("humidity").unwrap().i64().unwrap();
    assert_eq!(humidity.get(2), Some(0));
}

#[test]
fn test_disabled_zero_fill_leaves_values_missing() {
    let df = load_csv("sensors.csv");

    let result = FillPipeline::builder()
        .config(
            ImputationConfig::builder()
                .zero_fill_remaining(false)
                .build(),
        )
        .imputer(Arc::new(PassthroughImputer))
        .build()
        .fill(&df)
        .unwrap();

    assert_eq!(result.report.zero_filled_values, 0);
    assert_eq!(result.report.missing_after, 8);
    assert_eq!(total_missing(&result.dataframe), 8);
}

#[test]
fn test_plan_matches_fill_order() {
    let df = load_csv("sensors.csv");
    let pipeline = FillPipeline::default();

    let plan = pipeline.plan(&df).unwrap();
    let report = pipeline.fill(&df).unwrap().report;

    let planned: Vec<&str> = plan
        .processing_order
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(planned, imputed_columns(&report));
    assert_eq!(plan.partition.feature_columns, vec!["station"]);
}
