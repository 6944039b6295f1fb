//! Column classification for imputation.
//!
//! Splits a dataset into complete columns, which are available as features,
//! and incomplete columns, which still need their missing values inferred.

use crate::error::{ImputationError, Result};
use crate::types::{ColumnDescriptor, ColumnPartition};
use crate::utils::is_supported_dtype;
use polars::prelude::*;
use tracing::debug;

/// Classifies the columns of a dataset by their missing values.
pub struct ColumnClassifier;

impl ColumnClassifier {
    /// Check that every column has a dtype the pipeline can fill.
    pub fn validate(df: &DataFrame) -> Result<()> {
        for col in df.get_columns() {
            if !is_supported_dtype(col.dtype()) {
                return Err(ImputationError::invalid_input(
                    col.name().as_str(),
                    format!("unsupported column type {}", col.dtype()),
                ));
            }
        }
        Ok(())
    }

    /// Partition the columns of a dataset into complete and incomplete sets.
    ///
    /// Both sets keep the dataset's column order.
    pub fn classify(df: &DataFrame) -> ColumnPartition {
        let mut partition = ColumnPartition::default();

        for col in df.get_columns() {
            let name = col.name().to_string();
            let missing_count = col.null_count();
            if missing_count > 0 {
                debug!("Column '{}' has {} missing values", name, missing_count);
                partition
                    .inference_columns
                    .push(ColumnDescriptor::new(name, missing_count));
            } else {
                partition.feature_columns.push(name);
            }
        }

        partition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_mixed_columns() {
        let df = df![
            "id" => [1, 2, 3, 4],
            "city" => [Some("Oslo"), None, None, Some("Oslo")],
            "temp" => [Some(1.5), None, Some(2.0), Some(2.0)],
            "flag" => [true, false, true, true],
        ]
        .unwrap();

        let partition = ColumnClassifier::classify(&df);

        assert_eq!(partition.feature_columns, vec!["id", "flag"]);
        assert_eq!(
            partition.inference_columns,
            vec![
                ColumnDescriptor::new("city", 2),
                ColumnDescriptor::new("temp", 1),
            ]
        );
        assert_eq!(partition.total_missing(), 3);
    }

    #[test]
    fn test_classify_complete_dataset() {
        let df = df![
            "a" => [1, 2],
            "b" => ["x", "y"],
        ]
        .unwrap();

        let partition = ColumnClassifier::classify(&df);
        assert!(partition.is_complete());
        assert_eq!(partition.feature_columns.len(), 2);
    }

    #[test]
    fn test_classify_empty_dataset() {
        let partition = ColumnClassifier::classify(&DataFrame::empty());
        assert!(partition.is_complete());
        assert!(partition.feature_columns.is_empty());
    }

    #[test]
    fn test_validate_accepts_supported_types() {
        let df = df![
            "a" => [Some(1), None],
            "b" => [Some("x"), None],
            "c" => [Some(true), None],
        ]
        .unwrap();

        assert!(ColumnClassifier::validate(&df).is_ok());
    }

    #[test]
    fn test_validate_rejects_binary_column() {
        let values: Vec<Option<&[u8]>> = vec![Some(b"ab".as_slice()), None];
        let binary = Series::new("payload".into(), values);
        let df = DataFrame::new(vec![binary.into_column()]).unwrap();

        let err = ColumnClassifier::validate(&df).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("payload"));
    }
}
