use crate::config::ColumnOrder;
use serde::{Deserialize, Serialize};

/// A column that still has missing values, tagged with how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub missing_count: usize,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, missing_count: usize) -> Self {
        Self {
            name: name.into(),
            missing_count,
        }
    }
}

/// Split of a dataset's columns into complete and incomplete ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPartition {
    /// Columns with no missing values, in dataset order.
    pub feature_columns: Vec<String>,
    /// Columns with at least one missing value, in dataset order.
    pub inference_columns: Vec<ColumnDescriptor>,
}

impl ColumnPartition {
    /// Incomplete columns in the order they should be imputed.
    ///
    /// The ascending sort is stable, so columns with equal missing counts
    /// keep their dataset order.
    pub fn ordered(&self, order: ColumnOrder) -> Vec<ColumnDescriptor> {
        let mut columns = self.inference_columns.clone();
        if order == ColumnOrder::MissingCountAscending {
            columns.sort_by_key(|c| c.missing_count);
        }
        columns
    }

    /// Total number of missing values across all columns.
    pub fn total_missing(&self) -> usize {
        self.inference_columns.iter().map(|c| c.missing_count).sum()
    }

    /// Whether the dataset has no missing values at all.
    pub fn is_complete(&self) -> bool {
        self.inference_columns.is_empty()
    }
}

/// How the missing values of a column were filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillMethod {
    /// Most frequent non-missing value.
    Mode,
    /// Zero of the column's type, used when no mode exists.
    ZeroFallback,
}

/// Per-column record of an imputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnImputation {
    pub column: String,
    pub missing_count: usize,
    pub method: FillMethod,
    /// Fill value rendered as text, if one was used.
    pub fill_value: Option<String>,
}

/// Serializable summary of a fill run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    pub rows: usize,
    pub columns: usize,
    pub missing_before: usize,
    pub missing_after: usize,
    pub column_order: ColumnOrder,
    /// Imputed columns, in processing order
    pub imputations: Vec<ColumnImputation>,
    /// Feature set after every imputation, complete columns first
    pub feature_columns: Vec<String>,
    /// Values zero-filled by the final pass
    pub zero_filled_values: usize,
    pub processing_steps: Vec<String>,
    pub duration_ms: u64,
}

impl FillReport {
    /// Number of columns the imputer touched.
    pub fn columns_imputed(&self) -> usize {
        self.imputations.len()
    }
}
