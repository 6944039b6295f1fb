//! Imputation module for handling missing values.
//!
//! Imputers fill one column at a time. They receive the names of the columns
//! that are already complete so that an implementation can infer the target
//! from them; the bundled [`ModeImputer`] only looks at the target column.

mod mode;

pub use mode::ModeImputer;

use crate::error::Result;
use crate::types::FillMethod;
use polars::prelude::*;

/// A column whose missing values have been filled.
#[derive(Debug, Clone)]
pub struct ImputedColumn {
    /// The filled column, with the target column's name.
    pub series: Series,
    /// How the values were filled.
    pub method: FillMethod,
    /// Fill value rendered as text, if a single value was used.
    pub fill_value: Option<String>,
}

/// Trait for per-column imputers.
///
/// Implementations must return a series with the same length and name as
/// the target column.
pub trait ColumnImputer: Send + Sync {
    /// Short identifier used in logs and processing steps.
    fn name(&self) -> &'static str;

    /// Fill the missing values of `target` in `df`.
    fn impute(
        &self,
        df: &DataFrame,
        target: &str,
        feature_columns: &[String],
    ) -> Result<ImputedColumn>;
}
