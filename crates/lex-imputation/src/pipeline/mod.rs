//! Pipeline module.
//!
//! This module provides the imputation pipeline and related components.

mod builder;
mod executor;

pub use builder::{FillPipeline, FillPipelineBuilder, FillPlan, FillResult};
pub use executor::ImputationExecutor;

use crate::error::Result;
use polars::prelude::*;

/// Fill every missing value of `df` using the default pipeline.
///
/// Incomplete columns are filled with their mode, fewest missing values
/// first; anything left is zero-filled. The input is not modified.
pub fn fill_dataframe(df: &DataFrame) -> Result<DataFrame> {
    FillPipeline::default().fill(df).map(FillResult::into_dataframe)
}
