//! Missing Value Imputation Library
//!
//! Fills the missing values of a tabular dataset, built with Rust and Polars.
//!
//! # Overview
//!
//! A fill run goes through four steps:
//!
//! - **Classification**: columns without missing values become features,
//!   the others are queued for imputation with their missing counts
//! - **Ordering**: queued columns are processed fewest-missing first
//! - **Imputation**: each queued column is filled by a [`ColumnImputer`]
//!   (the most frequent value by default) and joins the feature set
//! - **Finalization**: anything still missing is replaced with zero
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_imputation::{fill_dataframe, io::read_csv};
//!
//! let df = read_csv("data.csv")?;
//! let filled = fill_dataframe(&df)?;
//! assert_eq!(filled.get_columns().iter().map(|c| c.null_count()).sum::<usize>(), 0);
//! ```
//!
//! # Configuration
//!
//! ```rust,ignore
//! use lex_imputation::{ColumnOrder, FillPipeline, ImputationConfig};
//!
//! let config = ImputationConfig::builder()
//!     .column_order(ColumnOrder::Original)   // dataset order instead of missing count
//!     .treat_nan_as_missing(false)           // keep NaN as a value
//!     .zero_fill_remaining(true)
//!     .build();
//!
//! let result = FillPipeline::builder().config(config).build().fill(&df)?;
//! println!("{}", serde_json::to_string_pretty(&result.report)?);
//! ```

pub mod config;
pub mod error;
pub mod imputers;
pub mod io;
pub mod pipeline;
pub mod profiler;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ColumnOrder, ImputationConfig, ImputationConfigBuilder};
pub use error::{ImputationError, Result as ImputationResult, ResultExt};
pub use imputers::{ColumnImputer, ImputedColumn, ModeImputer};
pub use pipeline::{
    FillPipeline, FillPipelineBuilder, FillPlan, FillResult, ImputationExecutor, fill_dataframe,
};
pub use profiler::ColumnClassifier;
pub use types::{ColumnDescriptor, ColumnImputation, ColumnPartition, FillMethod, FillReport};
pub use utils::{DtypeCategory, get_dtype_category, total_missing, zero_fill_series};
