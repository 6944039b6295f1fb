//! Main imputation pipeline module.
//!
//! This module provides the core `FillPipeline` struct and builder for
//! orchestrating the classify, impute and finalize steps.

use crate::config::ImputationConfig;
use crate::error::{Result, ResultExt};
use crate::imputers::{ColumnImputer, ModeImputer};
use crate::pipeline::ImputationExecutor;
use crate::profiler::ColumnClassifier;
use crate::types::{ColumnDescriptor, ColumnPartition, FillReport};
use crate::utils::total_missing;
use chrono::Local;
use polars::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Output of a [`FillPipeline`] run.
#[derive(Debug, Clone)]
pub struct FillResult {
    /// The filled dataset.
    pub dataframe: DataFrame,
    /// What was done to it.
    pub report: FillReport,
}

impl FillResult {
    /// Take the filled dataset, dropping the report.
    pub fn into_dataframe(self) -> DataFrame {
        self.dataframe
    }
}

/// What a run would do, without filling anything.
#[derive(Debug, Clone, Serialize)]
pub struct FillPlan {
    pub partition: ColumnPartition,
    /// Incomplete columns in processing order.
    pub processing_order: Vec<ColumnDescriptor>,
}

/// The imputation pipeline.
///
/// Use [`FillPipeline::builder()`] to create a pipeline with custom
/// configuration or a custom [`ColumnImputer`].
///
/// The input DataFrame is never modified; every run returns a new one.
///
/// # Example
///
/// ```rust,ignore
/// use lex_imputation::{ColumnOrder, FillPipeline, ImputationConfig};
///
/// let result = FillPipeline::builder()
///     .config(
///         ImputationConfig::builder()
///             .column_order(ColumnOrder::MissingCountAscending)
///             .build(),
///     )
///     .build()
///     .fill(&dataframe)?;
///
/// println!("Imputed {} columns", result.report.columns_imputed());
/// ```
pub struct FillPipeline {
    config: ImputationConfig,
    imputer: Arc<dyn ColumnImputer>,
    executor: ImputationExecutor,
}

static_assertions::assert_impl_all!(FillPipeline: Send, Sync);

impl Default for FillPipeline {
    fn default() -> Self {
        FillPipeline::builder().build()
    }
}

impl FillPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> FillPipelineBuilder {
        FillPipelineBuilder::default()
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &ImputationConfig {
        &self.config
    }

    /// Classify the dataset and compute the processing order.
    pub fn plan(&self, df: &DataFrame) -> Result<FillPlan> {
        let working = self.prepare(df, &mut Vec::new())?;
        let partition = ColumnClassifier::classify(&working);
        let processing_order = partition.ordered(self.config.column_order);

        Ok(FillPlan {
            partition,
            processing_order,
        })
    }

    /// Fill every missing value of `df`.
    ///
    /// # Errors
    ///
    /// Returns `ImputationError::InvalidInput` if a column has a type the
    /// pipeline cannot fill. Other errors come from the imputer or Polars.
    pub fn fill(&self, df: &DataFrame) -> Result<FillResult> {
        let start_time = Instant::now();
        let mut processing_steps: Vec<String> = Vec::new();

        info!(
            "Starting imputation for {} rows x {} columns...",
            df.height(),
            df.width()
        );

        // Step 1: Validate and normalize
        let mut working = self.prepare(df, &mut processing_steps)?;
        let missing_before = total_missing(&working);

        // Step 2: Classify columns
        let partition = ColumnClassifier::classify(&working);
        debug!(
            "{} complete columns, {} columns to infer",
            partition.feature_columns.len(),
            partition.inference_columns.len()
        );

        // Step 3: Impute incomplete columns
        let (imputations, feature_columns) = self.executor.impute_columns(
            &mut working,
            &partition,
            self.config.column_order,
            self.imputer.as_ref(),
            &mut processing_steps,
        )?;

        // Step 4: Zero-fill whatever is left
        let zero_filled_values = if self.config.zero_fill_remaining {
            self.executor
                .zero_fill_remaining(&mut working, &mut processing_steps)?
        } else {
            0
        };

        let missing_after = total_missing(&working);
        if missing_after > 0 {
            warn!(
                "{} missing values remain after imputation (zero fill disabled)",
                missing_after
            );
        } else {
            info!("All missing values handled successfully");
        }

        let report = FillReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            rows: working.height(),
            columns: working.width(),
            missing_before,
            missing_after,
            column_order: self.config.column_order,
            imputations,
            feature_columns,
            zero_filled_values,
            processing_steps,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        Ok(FillResult {
            dataframe: working,
            report,
        })
    }

    /// Validate `df` and return a working copy with NaN normalized if enabled.
    fn prepare(&self, df: &DataFrame, processing_steps: &mut Vec<String>) -> Result<DataFrame> {
        ColumnClassifier::validate(df).context("Validating input dataset")?;

        let mut working = df.clone();
        if self.config.treat_nan_as_missing {
            let converted = self.executor.normalize_nan(&mut working, processing_steps)?;
            if converted > 0 {
                debug!("Treated {} NaN values as missing", converted);
            }
        }

        Ok(working)
    }
}

/// Builder for [`FillPipeline`] with fluent API.
#[derive(Default)]
pub struct FillPipelineBuilder {
    config: Option<ImputationConfig>,
    imputer: Option<Arc<dyn ColumnImputer>>,
}

static_assertions::assert_impl_all!(FillPipelineBuilder: Send);

impl FillPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: ImputationConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the per-column imputer.
    ///
    /// Defaults to [`ModeImputer`].
    pub fn imputer(mut self, imputer: Arc<dyn ColumnImputer>) -> Self {
        self.imputer = Some(imputer);
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> FillPipeline {
        FillPipeline {
            config: self.config.unwrap_or_default(),
            imputer: self.imputer.unwrap_or_else(|| Arc::new(ModeImputer::new())),
            executor: ImputationExecutor,
        }
    }
}
