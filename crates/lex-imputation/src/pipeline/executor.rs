//! Imputation executor module.
//!
//! Contains the per-column imputation loop and the final zero-fill pass.

use crate::config::ColumnOrder;
use crate::error::{ImputationError, Result, ResultExt};
use crate::imputers::ColumnImputer;
use crate::types::{ColumnImputation, ColumnPartition, FillMethod};
use crate::utils::{nan_to_null, zero_fill_series};
use polars::prelude::*;
use tracing::{debug, info};

/// Executes imputation operations on a DataFrame.
pub struct ImputationExecutor;

impl ImputationExecutor {
    /// Convert float NaN values to nulls in every float column.
    ///
    /// Returns the number of values converted.
    pub fn normalize_nan(
        &self,
        df: &mut DataFrame,
        processing_steps: &mut Vec<String>,
    ) -> Result<usize> {
        let mut converted_total = 0;

        for col_name in Self::column_names(df) {
            let (normalized, converted) = {
                let column = df.column(&col_name)?;
                if !column.dtype().is_float() {
                    continue;
                }
                let normalized = nan_to_null(column.as_materialized_series())?;
                let converted = normalized.null_count() - column.null_count();
                (normalized, converted)
            };

            if converted > 0 {
                df.replace(&col_name, normalized)?;
                converted_total += converted;
                processing_steps.push(format!(
                    "Treated {} NaN values in '{}' as missing",
                    converted, col_name
                ));
                debug!("Converted {} NaN values in '{}'", converted, col_name);
            }
        }

        Ok(converted_total)
    }

    /// Impute every incomplete column, in the requested order.
    ///
    /// Each filled column is written back into `df` and appended to the
    /// feature set passed to the next imputation. Returns the imputation
    /// records and the final feature set.
    pub fn impute_columns(
        &self,
        df: &mut DataFrame,
        partition: &ColumnPartition,
        order: ColumnOrder,
        imputer: &dyn ColumnImputer,
        processing_steps: &mut Vec<String>,
    ) -> Result<(Vec<ColumnImputation>, Vec<String>)> {
        let mut feature_columns = partition.feature_columns.clone();
        let ordered = partition.ordered(order);

        if ordered.is_empty() {
            debug!("No columns with missing values");
            return Ok((Vec::new(), feature_columns));
        }

        info!(
            "Imputing {} columns with '{}' imputer, ordered by {}",
            ordered.len(),
            imputer.name(),
            order.display_name()
        );

        let mut imputations = Vec::with_capacity(ordered.len());
        for descriptor in ordered {
            let col_name = descriptor.name;
            debug!(
                "Processing '{}' ({} missing, {} features available)...",
                col_name,
                descriptor.missing_count,
                feature_columns.len()
            );

            let imputed = imputer
                .impute(df, &col_name, &feature_columns)
                .context(format!("Imputing column '{}'", col_name))?;

            if imputed.series.len() != df.height() {
                return Err(ImputationError::ImputationFailed {
                    column: col_name,
                    reason: format!(
                        "imputer returned {} values for {} rows",
                        imputed.series.len(),
                        df.height()
                    ),
                });
            }

            df.replace(&col_name, imputed.series)
                .context(format!("Replacing column '{}'", col_name))?;

            let fill_display = imputed.fill_value.as_deref().unwrap_or("-");
            processing_steps.push(match imputed.method {
                FillMethod::Mode => format!(
                    "Filled {} values in '{}' with mode: {}",
                    descriptor.missing_count, col_name, fill_display
                ),
                FillMethod::ZeroFallback => format!(
                    "Filled {} values in '{}' with zero (no mode): {}",
                    descriptor.missing_count, col_name, fill_display
                ),
            });

            feature_columns.push(col_name.clone());
            imputations.push(ColumnImputation {
                column: col_name,
                missing_count: descriptor.missing_count,
                method: imputed.method,
                fill_value: imputed.fill_value,
            });
        }

        Ok((imputations, feature_columns))
    }

    /// Final cleanup for any remaining missing values.
    ///
    /// Returns the number of values filled.
    pub fn zero_fill_remaining(
        &self,
        df: &mut DataFrame,
        processing_steps: &mut Vec<String>,
    ) -> Result<usize> {
        let mut filled_total = 0;

        for col_name in Self::column_names(df) {
            let (filled, missing) = {
                let column = df.column(&col_name)?;
                let missing = column.null_count();
                if missing == 0 {
                    continue;
                }
                let filled = zero_fill_series(column.as_materialized_series()).map_err(|e| {
                    ImputationError::ImputationFailed {
                        column: col_name.clone(),
                        reason: e.to_string(),
                    }
                })?;
                (filled, missing)
            };

            df.replace(&col_name, filled)?;
            filled_total += missing;
            debug!("Zero-filled {} values in '{}'", missing, col_name);
        }

        if filled_total > 0 {
            processing_steps.push(format!(
                "Final cleanup: zero-filled {} remaining missing values",
                filled_total
            ));
        }

        Ok(filled_total)
    }

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect()
    }
}
