//! Most-frequent-value imputation.

use super::{ColumnImputer, ImputedColumn};
use crate::error::{ImputationError, Result};
use crate::types::FillMethod;
use crate::utils::{ValueKey, value_key, zero_fill_series};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Fills missing values with the most frequent value of the column.
///
/// Ties are won by the value that appears first. Columns without any
/// non-missing value are zero-filled instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeImputer;

impl ModeImputer {
    pub fn new() -> Self {
        Self
    }

    /// Row index of the first occurrence of the column's mode.
    ///
    /// Returns `None` when the column has no non-missing value.
    pub fn mode_index(series: &Series) -> Result<Option<usize>> {
        let series = series.rechunk();
        // key -> (count, first row)
        let mut counts: HashMap<ValueKey, (usize, usize)> = HashMap::new();

        for idx in 0..series.len() {
            let value = series.get(idx)?;
            if value.is_null() {
                continue;
            }
            counts.entry(value_key(&value)).or_insert((0, idx)).0 += 1;
        }

        Ok(counts
            .into_values()
            .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
            .map(|(_, first_idx)| first_idx))
    }
}

/// Render a cell for reports, without the quotes `AnyValue` puts around strings.
fn render_value(value: &AnyValue) -> String {
    match value.get_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

impl ColumnImputer for ModeImputer {
    fn name(&self) -> &'static str {
        "mode"
    }

    fn impute(
        &self,
        df: &DataFrame,
        target: &str,
        _feature_columns: &[String],
    ) -> Result<ImputedColumn> {
        let column = df
            .column(target)
            .map_err(|_| ImputationError::ColumnNotFound(target.to_string()))?;
        let series = column.as_materialized_series();

        if let Some(idx) = Self::mode_index(series)? {
            let fill_value = render_value(&series.get(idx)?);
            let fill = series.new_from_index(idx, series.len());
            let filled = series.zip_with(&series.is_not_null(), &fill)?;

            debug!("Mode of '{}' is {}", target, fill_value);
            return Ok(ImputedColumn {
                series: filled,
                method: FillMethod::Mode,
                fill_value: Some(fill_value),
            });
        }

        debug!("'{}' has no mode, filling with zero", target);
        let filled = zero_fill_series(series).map_err(|e| ImputationError::ImputationFailed {
            column: target.to_string(),
            reason: e.to_string(),
        })?;
        let fill_value = if filled.is_empty() {
            None
        } else {
            Some(render_value(&filled.get(0)?))
        };

        Ok(ImputedColumn {
            series: filled,
            method: FillMethod::ZeroFallback,
            fill_value,
        })
    }
}
