//! Configuration types for the imputation pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Order in which incomplete columns are imputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColumnOrder {
    /// Fewest missing values first. Ties keep dataset order.
    #[default]
    MissingCountAscending,
    /// Dataset order, ignoring missing counts.
    Original,
}

impl ColumnOrder {
    /// Human-readable name used in logs and reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            ColumnOrder::MissingCountAscending => "missing count (ascending)",
            ColumnOrder::Original => "original column order",
        }
    }
}

/// Configuration for the imputation pipeline.
///
/// Use [`ImputationConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_imputation::config::{ColumnOrder, ImputationConfig};
///
/// let config = ImputationConfig::builder()
///     .column_order(ColumnOrder::Original)
///     .zero_fill_remaining(true)
///     .build();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImputationConfig {
    /// Order in which incomplete columns are imputed.
    /// Default: MissingCountAscending
    pub column_order: ColumnOrder,

    /// Whether to replace any value still missing after imputation with zero.
    /// Default: true
    pub zero_fill_remaining: bool,

    /// Whether float NaN values count as missing.
    /// Default: true
    pub treat_nan_as_missing: bool,
}

impl Default for ImputationConfig {
    fn default() -> Self {
        Self {
            column_order: ColumnOrder::default(),
            zero_fill_remaining: true,
            treat_nan_as_missing: true,
        }
    }
}

impl ImputationConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ImputationConfigBuilder {
        ImputationConfigBuilder::default()
    }

    /// Load a configuration from a JSON file.
    ///
    /// Fields absent from the file keep their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Builder for [`ImputationConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ImputationConfigBuilder {
    column_order: Option<ColumnOrder>,
    zero_fill_remaining: Option<bool>,
    treat_nan_as_missing: Option<bool>,
}

impl ImputationConfigBuilder {
    /// Set the order in which incomplete columns are imputed.
    pub fn column_order(mut self, order: ColumnOrder) -> Self {
        self.column_order = Some(order);
        self
    }

    /// Enable or disable the final zero-fill pass.
    ///
    /// When disabled, values the imputer could not fill stay missing and a
    /// warning is logged.
    pub fn zero_fill_remaining(mut self, enable: bool) -> Self {
        self.zero_fill_remaining = Some(enable);
        self
    }

    /// Treat float NaN values as missing.
    pub fn treat_nan_as_missing(mut self, enable: bool) -> Self {
        self.treat_nan_as_missing = Some(enable);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ImputationConfig {
        ImputationConfig {
            column_order: self.column_order.unwrap_or_default(),
            zero_fill_remaining: self.zero_fill_remaining.unwrap_or(true),
            treat_nan_as_missing: self.treat_nan_as_missing.unwrap_or(true),
        }
    }
}
