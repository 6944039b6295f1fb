//! Shared utilities for the imputation pipeline.
//!
//! This module contains the dtype helpers, value hashing and null-filling
//! primitives used by the imputers, the executor and the finalizer.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a data type for imputation purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date, datetime, time or duration types
    Datetime,
    /// Boolean type
    Boolean,
    /// String or categorical type
    String,
    /// Columns that hold only nulls and have no concrete type
    Null,
    /// Nested, binary and other types the pipeline cannot fill
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a temporal type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time | DataType::Duration(_)
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::String
    } else if matches!(dtype, DataType::Null) {
        DtypeCategory::Null
    } else {
        DtypeCategory::Other
    }
}

/// Whether the pipeline can impute and zero-fill a column of this type.
#[inline]
pub fn is_supported_dtype(dtype: &DataType) -> bool {
    get_dtype_category(dtype) != DtypeCategory::Other
}

// =============================================================================
// Value Hashing
// =============================================================================

/// Hashable identity of a single cell, used for frequency counting.
///
/// Floats are keyed by their bit pattern so that distinct values never
/// collapse through display rounding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(String),
}

/// Bit pattern of a float with `-0.0` folded into `0.0`.
fn float_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// Build the [`ValueKey`] of a non-null value.
pub fn value_key(value: &AnyValue) -> ValueKey {
    // strings and categories
    if let Some(s) = value.get_str() {
        return ValueKey::Text(s.to_string());
    }

    match value {
        AnyValue::Boolean(b) => ValueKey::Bool(*b),
        AnyValue::Float32(v) => ValueKey::Float(float_bits(f64::from(*v))),
        AnyValue::Float64(v) => ValueKey::Float(float_bits(*v)),
        other => match other.extract::<i64>() {
            Some(v) => ValueKey::Int(v),
            None => ValueKey::Text(other.to_string()),
        },
    }
}

// =============================================================================
// Missing Value Utilities
// =============================================================================

/// Total number of null cells in a DataFrame.
pub fn total_missing(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|col| col.null_count()).sum()
}

/// Turn float NaN values into nulls. Non-float series are returned as-is.
pub fn nan_to_null(series: &Series) -> PolarsResult<Series> {
    if !series.dtype().is_float() {
        return Ok(series.clone());
    }

    let nan_mask = series.is_nan()?;
    if !nan_mask.any() {
        return Ok(series.clone());
    }

    let nulls = Series::full_null(series.name().clone(), series.len(), series.dtype());
    series.zip_with(&!nan_mask, &nulls)
}

/// Replace nulls with the zero value of the series' type.
///
/// - numeric: `0`
/// - boolean: `false`
/// - string and categorical: `"0"` (the result is a string column)
/// - temporal: zero of the physical representation (the epoch)
/// - null-typed: an `Int64` column of zeros
pub fn zero_fill_series(series: &Series) -> PolarsResult<Series> {
    if series.null_count() == 0 {
        return Ok(series.clone());
    }

    let name = series.name().clone();
    let len = series.len();

    match get_dtype_category(series.dtype()) {
        DtypeCategory::Numeric => series.fill_null(FillNullStrategy::Zero),
        DtypeCategory::Boolean => {
            let zeros = BooleanChunked::full(name, false, len).into_series();
            series.zip_with(&series.is_not_null(), &zeros)
        }
        DtypeCategory::String => {
            let text = series.cast(&DataType::String)?;
            let zeros = StringChunked::full(name, "0", len).into_series();
            text.zip_with(&text.is_not_null(), &zeros)
        }
        DtypeCategory::Datetime => {
            let physical = series
                .to_physical_repr()
                .fill_null(FillNullStrategy::Zero)?;
            physical.cast(series.dtype())
        }
        DtypeCategory::Null => Ok(Int64Chunked::full(name, 0, len).into_series()),
        DtypeCategory::Other => Err(PolarsError::InvalidOperation(
            format!(
                "cannot zero-fill column '{}' of type {}",
                name,
                series.dtype()
            )
            .into(),
        )),
    }
}

// =============================================================================
// Tests
// =============================================================================
