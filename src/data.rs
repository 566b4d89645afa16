//! Dataset loading utilities

use crate::error::{Result, TitanicError};
use ndarray::Array1;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Load a CSV file with header and schema inference
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;

    let reader = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(file);

    reader
        .finish()
        .map_err(|e| TitanicError::DataError(e.to_string()))
}

/// Split a named target column off a DataFrame.
///
/// Returns the remaining feature frame and the target as a float array.
/// Null targets are rejected rather than silently imputed.
pub fn split_features_target(df: &DataFrame, target: &str) -> Result<(DataFrame, Array1<f64>)> {
    let target_col = df
        .column(target)
        .map_err(|_| TitanicError::FeatureNotFound(target.to_string()))?;

    let casted = target_col
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(|e| TitanicError::DataError(e.to_string()))?;
    let ca = casted
        .f64()
        .map_err(|e| TitanicError::DataError(e.to_string()))?;

    let mut values = Vec::with_capacity(ca.len());
    for val in ca.into_iter() {
        values.push(val.ok_or_else(|| {
            TitanicError::ValidationError(format!("null value in target column '{}'", target))
        })?);
    }

    let features = df
        .drop(target)
        .map_err(|e| TitanicError::DataError(e.to_string()))?;

    Ok((features, Array1::from_vec(values)))
}
