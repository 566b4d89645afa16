//! One-hot encoding for categorical columns

use crate::error::{Result, TitanicError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One-hot encoder for string columns.
///
/// Category lists are learned at fit time and sorted lexicographically so the
/// output column layout is stable across runs and input orderings. With
/// `drop_first` the first (sorted) category of each column is omitted, which
/// avoids the redundant column for binary features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    drop_first: bool,
    // Maps column name -> sorted category list
    categories: HashMap<String, Vec<String>>,
    is_fitted: bool,
}

impl OneHotEncoder {
    /// Create a new encoder keeping every category
    pub fn new() -> Self {
        Self {
            drop_first: false,
            categories: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Drop the first category of each encoded column
    pub fn with_drop_first(mut self, drop_first: bool) -> Self {
        self.drop_first = drop_first;
        self
    }

    /// Fit the encoder, learning the category list of each column
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| TitanicError::FeatureNotFound(col_name.to_string()))?;
            let series = column.as_materialized_series();

            let ca = series
                .str()
                .map_err(|e| TitanicError::DataError(e.to_string()))?;

            let mut cats: Vec<String> = Vec::new();
            for val in ca.into_iter().flatten() {
                if !cats.iter().any(|c| c == val) {
                    cats.push(val.to_string());
                }
            }
            cats.sort();

            self.categories.insert(col_name.to_string(), cats);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data, replacing each fitted column with its indicator columns.
    ///
    /// Categories unseen at fit time encode as all zeros.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(TitanicError::NotFit);
        }

        let mut result = df.clone();

        for (col_name, cats) in &self.categories {
            if let Ok(column) = df.column(col_name) {
                let series = column.as_materialized_series();
                let ca = series
                    .str()
                    .map_err(|e| TitanicError::DataError(e.to_string()))?;

                let kept = if self.drop_first { &cats[1.min(cats.len())..] } else { &cats[..] };

                for category in kept {
                    let new_col_name = format!("{}_{}", col_name, category);
                    let values: Vec<f64> = ca
                        .into_iter()
                        .map(|v| if v == Some(category.as_str()) { 1.0 } else { 0.0 })
                        .collect();

                    let new_series = Series::new(new_col_name.into(), values);
                    result = result
                        .with_column(new_series)
                        .map_err(|e| TitanicError::DataError(e.to_string()))?
                        .clone();
                }

                // Drop original column
                result = result
                    .drop(col_name)
                    .map_err(|e| TitanicError::DataError(e.to_string()))?;
            }
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Fitted category list for a column
    pub fn categories(&self, column: &str) -> Option<&[String]> {
        self.categories.get(column).map(|c| c.as_slice())
    }
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}
