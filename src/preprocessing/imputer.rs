//! Missing value imputation

use crate::error::{Result, TitanicError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Strategy for imputing missing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace with mean (numeric only)
    Mean,
    /// Replace with median (numeric only)
    Median,
    /// Replace with mode / most frequent value
    MostFrequent,
    /// Replace with a constant value
    Constant(f64),
    /// Replace with a constant string (categorical)
    ConstantString(String),
}

/// Imputer for handling missing values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    fill_values: HashMap<String, ImputeValue>,
    is_fitted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum ImputeValue {
    Numeric(f64),
    String(String),
}

impl Imputer {
    /// Create a new imputer with the specified strategy
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            fill_values: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fit the imputer to the data, learning one fill value per column
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| TitanicError::FeatureNotFound(col_name.to_string()))?;

            let fill_value = self.compute_fill_value(column.as_materialized_series())?;
            self.fill_values.insert(col_name.to_string(), fill_value);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data by imputing missing values
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(TitanicError::NotFit);
        }

        let mut result = df.clone();

        for (col_name, fill_value) in &self.fill_values {
            if let Ok(col) = df.column(col_name) {
                let series = col.as_materialized_series();
                let filled = self.fill_series(series, fill_value)?;
                result = result
                    .with_column(filled)
                    .map_err(|e| TitanicError::DataError(e.to_string()))?
                    .clone();
            }
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    fn is_numeric_dtype(dtype: &DataType) -> bool {
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

    /// Compute mode (most frequent value) for a numeric series
    fn compute_mode_numeric(series: &Series) -> Result<f64> {
        // Count occurrences, using the f64 bit pattern as the key
        let casted = series
            .cast(&DataType::Float64)
            .map_err(|e| TitanicError::DataError(e.to_string()))?;
        let ca = casted
            .f64()
            .map_err(|e| TitanicError::DataError(e.to_string()))?;

        let mut counts: HashMap<u64, usize> = HashMap::new();
        for val in ca.into_iter().flatten() {
            *counts.entry(val.to_bits()).or_insert(0) += 1;
        }

        // Ties go to the lowest value
        let mode_key = counts
            .into_iter()
            .max_by(|a, b| {
                a.1.cmp(&b.1).then_with(|| {
                    f64::from_bits(b.0)
                        .partial_cmp(&f64::from_bits(a.0))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
            })
            .map(|(k, _)| k)
            .unwrap_or(0);

        Ok(f64::from_bits(mode_key))
    }

    /// Compute mode for a string series
    fn compute_mode_string(series: &Series) -> Result<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();

        if let Ok(ca) = series.str() {
            for val in ca.into_iter().flatten() {
                *counts.entry(val.to_string()).or_insert(0) += 1;
            }
        }

        // Ties go to the lexicographically smallest value
        let mode = counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
            .map(|(k, _)| k)
            .unwrap_or_default();

        Ok(mode)
    }

    fn compute_fill_value(&self, series: &Series) -> Result<ImputeValue> {
        match &self.strategy {
            ImputeStrategy::Mean => {
                let mean = series
                    .cast(&DataType::Float64)
                    .map_err(|e| TitanicError::DataError(e.to_string()))?
                    .f64()
                    .map_err(|e| TitanicError::DataError(e.to_string()))?
                    .mean()
                    .unwrap_or(0.0);
                Ok(ImputeValue::Numeric(mean))
            }
            ImputeStrategy::Median => {
                let median = series
                    .cast(&DataType::Float64)
                    .map_err(|e| TitanicError::DataError(e.to_string()))?
                    .f64()
                    .map_err(|e| TitanicError::DataError(e.to_string()))?
                    .median()
                    .unwrap_or(0.0);
                Ok(ImputeValue::Numeric(median))
            }
            ImputeStrategy::MostFrequent => {
                if Self::is_numeric_dtype(series.dtype()) {
                    let mode = Self::compute_mode_numeric(series)?;
                    Ok(ImputeValue::Numeric(mode))
                } else {
                    let mode = Self::compute_mode_string(series)?;
                    Ok(ImputeValue::String(mode))
                }
            }
            ImputeStrategy::Constant(val) => Ok(ImputeValue::Numeric(*val)),
            ImputeStrategy::ConstantString(val) => Ok(ImputeValue::String(val.clone())),
        }
    }

    fn fill_series(&self, series: &Series, fill_value: &ImputeValue) -> Result<Series> {
        match fill_value {
            ImputeValue::Numeric(val) => {
                let casted = series
                    .cast(&DataType::Float64)
                    .map_err(|e| TitanicError::DataError(e.to_string()))?;
                let ca = casted
                    .f64()
                    .map_err(|e| TitanicError::DataError(e.to_string()))?;

                let filled: Float64Chunked = ca
                    .into_iter()
                    .map(|opt| Some(opt.unwrap_or(*val)))
                    .collect();

                Ok(filled.with_name(series.name().clone()).into_series())
            }
            ImputeValue::String(val) => {
                let ca = series
                    .str()
                    .map_err(|e| TitanicError::DataError(e.to_string()))?;

                let filled: StringChunked = ca
                    .into_iter()
                    .map(|opt| Some(opt.unwrap_or(val.as_str()).to_string()))
                    .collect();

                Ok(filled.with_name(series.name().clone()).into_series())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_before_fit() {
        let df = df!("a" => &[1.0, 2.0]).unwrap();
        let imputer = Imputer::new(ImputeStrategy::Mean);
        assert!(matches!(
            imputer.transform(&df),
            Err(TitanicError::NotFit)
        ));
    }

    #[test]
    fn test_mean_imputation() {
        let df = DataFrame::new(vec![Column::new(
            "a".into(),
            &[Some(1.0), None, Some(3.0), Some(4.0)],
        )])
        .unwrap();

        let mut imputer = Imputer::new(ImputeStrategy::Mean);
        let result = imputer.fit_transform(&df, &["a"]).unwrap();

        let col = result.column("a").unwrap().f64().unwrap();
        // Mean of [1, 3, 4]
        assert!((col.get(1).unwrap() - 2.666666666666667).abs() < 0.001);
    }

    #[test]
    fn test_most_frequent_string() {
        let df = DataFrame::new(vec![Column::new(
            "sex".into(),
            &[Some("male"), Some("male"), None, Some("female")],
        )])
        .unwrap();

        let mut imputer = Imputer::new(ImputeStrategy::MostFrequent);
        let result = imputer.fit_transform(&df, &["sex"]).unwrap();

        let col = result.column("sex").unwrap().str().unwrap();
        assert_eq!(col.get(2), Some("male"));
        assert_eq!(col.null_count(), 0);
    }

    #[test]
    fn test_most_frequent_numeric() {
        let df = DataFrame::new(vec![Column::new(
            "pclass".into(),
            &[Some(3.0), Some(3.0), None, Some(1.0)],
        )])
        .unwrap();

        let mut imputer = Imputer::new(ImputeStrategy::MostFrequent);
        let result = imputer.fit_transform(&df, &["pclass"]).unwrap();

        let col = result.column("pclass").unwrap().f64().unwrap();
        assert_eq!(col.get(2), Some(3.0));
    }

    #[test]
    fn test_mode_tie_prefers_lowest_value() {
        let df = DataFrame::new(vec![Column::new(
            "pclass".into(),
            &[Some(2.0), Some(1.0), None],
        )])
        .unwrap();

        let mut imputer = Imputer::new(ImputeStrategy::MostFrequent);
        let result = imputer.fit_transform(&df, &["pclass"]).unwrap();

        let col = result.column("pclass").unwrap().f64().unwrap();
        assert_eq!(col.get(2), Some(1.0));
    }

    #[test]
    fn test_string_mode_tie_prefers_smallest() {
        let df = DataFrame::new(vec![Column::new(
            "sex".into(),
            &[Some("male"), Some("female"), None],
        )])
        .unwrap();

        let mut imputer = Imputer::new(ImputeStrategy::MostFrequent);
        let result = imputer.fit_transform(&df, &["sex"]).unwrap();

        let col = result.column("sex").unwrap().str().unwrap();
        assert_eq!(col.get(2), Some("female"));
    }

    #[test]
    fn test_fit_missing_column() {
        let df = df!("a" => &[1.0]).unwrap();
        let mut imputer = Imputer::new(ImputeStrategy::Mean);
        assert!(matches!(
            imputer.fit(&df, &["b"]),
            Err(TitanicError::FeatureNotFound(_))
        ));
    }
}
