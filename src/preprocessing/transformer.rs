//! Column-wise transformation pipeline

use crate::error::{Result, TitanicError};
use super::{encoder::OneHotEncoder, imputer::Imputer};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// A single preprocessing step applied to a column subset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TransformStep {
    /// Missing value imputation
    Impute(Imputer),
    /// One-hot encoding
    Encode(OneHotEncoder),
}

impl TransformStep {
    fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        let columns: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
        let cols: Vec<&str> = columns.iter().map(|s| s.as_str()).collect();
        match self {
            TransformStep::Impute(imputer) => imputer.fit_transform(df, &cols),
            TransformStep::Encode(encoder) => encoder.fit_transform(df, &cols),
        }
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        match self {
            TransformStep::Impute(imputer) => imputer.transform(df),
            TransformStep::Encode(encoder) => encoder.transform(df),
        }
    }
}

/// A named sequence of steps over a fixed column subset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformerEntry {
    name: String,
    steps: Vec<TransformStep>,
    columns: Vec<String>,
}

impl TransformerEntry {
    /// Create a named entry applying `steps` in order to `columns`
    pub fn new<S: Into<String>>(name: S, steps: Vec<TransformStep>, columns: Vec<S>) -> Self {
        Self {
            name: name.into(),
            steps,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    fn select(&self, df: &DataFrame) -> Result<DataFrame> {
        let missing: Vec<String> = self
            .columns
            .iter()
            .filter(|name| df.column(name).is_err())
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(TitanicError::MissingColumns(missing));
        }

        let selected: Vec<Column> = self
            .columns
            .iter()
            .map(|name| df.column(name).map(|c| c.clone()))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e: PolarsError| TitanicError::DataError(e.to_string()))?;

        DataFrame::new(selected).map_err(|e| TitanicError::DataError(e.to_string()))
    }
}

/// Applies named step sequences to disjoint column subsets.
///
/// Columns not claimed by any entry are dropped. Entry outputs are
/// concatenated horizontally in entry order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTransformer {
    transformers: Vec<TransformerEntry>,
    output_columns: Vec<String>,
    is_fitted: bool,
}

impl ColumnTransformer {
    /// Create a transformer from named entries
    pub fn new(transformers: Vec<TransformerEntry>) -> Self {
        Self {
            transformers,
            output_columns: Vec::new(),
            is_fitted: false,
        }
    }

    /// Fit every entry on its columns and return the transformed frame
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        let mut outputs: Vec<Column> = Vec::new();

        for entry in &mut self.transformers {
            let mut frame = entry.select(df)?;
            for step in &mut entry.steps {
                frame = step.fit_transform(&frame)?;
            }
            outputs.extend(frame.get_columns().iter().cloned());
        }

        let result =
            DataFrame::new(outputs).map_err(|e| TitanicError::DataError(e.to_string()))?;

        self.output_columns = result
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        self.is_fitted = true;

        Ok(result)
    }

    /// Transform new data with the fitted entries
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(TitanicError::NotFit);
        }

        let mut outputs: Vec<Column> = Vec::new();

        for entry in &self.transformers {
            let mut frame = entry.select(df)?;
            for step in &entry.steps {
                frame = step.transform(&frame)?;
            }
            outputs.extend(frame.get_columns().iter().cloned());
        }

        DataFrame::new(outputs).map_err(|e| TitanicError::DataError(e.to_string()))
    }

    /// Column names of the transformed output, available after fit
    pub fn output_columns(&self) -> &[String] {
        &self.output_columns
    }
}

/// Convert a fully numeric DataFrame into a feature matrix
pub fn to_feature_matrix(df: &DataFrame) -> Result<Array2<f64>> {
    let height = df.height();
    let width = df.width();
    let mut matrix = Array2::zeros((height, width));

    for (j, column) in df.get_columns().iter().enumerate() {
        let casted = column
            .as_materialized_series()
            .cast(&DataType::Float64)
            .map_err(|e| TitanicError::DataError(e.to_string()))?;
        let ca = casted
            .f64()
            .map_err(|e| TitanicError::DataError(e.to_string()))?;

        for (i, val) in ca.into_iter().enumerate() {
            matrix[[i, j]] = val.ok_or_else(|| {
                TitanicError::DataError(format!(
                    "null value in column '{}' after preprocessing",
                    column.name()
                ))
            })?;
        }
    }

    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::imputer::ImputeStrategy;

    fn titanic_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Pclass".into(), &[Some(1.0), Some(3.0), None, Some(3.0)]),
            Column::new(
                "Sex".into(),
                &[Some("male"), Some("female"), Some("male"), None],
            ),
            Column::new("Age".into(), &[Some(22.0), Some(38.0), Some(26.0), Some(35.0)]),
        ])
        .unwrap()
    }

    fn build_transformer() -> ColumnTransformer {
        ColumnTransformer::new(vec![
            TransformerEntry::new(
                "passenger_class",
                vec![TransformStep::Impute(Imputer::new(
                    ImputeStrategy::MostFrequent,
                ))],
                vec!["Pclass"],
            ),
            TransformerEntry::new(
                "sex",
                vec![
                    TransformStep::Impute(Imputer::new(ImputeStrategy::MostFrequent)),
                    TransformStep::Encode(OneHotEncoder::new().with_drop_first(true)),
                ],
                vec!["Sex"],
            ),
        ])
    }

    #[test]
    fn test_fit_transform_drops_remainder() {
        let mut ct = build_transformer();
        let result = ct.fit_transform(&titanic_df()).unwrap();

        // "Age" is unclaimed and dropped
        assert!(result.column("Age").is_err());
        assert!(result.column("Pclass").is_ok());
        assert!(result.column("Sex_male").is_ok());
        assert_eq!(
            ct.output_columns(),
            &["Pclass".to_string(), "Sex_male".to_string()]
        );
    }

    #[test]
    fn test_imputation_within_entries() {
        let mut ct = build_transformer();
        let result = ct.fit_transform(&titanic_df()).unwrap();

        // Pclass null imputed with the mode (3.0)
        let pclass = result.column("Pclass").unwrap().f64().unwrap();
        assert_eq!(pclass.get(2), Some(3.0));

        // Sex null imputed with "male", then encoded to 1.0
        let male = result.column("Sex_male").unwrap().f64().unwrap();
        assert_eq!(male.get(3), Some(1.0));
    }

    #[test]
    fn test_transform_before_fit() {
        let ct = build_transformer();
        assert!(matches!(
            ct.transform(&titanic_df()),
            Err(TitanicError::NotFit)
        ));
    }

    #[test]
    fn test_to_feature_matrix() {
        let mut ct = build_transformer();
        let transformed = ct.fit_transform(&titanic_df()).unwrap();
        let matrix = to_feature_matrix(&transformed).unwrap();

        assert_eq!(matrix.shape(), &[4, 2]);
        assert_eq!(matrix[[0, 0]], 1.0); // Pclass
        assert_eq!(matrix[[0, 1]], 1.0); // Sex_male
        assert_eq!(matrix[[1, 1]], 0.0); // female
    }
}
