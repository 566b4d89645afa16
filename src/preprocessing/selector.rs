//! Column selection transformer

use crate::error::{Result, TitanicError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Selects a fixed, ordered subset of columns from a DataFrame.
///
/// Stateless: nothing is learned during `fit`. The output always carries the
/// requested columns in the requested order, regardless of their order in the
/// input frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSelector {
    columns: Vec<String>,
}

impl ColumnSelector {
    /// Create a selector for the given columns
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Columns this selector extracts
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// No-op: column selection learns nothing from the data
    pub fn fit(&mut self, _df: &DataFrame) -> Result<&mut Self> {
        Ok(self)
    }

    /// Return the selected columns, in selector order.
    ///
    /// Fails with [`TitanicError::MissingColumns`] naming every requested
    /// column that is absent from the input.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df!(
            "Pclass" => &[1i64, 2, 3],
            "Sex" => &["male", "female", "male"],
            "Age" => &[22.0, 38.0, 26.0],
        )
        .unwrap()
    }

    #[test]
    fn test_selects_in_requested_order() {
        let selector = ColumnSelector::new(vec!["Sex", "Pclass"]);
        let result = selector.transform(&sample_df()).unwrap();

        let names: Vec<String> = result
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["Sex".to_string(), "Pclass".to_string()]);
        assert_eq!(result.height(), 3);
    }

    #[test]
    fn test_missing_column_is_named() {
        let selector = ColumnSelector::new(vec!["Pclass", "Cabin"]);
        let err = selector.transform(&sample_df()).unwrap_err();

        match err {
            TitanicError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["Cabin".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_fit_is_noop() {
        let mut selector = ColumnSelector::new(vec!["Pclass"]);
        assert!(selector.fit(&sample_df()).is_ok());
        assert_eq!(selector.columns(), &["Pclass".to_string()]);
    }
}
