//! RandomForest-based model for predicting survival in the Titanic dataset

use super::Model;
use crate::error::{Result, TitanicError};
use crate::preprocessing::{
    to_feature_matrix, ColumnSelector, ColumnTransformer, ImputeStrategy, Imputer, OneHotEncoder,
    TransformStep, TransformerEntry,
};
use crate::training::{
    mean_squared_error, CVResults, CVStrategy, CrossValidator, RandomForestClassifier,
};
use ndarray::Array1;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Feature columns the model consumes
const FEATURE_COLUMNS: [&str; 2] = ["Pclass", "Sex"];

/// Default number of trees
const DEFAULT_N_TREES: usize = 200;

/// Number of cross-validation folds used by `evaluate`
const EVAL_FOLDS: usize = 5;

/// The full estimator: column selection, preprocessing, and the forest.
///
/// Fitting is sequential: select the feature columns, fit-transform the
/// column transformer, then fit the forest on the resulting matrix. Once
/// fitted the pipeline is read-only and drives every prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurvivalPipeline {
    selector: ColumnSelector,
    preprocessor: ColumnTransformer,
    forest: RandomForestClassifier,
}

impl SurvivalPipeline {
    fn fit(&mut self, x: &DataFrame, y: &Array1<f64>) -> Result<()> {
        let selected = self.selector.transform(x)?;
        let encoded = self.preprocessor.fit_transform(&selected)?;
        let matrix = to_feature_matrix(&encoded)?;
        self.forest.fit(&matrix, y)?;
        Ok(())
    }

    fn predict(&self, x: &DataFrame) -> Result<Array1<f64>> {
        let selected = self.selector.transform(x)?;
        let encoded = self.preprocessor.transform(&selected)?;
        let matrix = to_feature_matrix(&encoded)?;
        self.forest.predict(&matrix)
    }

    /// Column names fed to the forest, available after fit
    pub fn output_columns(&self) -> &[String] {
        self.preprocessor.output_columns()
    }
}

/// A RandomForest-based model for predicting survival in the Titanic dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitanicModel {
    n_trees: usize,
    random_state: Option<u64>,
    estimator: Option<SurvivalPipeline>,
}

impl Default for TitanicModel {
    fn default() -> Self {
        Self::new(DEFAULT_N_TREES)
    }
}

impl TitanicModel {
    /// Create a model with the given number of trees
    pub fn new(n_trees: usize) -> Self {
        Self {
            n_trees,
            random_state: None,
            estimator: None,
        }
    }

    /// Set random state for reproducible fits
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Number of trees in the forest
    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    /// Whether the model has been fit
    pub fn is_fitted(&self) -> bool {
        self.estimator.is_some()
    }

    /// The fitted pipeline, if any
    pub fn estimator(&self) -> Option<&SurvivalPipeline> {
        self.estimator.as_ref()
    }

    fn build_estimator(&self) -> SurvivalPipeline {
        let preprocessor = ColumnTransformer::new(vec![
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
        ]);

        let mut forest = RandomForestClassifier::new(self.n_trees);
        if let Some(seed) = self.random_state {
            forest = forest.with_random_state(seed);
        }

        SurvivalPipeline {
            selector: ColumnSelector::new(FEATURE_COLUMNS.to_vec()),
            preprocessor,
            forest,
        }
    }

    fn take_rows(df: &DataFrame, indices: &[usize]) -> Result<DataFrame> {
        let idx = IdxCa::from_vec(
            "idx".into(),
            indices.iter().map(|&i| i as IdxSize).collect(),
        );
        df.take(&idx).map_err(|e| TitanicError::DataError(e.to_string()))
    }
}

impl Model for TitanicModel {
    fn model_type(&self) -> &'static str {
        "TitanicModel"
    }

    fn params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("n_trees".to_string(), self.n_trees.to_string());
        params
    }

    fn feature_names(&self) -> Vec<String> {
        FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    fn fit(&mut self, x: &DataFrame, y: &Array1<f64>) -> Result<()> {
        if x.height() != y.len() {
            return Err(TitanicError::ShapeError {
                expected: format!("y length = {}", x.height()),
                actual: format!("y length = {}", y.len()),
            });
        }

        info!(n_trees = self.n_trees, rows = x.height(), "fitting survival model");

        let mut estimator = self.build_estimator();
        estimator.fit(x, y)?;
        self.estimator = Some(estimator);

        Ok(())
    }

    fn predict(&self, x: &DataFrame) -> Result<Array1<f64>> {
        let estimator = self.estimator.as_ref().ok_or(TitanicError::NotFit)?;
        estimator.predict(x)
    }

    /// Score the model with 5-fold cross-validation.
    ///
    /// A fresh pipeline is fitted per fold from this model's parameters; the
    /// stored fit is left untouched. Returns the mean fold MSE under `"mse"`.
    fn evaluate(&self, x: &DataFrame, y: &Array1<f64>) -> Result<HashMap<String, f64>> {
        if self.estimator.is_none() {
            return Err(TitanicError::NotFit);
        }
        if x.height() != y.len() {
            return Err(TitanicError::ShapeError {
                expected: format!("y length = {}", x.height()),
                actual: format!("y length = {}", y.len()),
            });
        }

        let cv = CrossValidator::new(CVStrategy::KFold {
            n_splits: EVAL_FOLDS,
            shuffle: false,
        });
        let splits = cv.split(x.height(), Some(y))?;

        let mut scores = Vec::with_capacity(splits.len());
        for split in &splits {
            let x_train = Self::take_rows(x, &split.train_indices)?;
            let y_train: Array1<f64> =
                Array1::from_vec(split.train_indices.iter().map(|&i| y[i]).collect());
            let x_test = Self::take_rows(x, &split.test_indices)?;
            let y_test: Array1<f64> =
                Array1::from_vec(split.test_indices.iter().map(|&i| y[i]).collect());

            let mut fold_estimator = self.build_estimator();
            fold_estimator.fit(&x_train, &y_train)?;
            let predictions = fold_estimator.predict(&x_test)?;

            let fold_mse = mean_squared_error(&y_test, &predictions);
            debug!(fold = split.fold_idx, mse = fold_mse, "cross-validation fold scored");
            scores.push(fold_mse);
        }

        let results = CVResults::from_scores(scores);
        info!(mse = results.mean_score, folds = results.n_folds, "model evaluated");

        let mut metrics = HashMap::new();
        metrics.insert("mse".to_string(), results.mean_score);
        Ok(metrics)
    }
}
