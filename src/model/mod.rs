//! Generic model contract and the Titanic survival model
//!
//! [`Model`] is the fit/predict/evaluate/save/load contract every model in
//! this crate satisfies; [`TitanicModel`] is the one concrete implementation,
//! a random-forest pipeline over the `Pclass` and `Sex` features.

mod titanic;

pub use titanic::{SurvivalPipeline, TitanicModel};

use crate::error::Result;
use crate::export::{self, ModelMetadata, SerializationFormat};
use ndarray::Array1;
use polars::prelude::DataFrame;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Contract for a fittable, persistable classification model.
///
/// `fit` owns whatever state the model learns; that state is opaque to
/// callers and reused by every subsequent `predict`, `evaluate`, and `save`.
/// `save` and `load` delegate to the [`crate::export`] envelope format.
pub trait Model: Serialize + DeserializeOwned {
    /// Short type name recorded in persisted metadata
    fn model_type(&self) -> &'static str;

    /// Parameters used for fitting the model
    fn params(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Feature columns the model consumes
    fn feature_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Fit the model on a training dataset
    fn fit(&mut self, x: &DataFrame, y: &Array1<f64>) -> Result<()>;

    /// Produce predictions for the given dataset
    fn predict(&self, x: &DataFrame) -> Result<Array1<f64>>;

    /// Evaluate the model on a dataset, returning named scores
    fn evaluate(&self, x: &DataFrame, y: &Array1<f64>) -> Result<HashMap<String, f64>>;

    /// Save the model (fitted state included) to the given path
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let metadata = ModelMetadata::new(self.model_type())
            .with_model_type(self.model_type())
            .with_features(self.feature_names())
            .with_hyperparameters(self.params());
        export::save_model(self, &metadata, path, SerializationFormat::Binary)
    }

    /// Load a model from the given path
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let (model, _metadata) = export::load_model(path)?;
        Ok(model)
    }
}
