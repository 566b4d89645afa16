//! Integration test: model persistence round trips

use ndarray::Array1;
use polars::prelude::*;
use titanic_model::export::{load_model, save_model, ModelMetadata, SerializationFormat};
use titanic_model::model::{Model, TitanicModel};

fn fitted_model() -> (TitanicModel, DataFrame) {
    let df = df!(
        "Pclass" => &[1i64, 1, 2, 2, 3, 3, 3, 1, 2, 3, 1, 3],
        "Sex" => &["female", "male", "female", "male", "female", "male",
                   "male", "female", "male", "male", "male", "female"],
    )
    .unwrap();
    let target = Array1::from_vec(vec![
        1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0,
    ]);

    let mut model = TitanicModel::new(40).with_random_state(11);
    model.fit(&df, &target).unwrap();
    (model, df)
}

#[test]
fn test_save_load_preserves_predictions() {
    let (model, df) = fitted_model();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("titanic.model");

    let expected = model.predict(&df).unwrap();
    model.save(&path).unwrap();

    let loaded = TitanicModel::load(&path).unwrap();
    assert!(loaded.is_fitted(), "fitted state should survive persistence");
    assert_eq!(loaded.n_trees(), 40);
    assert_eq!(loaded.predict(&df).unwrap(), expected);
}

#[test]
fn test_envelope_carries_metadata() {
    let (model, _) = fitted_model();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("titanic.model");

    let metadata = ModelMetadata::new("titanic")
        .with_model_type("random_forest")
        .with_features(vec!["Pclass".to_string(), "Sex".to_string()]);
    save_model(&model, &metadata, &path, SerializationFormat::Json).unwrap();

    let (loaded, meta): (TitanicModel, ModelMetadata) = load_model(&path).unwrap();
    assert_eq!(meta.name, "titanic");
    assert_eq!(meta.model_type, "random_forest");
    assert_eq!(meta.feature_names, vec!["Pclass", "Sex"]);
    assert!(loaded.is_fitted());
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.model");
    assert!(TitanicModel::load(&path).is_err());
}
