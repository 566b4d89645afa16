//! Titanic survival prediction pipeline
//!
//! This crate provides a small end-to-end classification pipeline:
//! - Column selection and preprocessing (imputation, one-hot encoding)
//! - Random forest training with parallel tree construction
//! - Cross-validated evaluation
//! - Model serialization with checksummed envelopes
//!
//! # Modules
//!
//! - [`data`] - CSV loading and feature/target splitting
//! - [`preprocessing`] - Column selection, imputation, encoding
//! - [`training`] - Decision trees, random forests, cross validation, metrics
//! - [`model`] - The [`model::Model`] trait and the Titanic survival model
//! - [`export`] - Model serialization and persistence

// Core error handling
pub mod error;

// Data loading
pub mod data;

// Core ML modules
pub mod preprocessing;
pub mod training;

// Model abstraction and concrete models
pub mod model;

// Persistence
pub mod export;

pub use error::{Result, TitanicError};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{Result, TitanicError};

    // Data loading
    pub use crate::data::{load_csv, split_features_target};

    // Preprocessing
    pub use crate::preprocessing::{
        ColumnSelector, ColumnTransformer, ImputeStrategy, Imputer, OneHotEncoder,
    };

    // Training
    pub use crate::training::{
        CVResults, CVStrategy, CrossValidator, ModelMetrics, RandomForestClassifier,
    };

    // Models
    pub use crate::model::{Model, TitanicModel};

    // Persistence
    pub use crate::export::{load_model, save_model, ModelMetadata, SerializationFormat};
}
