//! Error types for the Titanic model pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, TitanicError>;

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum TitanicError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("The DataFrame does not include the columns: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Model has not been fit")]
    NotFit,

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<polars::error::PolarsError> for TitanicError {
    fn from(err: polars::error::PolarsError) -> Self {
        TitanicError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for TitanicError {
    fn from(err: serde_json::Error) -> Self {
        TitanicError::SerializationError(err.to_string())
    }
}
