//! Data preprocessing module
//!
//! Provides the transformers the survival pipeline is built from:
//! - Column selection with informative missing-column errors
//! - Missing value imputation
//! - One-hot encoding of categorical columns
//! - Column-wise transformation with dropped remainder

mod selector;
mod imputer;
mod encoder;
mod transformer;

pub use selector::ColumnSelector;
pub use imputer::{ImputeStrategy, Imputer};
pub use encoder::OneHotEncoder;
pub use transformer::{to_feature_matrix, ColumnTransformer, TransformStep, TransformerEntry};
