//! Model training module
//!
//! Provides the tree ensemble the survival model delegates to, plus the
//! cross-validation splitters and metrics used for evaluation.

pub mod cross_validation;
pub mod decision_tree;
pub mod metrics;
pub mod random_forest;

pub use cross_validation::{CVResults, CVSplit, CVStrategy, CrossValidator};
pub use decision_tree::{Criterion, DecisionTree, TreeNode};
pub use metrics::{accuracy_score, mean_squared_error, ModelMetrics};
pub use random_forest::{MaxFeatures, RandomForestClassifier};
