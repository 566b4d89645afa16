//! Evaluation metrics

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Mean squared error between targets and predictions
pub fn mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum::<f64>()
        / y_true.len() as f64
}

/// Fraction of predictions matching the target class
pub fn accuracy_score(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| (*t - *p).abs() < 0.5)
        .count();
    correct as f64 / y_true.len() as f64
}

/// Metrics for model evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetrics {
    /// Accuracy (classification)
    pub accuracy: Option<f64>,
    /// Precision (classification)
    pub precision: Option<f64>,
    /// Recall (classification)
    pub recall: Option<f64>,
    /// F1 score (classification)
    pub f1_score: Option<f64>,
    /// Mean squared error
    pub mse: Option<f64>,
    /// Root mean squared error
    pub rmse: Option<f64>,
    /// Number of samples scored
    pub n_samples: usize,
}

impl ModelMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self {
            accuracy: None,
            precision: None,
            recall: None,
            f1_score: None,
            mse: None,
            rmse: None,
            n_samples: 0,
        }
    }

    /// Compute classification metrics
    pub fn compute_classification(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Self {
        let mut metrics = Self::new();
        metrics.n_samples = y_true.len();

        metrics.accuracy = Some(accuracy_score(y_true, y_pred));

        let (tp, fp, _, fn_) = Self::confusion_counts(y_true, y_pred);

        metrics.precision = if tp + fp > 0 {
            Some(tp as f64 / (tp + fp) as f64)
        } else {
            Some(0.0)
        };

        metrics.recall = if tp + fn_ > 0 {
            Some(tp as f64 / (tp + fn_) as f64)
        } else {
            Some(0.0)
        };

        if let (Some(p), Some(r)) = (metrics.precision, metrics.recall) {
            metrics.f1_score = if p + r > 0.0 {
                Some(2.0 * p * r / (p + r))
            } else {
                Some(0.0)
            };
        }

        metrics
    }

    /// Compute regression-style error metrics
    pub fn compute_regression(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Self {
        let mut metrics = Self::new();
        metrics.n_samples = y_true.len();

        let mse = mean_squared_error(y_true, y_pred);
        metrics.mse = Some(mse);
        metrics.rmse = Some(mse.sqrt());

        metrics
    }

    fn confusion_counts(
        y_true: &Array1<f64>,
        y_pred: &Array1<f64>,
    ) -> (usize, usize, usize, usize) {
        let mut tp = 0;
        let mut fp = 0;
        let mut tn = 0;
        let mut fn_ = 0;

        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            let t_bool = *t > 0.5;
            let p_bool = *p > 0.5;

            match (t_bool, p_bool) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (false, false) => tn += 1,
                (true, false) => fn_ += 1,
            }
        }

        (tp, fp, tn, fn_)
    }
}

impl Default for ModelMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mean_squared_error() {
        let y_true = array![1.0, 0.0, 1.0, 0.0];
        let y_pred = array![1.0, 0.0, 0.0, 0.0];

        assert!((mean_squared_error(&y_true, &y_pred) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_accuracy() {
        let y_true = array![1.0, 0.0, 1.0, 0.0];
        let y_pred = array![1.0, 1.0, 1.0, 0.0];

        assert!((accuracy_score(&y_true, &y_pred) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_classification_metrics() {
        let y_true = array![1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0];
        let y_pred = array![1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];

        let metrics = ModelMetrics::compute_classification(&y_true, &y_pred);

        assert!((metrics.accuracy.unwrap() - 0.75).abs() < 1e-12);
        assert!((metrics.precision.unwrap() - 0.75).abs() < 1e-12);
        assert!((metrics.recall.unwrap() - 0.75).abs() < 1e-12);
        assert!((metrics.f1_score.unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_regression_metrics() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![1.0, 2.0, 4.0];

        let metrics = ModelMetrics::compute_regression(&y_true, &y_pred);
        let mse = metrics.mse.unwrap();
        assert!((mse - 1.0 / 3.0).abs() < 1e-12);
        assert!((metrics.rmse.unwrap() - mse.sqrt()).abs() < 1e-12);
    }
}
