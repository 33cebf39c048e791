//! Evaluation metrics computed on prediction/target slices.
//!
//! These are the metrics the monitored demos feed into the history:
//! classification (accuracy, precision, recall, F1 with a configurable
//! threshold) and regression (MSE, MAE). Divisions are epsilon-guarded so a
//! degenerate batch yields 0 rather than NaN.

/// Guard against division by zero in ratio metrics.
const EPSILON: f64 = 1e-7;

/// Trait for evaluation metrics.
pub trait Metric {
    /// Compute the metric given predictions and targets of equal length.
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64;

    /// Name of the metric, usable as a history key.
    fn name(&self) -> &'static str;

    /// Whether higher values are better (true) or lower (false).
    fn higher_is_better(&self) -> bool {
        true
    }
}

/// Threshold continuous predictions and targets into binary labels.
fn threshold_to_labels(
    predictions: &[f64],
    targets: &[f64],
    threshold: f64,
) -> (Vec<bool>, Vec<bool>) {
    let y_pred = predictions.iter().map(|&p| p >= threshold).collect();
    let y_true = targets.iter().map(|&t| t >= 0.5).collect();
    (y_pred, y_true)
}

/// Counts of true positives, predicted positives, and actual positives.
fn positive_counts(y_pred: &[bool], y_true: &[bool]) -> (f64, f64, f64) {
    let mut tp = 0.0;
    let mut pred_pos = 0.0;
    let mut actual_pos = 0.0;
    for (&p, &t) in y_pred.iter().zip(y_true) {
        if p && t {
            tp += 1.0;
        }
        if p {
            pred_pos += 1.0;
        }
        if t {
            actual_pos += 1.0;
        }
    }
    (tp, pred_pos, actual_pos)
}

/// Fraction of thresholded predictions matching the true labels.
#[derive(Debug, Clone, Copy)]
pub struct Accuracy {
    pub threshold: f64,
}

impl Default for Accuracy {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl Metric for Accuracy {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        assert_eq!(predictions.len(), targets.len());
        if predictions.is_empty() {
            return 0.0;
        }
        let (y_pred, y_true) = threshold_to_labels(predictions, targets, self.threshold);
        let correct = y_pred.iter().zip(&y_true).filter(|(p, t)| p == t).count();
        correct as f64 / y_pred.len() as f64
    }

    fn name(&self) -> &'static str {
        "accuracy"
    }
}

/// TP / (TP + FP).
#[derive(Debug, Clone, Copy)]
pub struct Precision {
    pub threshold: f64,
}

impl Default for Precision {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl Metric for Precision {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        assert_eq!(predictions.len(), targets.len());
        let (y_pred, y_true) = threshold_to_labels(predictions, targets, self.threshold);
        let (tp, pred_pos, _) = positive_counts(&y_pred, &y_true);
        tp / (pred_pos + EPSILON)
    }

    fn name(&self) -> &'static str {
        "precision"
    }
}

/// TP / (TP + FN).
#[derive(Debug, Clone, Copy)]
pub struct Recall {
    pub threshold: f64,
}

impl Default for Recall {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl Metric for Recall {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        assert_eq!(predictions.len(), targets.len());
        let (y_pred, y_true) = threshold_to_labels(predictions, targets, self.threshold);
        let (tp, _, actual_pos) = positive_counts(&y_pred, &y_true);
        tp / (actual_pos + EPSILON)
    }

    fn name(&self) -> &'static str {
        "recall"
    }
}

/// Harmonic mean of precision and recall.
#[derive(Debug, Clone, Copy)]
pub struct F1Score {
    pub threshold: f64,
}

impl Default for F1Score {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl Metric for F1Score {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        assert_eq!(predictions.len(), targets.len());
        let (y_pred, y_true) = threshold_to_labels(predictions, targets, self.threshold);
        let (tp, pred_pos, actual_pos) = positive_counts(&y_pred, &y_true);
        let precision = tp / (pred_pos + EPSILON);
        let recall = tp / (actual_pos + EPSILON);
        2.0 * precision * recall / (precision + recall + EPSILON)
    }

    fn name(&self) -> &'static str {
        "f1"
    }
}

/// Mean squared error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mse;

impl Metric for Mse {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        assert_eq!(predictions.len(), targets.len());
        if predictions.is_empty() {
            return 0.0;
        }
        let sum: f64 = predictions
            .iter()
            .zip(targets)
            .map(|(&p, &t)| (p - t) * (p - t))
            .sum();
        sum / predictions.len() as f64
    }

    fn name(&self) -> &'static str {
        "mse"
    }

    fn higher_is_better(&self) -> bool {
        false
    }
}

/// Mean absolute error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mae;

impl Metric for Mae {
    fn compute(&self, predictions: &[f64], targets: &[f64]) -> f64 {
        assert_eq!(predictions.len(), targets.len());
        if predictions.is_empty() {
            return 0.0;
        }
        let sum: f64 = predictions
            .iter()
            .zip(targets)
            .map(|(&p, &t)| (p - t).abs())
            .sum();
        sum / predictions.len() as f64
    }

    fn name(&self) -> &'static str {
        "mae"
    }

    fn higher_is_better(&self) -> bool {
        false
    }
}
