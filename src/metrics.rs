//! Model evaluation metrics.
//!
//! Accuracy plus a per-class precision/recall/F1 report over the held-out
//! test set. The report is for the operator's eyes only; nothing downstream
//! consumes it programmatically.

use std::fmt;

/// Precision/recall/F1 for one class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true samples of this class in the test set
    pub support: usize,
}

/// Evaluation summary over a test set
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub healthy: ClassMetrics,
    pub unhealthy: ClassMetrics,
    pub total: usize,
}

impl EvaluationReport {
    /// Compute metrics from true and predicted binary labels.
    pub fn compute(y_true: &[u8], y_pred: &[u8]) -> Self {
        assert_eq!(y_true.len(), y_pred.len(), "label length mismatch");

        let correct = y_true
            .iter()
            .zip(y_pred)
            .filter(|(t, p)| t == p)
            .count();
        let total = y_true.len();

        Self {
            accuracy: if total > 0 {
                correct as f64 / total as f64
            } else {
                0.0
            },
            healthy: class_metrics(y_true, y_pred, 0),
            unhealthy: class_metrics(y_true, y_pred, 1),
            total,
        }
    }
}

fn class_metrics(y_true: &[u8], y_pred: &[u8], class: u8) -> ClassMetrics {
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;
    let mut support = 0usize;

    for (&t, &p) in y_true.iter().zip(y_pred) {
        if t == class {
            support += 1;
            if p == class {
                tp += 1;
            } else {
                fn_ += 1;
            }
        } else if p == class {
            fp += 1;
        }
    }

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, tp + fn_);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ClassMetrics {
        precision,
        recall,
        f1,
        support,
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12}  {:>9}  {:>7}  {:>8}  {:>7}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (name, m) in [("Healthy", &self.healthy), ("Unhealthy", &self.unhealthy)] {
            writeln!(
                f,
                "{:>12}  {:>9.2}  {:>7.2}  {:>8.2}  {:>7}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12}  {:>9}  {:>7}  {:>8.3}  {:>7}",
            "accuracy", "", "", self.accuracy, self.total
        )
    }
}
