// ============================================================
// Layer 6 — Metrics
// ============================================================
// Evaluation and training-history bookkeeping:
//
//   calculate_results()  — accuracy, precision, recall, F1
//   ConfusionMatrix      — 2x2 counts for binary labels
//   EpochMetrics         — one row of training history
//   HistoryLogger        — writes that history to CSV
//
// Precision, recall and F1 are support-weighted averages over
// the classes present in y_true (scikit-learn's
// average="weighted"); accuracy is reported as a percentage.
//
// Example history CSV:
//   epoch,loss,accuracy,val_loss,val_accuracy
//   1,0.612300,0.684000,0.540100,0.752000
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt,
    fs::{self, File},
    io::Write,
    path::PathBuf,
};

use crate::domain::tweet::Label;

// ─── Classification Results ───────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResults {
    /// Percentage of exact matches, 0–100
    pub accuracy:  f64,
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
}

impl fmt::Display for ClassificationResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{'accuracy': {:.4}, 'precision': {:.4}, 'recall': {:.4}, 'f1': {:.4}}}",
            self.accuracy, self.precision, self.recall, self.f1
        )
    }
}

/// Compare ground truth with predictions.
pub fn calculate_results(y_true: &[Label], y_pred: &[Label]) -> Result<ClassificationResults> {
    if y_true.len() != y_pred.len() {
        bail!(
            "cannot compare {} true labels with {} predictions",
            y_true.len(),
            y_pred.len()
        );
    }
    if y_true.is_empty() {
        bail!("cannot compute metrics on an empty label set");
    }

    let total   = y_true.len() as f64;
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();

    let mut precision = 0.0;
    let mut recall    = 0.0;
    let mut f1        = 0.0;

    let classes: BTreeSet<Label> = y_true.iter().copied().collect();
    for class in classes {
        let tp = count_where(y_true, y_pred, |t, p| t == class && p == class);
        let fp = count_where(y_true, y_pred, |t, p| t != class && p == class);
        let fn_ = count_where(y_true, y_pred, |t, p| t == class && p != class);
        let support = (tp + fn_) as f64;

        // 0/0 scores as 0, as scikit-learn does with zero_division="warn"
        let p = ratio(tp, tp + fp);
        let r = ratio(tp, tp + fn_);
        let f = if p + r > 0.0 { 2.0 * p * r / (p + r) } else { 0.0 };

        precision += p * support;
        recall    += r * support;
        f1        += f * support;
    }

    Ok(ClassificationResults {
        accuracy:  correct as f64 / total * 100.0,
        precision: precision / total,
        recall:    recall / total,
        f1:        f1 / total,
    })
}

fn count_where(y_true: &[Label], y_pred: &[Label], pred: impl Fn(Label, Label) -> bool) -> usize {
    y_true.iter().zip(y_pred).filter(|&(&t, &p)| pred(t, p)).count()
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

// ─── Confusion Matrix ─────────────────────────────────────────────────────────
/// counts[true][pred] for labels 0 and 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn from_predictions(y_true: &[Label], y_pred: &[Label]) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            bail!(
                "cannot compare {} true labels with {} predictions",
                y_true.len(),
                y_pred.len()
            );
        }
        let mut counts = [[0usize; 2]; 2];
        for (&t, &p) in y_true.iter().zip(y_pred) {
            if t > 1 || p > 1 {
                bail!("confusion matrix expects binary labels, got ({t}, {p})");
            }
            counts[t as usize][p as usize] += 1;
        }
        Ok(Self { counts })
    }

    pub fn true_negatives(&self) -> usize  { self.counts[0][0] }
    pub fn false_positives(&self) -> usize { self.counts[0][1] }
    pub fn false_negatives(&self) -> usize { self.counts[1][0] }
    pub fn true_positives(&self) -> usize  { self.counts[1][1] }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "              pred 0   pred 1")?;
        writeln!(f, "  true 0   {:>8} {:>8}", self.counts[0][0], self.counts[0][1])?;
        write!(f,   "  true 1   {:>8} {:>8}", self.counts[1][0], self.counts[1][1])
    }
}

// ─── Training History ─────────────────────────────────────────────────────────
/// One epoch of training history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Starts at 1
    pub epoch: usize,

    /// Mean binary cross-entropy over the training batches
    pub loss: f64,

    /// Fraction of training tweets classified correctly, [0, 1]
    pub accuracy: f64,

    /// Present only when a validation set was supplied
    pub val_loss:     Option<f64>,
    pub val_accuracy: Option<f64>,
}

impl fmt::Display for EpochMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "loss: {:.4} - accuracy: {:.4}", self.loss, self.accuracy)?;
        if let (Some(vl), Some(va)) = (self.val_loss, self.val_accuracy) {
            write!(f, " - val_loss: {:.4} - val_accuracy: {:.4}", vl, va)?;
        }
        Ok(())
    }
}

/// Writes a training history to a CSV file.
pub struct HistoryLogger {
    csv_path: PathBuf,
}

impl HistoryLogger {
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self { csv_path: csv_path.into() }
    }

    /// Overwrite the CSV with one header row and one row per epoch
    pub fn write(&self, history: &[EpochMetrics]) -> Result<()> {
        if let Some(parent) = self.csv_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut f = File::create(&self.csv_path)?;
        writeln!(f, "epoch,loss,accuracy,val_loss,val_accuracy")?;

        for m in history {
            writeln!(
                f,
                "{},{:.6},{:.6},{},{}",
                m.epoch,
                m.loss,
                m.accuracy,
                m.val_loss.map(|v| format!("{v:.6}")).unwrap_or_default(),
                m.val_accuracy.map(|v| format!("{v:.6}")).unwrap_or_default(),
            )?;
        }

        tracing::debug!("Wrote {} epochs of history to '{}'", history.len(), self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_weighted_results() {
        // class 0: p=2/3 r=1 f=0.8   class 1: p=1 r=0.5 f=2/3
        let r = calculate_results(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap();
        assert!(close(r.accuracy, 75.0));
        assert!(close(r.precision, (2.0 / 3.0 + 1.0) / 2.0));
        assert!(close(r.recall, 0.75));
        assert!(close(r.f1, (0.8 + 2.0 / 3.0) / 2.0));
    }

    #[test]
    fn test_perfect_predictions() {
        let r = calculate_results(&[1, 0, 1], &[1, 0, 1]).unwrap();
        assert!(close(r.accuracy, 100.0));
        assert!(close(r.precision, 1.0));
        assert!(close(r.recall, 1.0));
        assert!(close(r.f1, 1.0));
    }

    #[test]
    fn test_class_never_predicted_scores_zero() {
        // Nothing predicted as 1: class 1 precision is 0/0 → 0
        let r = calculate_results(&[1, 1, 0, 0], &[0, 0, 0, 0]).unwrap();
        assert!(close(r.accuracy, 50.0));
        assert!(close(r.precision, 0.25));
        assert!(close(r.recall, 0.5));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        assert!(calculate_results(&[0, 1], &[0]).is_err());
        assert!(calculate_results(&[], &[]).is_err());
    }

    #[test]
    fn test_confusion_matrix_counts() {
        let cm = ConfusionMatrix::from_predictions(&[0, 0, 1, 1, 1], &[0, 1, 1, 0, 1]).unwrap();
        assert_eq!(cm.true_negatives(), 1);
        assert_eq!(cm.false_positives(), 1);
        assert_eq!(cm.false_negatives(), 1);
        assert_eq!(cm.true_positives(), 2);
    }

    #[test]
    fn test_confusion_matrix_rejects_non_binary() {
        assert!(ConfusionMatrix::from_predictions(&[2], &[0]).is_err());
    }

    #[test]
    fn test_history_csv() {
        let dir    = tempdir().unwrap();
        let logger = HistoryLogger::new(dir.path().join("runs/history.csv"));
        let history = vec![
            EpochMetrics { epoch: 1, loss: 0.6, accuracy: 0.7, val_loss: Some(0.5), val_accuracy: Some(0.75) },
            EpochMetrics { epoch: 2, loss: 0.4, accuracy: 0.8, val_loss: None, val_accuracy: None },
        ];
        logger.write(&history).unwrap();

        let text  = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "epoch,loss,accuracy,val_loss,val_accuracy");
        assert_eq!(lines[1], "1,0.600000,0.700000,0.500000,0.750000");
        assert_eq!(lines[2], "2,0.400000,0.800000,,");
    }
}
