// ============================================================
// Baseline — Multinomial Naive Bayes
// ============================================================
// Works on non-negative feature weights (counts or TF-IDF rows).
// Fitting stores, per class c and feature f:
//
//   log P(c)   = ln(n_c / n)
//   log P(f|c) = ln((w_cf + alpha) / (Σ_f w_cf + alpha · F))
//
// Prediction takes the argmax of the joint log likelihood;
// probabilities are normalized with log-sum-exp.
//
// Reference: Manning et al. (2008) Introduction to IR, §13.2

use anyhow::{bail, Result};
use ndarray::{Array1, Array2, Axis};

use crate::domain::tweet::Label;

#[derive(Debug, Clone)]
pub struct MultinomialNb {
    /// Additive (Laplace) smoothing
    alpha:            f64,
    classes:          Vec<Label>,
    class_log_prior:  Array1<f64>,
    feature_log_prob: Array2<f64>,
}

impl MultinomialNb {
    pub fn new() -> Self {
        Self {
            alpha:            1.0,
            classes:          Vec::new(),
            class_log_prior:  Array1::zeros(0),
            feature_log_prob: Array2::zeros((0, 0)),
        }
    }

    pub fn fit(&mut self, x: &Array2<f64>, y: &[Label]) -> Result<()> {
        if x.nrows() != y.len() {
            bail!("{} feature rows but {} labels", x.nrows(), y.len());
        }
        if y.is_empty() {
            bail!("cannot fit Naive Bayes on zero samples");
        }

        let mut classes = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        let n_features = x.ncols();
        let mut class_count = Array1::<f64>::zeros(classes.len());
        let mut feature_count = Array2::<f64>::zeros((classes.len(), n_features));

        for (row, label) in x.rows().into_iter().zip(y) {
            // classes is sorted and contains every label
            let c = classes.binary_search(label).unwrap_or_default();
            class_count[c] += 1.0;
            let mut counts = feature_count.row_mut(c);
            counts += &row;
        }

        let smoothed = feature_count + self.alpha;
        let log_totals = smoothed
            .sum_axis(Axis(1))
            .mapv(f64::ln)
            .insert_axis(Axis(1));

        self.feature_log_prob = smoothed.mapv(f64::ln) - &log_totals;
        self.class_log_prior = class_count.mapv(|c| (c / y.len() as f64).ln());
        self.classes = classes;

        tracing::debug!(
            "Naive Bayes fit: {} classes, {} features",
            self.classes.len(),
            n_features
        );
        Ok(())
    }

    /// Unnormalized log P(c) + Σ x_f log P(f|c), shape [n, classes]
    fn joint_log_likelihood(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if self.classes.is_empty() {
            bail!("Naive Bayes used before fit()");
        }
        if x.ncols() != self.feature_log_prob.ncols() {
            bail!(
                "expected {} features, got {}",
                self.feature_log_prob.ncols(),
                x.ncols()
            );
        }
        Ok(x.dot(&self.feature_log_prob.t()) + &self.class_log_prior)
    }

    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<Label>> {
        let jll = self.joint_log_likelihood(x)?;
        Ok(jll
            .rows()
            .into_iter()
            .map(|row| {
                let best = row
                    .iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |acc, (i, &v)| if v > acc.1 { (i, v) } else { acc })
                    .0;
                self.classes[best]
            })
            .collect())
    }

    /// Class probabilities, columns ordered as `classes()`
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let mut jll = self.joint_log_likelihood(x)?;
        for mut row in jll.rows_mut() {
            let max = row.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
            let log_sum = max + row.mapv(|v| (v - max).exp()).sum().ln();
            row.mapv_inplace(|v| (v - log_sum).exp());
        }
        Ok(jll)
    }

    pub fn classes(&self) -> &[Label] {
        &self.classes
    }
}

impl Default for MultinomialNb {
    fn default() -> Self {
        Self::new()
    }
}
