// ============================================================
// Layer 3 — Core Traits
// ============================================================
// The seams between the application layer and its data and
// model implementations:
//   - TweetCsvLoader implements TweetSource
//   - BaselinePipeline implements TextClassifier
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::tweet::{Label, Tweet};

// ─── TweetSource ──────────────────────────────────────────────────────────────
/// Anything that can produce the raw tweet rows.
pub trait TweetSource {
    fn load_all(&self) -> Result<Vec<Tweet>>;
}

// ─── TextClassifier ───────────────────────────────────────────────────────────
/// A binary text classifier fit directly on raw sentences.
pub trait TextClassifier {
    /// Fit on aligned sentences and labels
    fn fit(&mut self, sentences: &[String], labels: &[Label]) -> Result<()>;

    /// Predict one label per sentence
    fn predict(&self, sentences: &[String]) -> Result<Vec<Label>>;

    /// Mean accuracy on the given data, in [0, 1]
    fn score(&self, sentences: &[String], labels: &[Label]) -> Result<f64> {
        if sentences.len() != labels.len() {
            anyhow::bail!(
                "cannot score {} sentences against {} labels",
                sentences.len(),
                labels.len()
            );
        }
        if labels.is_empty() {
            return Ok(0.0);
        }
        let preds   = self.predict(sentences)?;
        let correct = preds.iter().zip(labels).filter(|(p, y)| p == y).count();
        Ok(correct as f64 / labels.len() as f64)
    }
}
