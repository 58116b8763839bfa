// ============================================================
// Baseline — TF-IDF → Naive Bayes Pipeline
// ============================================================
// Chains the two baseline stages behind TextClassifier so the
// exercise can fit, predict and score it on raw sentences.

use anyhow::Result;

use crate::classic::{naive_bayes::MultinomialNb, tfidf::TfidfVectorizer};
use crate::domain::traits::TextClassifier;
use crate::domain::tweet::Label;

#[derive(Debug, Clone)]
pub struct BaselinePipeline {
    tfidf: TfidfVectorizer,
    clf:   MultinomialNb,
}

impl BaselinePipeline {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tfidf: TfidfVectorizer::new()?,
            clf:   MultinomialNb::new(),
        })
    }

    /// Probability of label 1 for each sentence
    pub fn predict_proba(&self, sentences: &[String]) -> Result<Vec<f64>> {
        let x     = self.tfidf.transform(sentences)?;
        let proba = self.clf.predict_proba(&x)?;
        Ok(match self.clf.classes().iter().position(|&c| c == 1) {
            Some(col) => proba.column(col).to_vec(),
            None      => vec![0.0; sentences.len()],
        })
    }

    /// Number of TF-IDF terms learned by fit()
    pub fn vocabulary_size(&self) -> usize {
        self.tfidf.terms().len()
    }
}

impl TextClassifier for BaselinePipeline {
    fn fit(&mut self, sentences: &[String], labels: &[Label]) -> Result<()> {
        let x = self.tfidf.fit_transform(sentences)?;
        self.clf.fit(&x, labels)
    }

    fn predict(&self, sentences: &[String]) -> Result<Vec<Label>> {
        let x = self.tfidf.transform(sentences)?;
        self.clf.predict(&x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn fitted() -> BaselinePipeline {
        let mut pipeline = BaselinePipeline::new().unwrap();
        pipeline
            .fit(
                &owned(&[
                    "forest fire near the town",
                    "earthquake shakes the city",
                    "flood warning issued after storm",
                    "what a lovely sunny day",
                    "loving this new song",
                    "great game last night",
                ]),
                &[1, 1, 1, 0, 0, 0],
            )
            .unwrap();
        pipeline
    }

    #[test]
    fn test_separates_obvious_tweets() {
        let pipeline = fitted();
        let preds = pipeline
            .predict(&owned(&["huge forest fire", "sunny day with a great song"]))
            .unwrap();
        assert_eq!(preds, vec![1, 0]);
    }

    #[test]
    fn test_score_on_training_data() {
        let pipeline = fitted();
        let score = pipeline
            .score(&owned(&["earthquake shakes the city", "loving this new song"]), &[1, 0])
            .unwrap();
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_follow_predictions() {
        let pipeline = fitted();
        let proba = pipeline.predict_proba(&owned(&["flood storm", "lovely song"])).unwrap();
        assert!(proba[0] > 0.5);
        assert!(proba[1] < 0.5);
    }

    #[test]
    fn test_vocabulary_size_counts_fitted_terms() {
        // Single-letter "a" is below the two-character token minimum
        let pipeline = fitted();
        assert_eq!(pipeline.vocabulary_size(), 25);
    }

    #[test]
    fn test_score_rejects_misaligned_labels() {
        let pipeline = fitted();
        assert!(pipeline.score(&owned(&["fire"]), &[1, 0]).is_err());
    }
}
