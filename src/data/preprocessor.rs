// ============================================================
// Layer 4 — Data Preparation
// ============================================================
// Turns the raw Kaggle train.csv into the aligned sentence and
// label vectors the models train on, and carries the two
// vectorization limits every model in the exercise shares:
//
//   max_vocab_length            — vocabulary cap (incl. pad + OOV)
//   max_output_sequence_length  — tokens kept per tweet
//
// Steps for get_train_val_data():
//   1. Load every row through a TweetSource
//   2. Reject rows without a target
//   3. Shuffle + split (seeded) into train / validation
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::{loader::TweetCsvLoader, splitter::split_with_seed};
use crate::domain::traits::TweetSource;
use crate::domain::tweet::{Label, TrainValData, Tweet};

/// Settings for the data-preparation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    pub train_csv:                  String,
    pub val_fraction:               f64,
    pub split_seed:                 u64,
    pub max_vocab_length:           usize,
    pub max_output_sequence_length: usize,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            train_csv:                  "data/train.csv".to_string(),
            val_fraction:               0.1,
            split_seed:                 42,
            max_vocab_length:           10_000,
            max_output_sequence_length: 15,
        }
    }
}

pub struct PreprocessData {
    source:                         Box<dyn TweetSource>,
    val_fraction:                   f64,
    split_seed:                     u64,
    pub max_vocab_length:           usize,
    pub max_output_sequence_length: usize,
}

impl PreprocessData {
    /// Prepare data from the CSV file named in the config
    pub fn new(cfg: &PreprocessConfig) -> Self {
        Self::with_source(Box::new(TweetCsvLoader::new(&cfg.train_csv)), cfg)
    }

    pub fn with_source(source: Box<dyn TweetSource>, cfg: &PreprocessConfig) -> Self {
        Self {
            source,
            val_fraction:               cfg.val_fraction,
            split_seed:                 cfg.split_seed,
            max_vocab_length:           cfg.max_vocab_length,
            max_output_sequence_length: cfg.max_output_sequence_length,
        }
    }

    /// Load, shuffle and split the labelled tweets into train and validation
    pub fn get_train_val_data(&self) -> Result<TrainValData> {
        let labelled = self.labelled_pairs()?;
        let (train, val) = split_with_seed(labelled, self.val_fraction, self.split_seed);

        let (train_sentences, train_labels): (Vec<String>, Vec<Label>) = train.into_iter().unzip();
        let (val_sentences, val_labels): (Vec<String>, Vec<Label>)     = val.into_iter().unzip();

        tracing::info!(
            "Prepared {} training and {} validation tweets",
            train_sentences.len(),
            val_sentences.len()
        );

        TrainValData::new(train_sentences, train_labels, val_sentences, val_labels)
    }

    /// Every labelled tweet, in file order, with no validation split
    pub fn get_full_train_data(&self) -> Result<(Vec<String>, Vec<Label>)> {
        Ok(self.labelled_pairs()?.into_iter().unzip())
    }

    fn labelled_pairs(&self) -> Result<Vec<(String, Label)>> {
        let tweets = self.source.load_all()?;
        if tweets.is_empty() {
            bail!("training data contains no tweets");
        }

        tweets
            .into_iter()
            .map(|Tweet { id, text, target, .. }| match target {
                Some(label @ (0 | 1)) => Ok((text, label)),
                Some(other)           => bail!("tweet {id} has non-binary target {other}"),
                None                  => bail!("tweet {id} has no target"),
            })
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    struct InMemory(Vec<Tweet>);

    impl TweetSource for InMemory {
        fn load_all(&self) -> Result<Vec<Tweet>> {
            Ok(self.0.clone())
        }
    }

    fn corpus(n: usize) -> Vec<Tweet> {
        (0..n)
            .map(|i| Tweet::new(i as u64, format!("tweet number {i}"), Some((i % 2) as u8)))
            .collect()
    }

    #[test]
    fn test_split_sizes_and_alignment() {
        let prep = PreprocessData::with_source(
            Box::new(InMemory(corpus(20))),
            &PreprocessConfig::default(),
        );
        let data = prep.get_train_val_data().unwrap();

        assert_eq!(data.train_sentences.len(), 18);
        assert_eq!(data.val_sentences.len(), 2);

        // Labels must still belong to their own sentences after the shuffle
        for (s, y) in data.train_sentences.iter().zip(&data.train_labels) {
            let i: usize = s.rsplit(' ').next().unwrap().parse().unwrap();
            assert_eq!((i % 2) as u8, *y);
        }
    }

    #[test]
    fn test_exposes_vectorization_limits() {
        let prep = PreprocessData::with_source(
            Box::new(InMemory(corpus(4))),
            &PreprocessConfig::default(),
        );
        assert_eq!(prep.max_vocab_length, 10_000);
        assert_eq!(prep.max_output_sequence_length, 15);
    }

    #[test]
    fn test_missing_target_is_an_error() {
        let mut tweets = corpus(3);
        tweets[1].target = None;
        let prep = PreprocessData::with_source(
            Box::new(InMemory(tweets)),
            &PreprocessConfig::default(),
        );
        assert!(prep.get_train_val_data().is_err());
    }

    #[test]
    fn test_empty_source_is_an_error() {
        let prep = PreprocessData::with_source(
            Box::new(InMemory(Vec::new())),
            &PreprocessConfig::default(),
        );
        assert!(prep.get_full_train_data().is_err());
    }

    #[test]
    fn test_full_data_keeps_file_order() {
        let prep = PreprocessData::with_source(
            Box::new(InMemory(corpus(5))),
            &PreprocessConfig::default(),
        );
        let (sentences, labels) = prep.get_full_train_data().unwrap();
        assert_eq!(sentences[0], "tweet number 0");
        assert_eq!(labels, vec![0, 1, 0, 1, 0]);
    }
}
