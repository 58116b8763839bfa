// ============================================================
// Layer 3 — Tweet Domain Types
// ============================================================
// A Tweet is one row of the Kaggle disaster tweets CSV.
// TrainValData is the aligned train/validation view of the
// labelled rows that every model in the exercise consumes.
//
// Reference: Rust Book §5 (Structs and Methods)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Binary label: 1 = the tweet is about a real disaster.
pub type Label = u8;

/// A single tweet as stored in `train.csv` / `test.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id:       u64,
    pub keyword:  Option<String>,
    pub location: Option<String>,
    pub text:     String,

    /// Absent in the Kaggle test file
    #[serde(default)]
    pub target:   Option<Label>,
}

impl Tweet {
    pub fn new(id: u64, text: impl Into<String>, target: Option<Label>) -> Self {
        Self {
            id,
            keyword:  None,
            location: None,
            text:     text.into(),
            target,
        }
    }
}

/// Train and validation sentences with their labels.
///
/// Each sentence vector is index-aligned with its label vector;
/// `new` refuses to build a value where that does not hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainValData {
    pub train_sentences: Vec<String>,
    pub train_labels:    Vec<Label>,
    pub val_sentences:   Vec<String>,
    pub val_labels:      Vec<Label>,
}

impl TrainValData {
    pub fn new(
        train_sentences: Vec<String>,
        train_labels:    Vec<Label>,
        val_sentences:   Vec<String>,
        val_labels:      Vec<Label>,
    ) -> Result<Self> {
        if train_sentences.len() != train_labels.len() {
            bail!(
                "train split is misaligned: {} sentences vs {} labels",
                train_sentences.len(),
                train_labels.len()
            );
        }
        if val_sentences.len() != val_labels.len() {
            bail!(
                "validation split is misaligned: {} sentences vs {} labels",
                val_sentences.len(),
                val_labels.len()
            );
        }
        Ok(Self { train_sentences, train_labels, val_sentences, val_labels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_misaligned_train_split() {
        let result = TrainValData::new(
            vec!["a".into(), "b".into()],
            vec![1],
            vec![],
            vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_misaligned_val_split() {
        let result = TrainValData::new(vec![], vec![], vec!["a".into()], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_accepts_aligned_splits() {
        let data = TrainValData::new(
            vec!["forest fire".into()],
            vec![1],
            vec!["nice day".into()],
            vec![0],
        )
        .unwrap();
        assert_eq!(data.train_labels, vec![1]);
        assert_eq!(data.val_sentences[0], "nice day");
    }
}
