use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::tweet::Label;

/// One vectorized tweet: fixed-length token ids plus its label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetSample {
    pub token_ids: Vec<u32>,
    pub label:     Label,
}

pub struct TweetDataset {
    samples: Vec<TweetSample>,
}

impl TweetDataset {
    pub fn new(samples: Vec<TweetSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<TweetSample> for TweetDataset {
    fn get(&self, index: usize) -> Option<TweetSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
