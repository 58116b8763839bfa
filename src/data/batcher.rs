// ============================================================
// Layer 4 — Tweet Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<TweetSample>
// into tensors for one forward pass.
//
//   Input:  N TweetSamples, each with S token ids
//   Output: TweetBatch { token_ids: [N, S], labels: [N] }
//
// Samples are already padded to the vectorizer's output length,
// so the flat Vec reshapes straight to [N, S].
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::TweetSample;

// ─── TweetBatch ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct TweetBatch<B: Backend> {
    /// Token ids — shape: [batch_size, seq_len]
    pub token_ids: Tensor<B, 2, Int>,

    /// Binary targets — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── TweetBatcher ─────────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct TweetBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TweetBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<TweetSample, TweetBatch<B>> for TweetBatcher<B> {
    fn batch(&self, items: Vec<TweetSample>) -> TweetBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map_or(0, |s| s.token_ids.len());

        // Burn Int tensors are built from i32
        let ids_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.token_ids.iter().map(|&x| x as i32))
            .collect();

        let labels: Vec<i32> = items.iter().map(|s| s.label as i32).collect();

        let token_ids = Tensor::<B, 1, Int>::from_ints(
            ids_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        TweetBatch { token_ids, labels }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_batch_shapes() {
        let device  = Default::default();
        let batcher = TweetBatcher::<TestBackend>::new(device);

        let items = vec![
            TweetSample { token_ids: vec![2, 3, 0, 0], label: 1 },
            TweetSample { token_ids: vec![4, 1, 5, 0], label: 0 },
            TweetSample { token_ids: vec![6, 0, 0, 0], label: 1 },
        ];
        let batch = batcher.batch(items);

        assert_eq!(batch.token_ids.dims(), [3, 4]);
        assert_eq!(batch.labels.dims(), [3]);
    }

    #[test]
    fn test_batch_preserves_row_order() {
        let batcher = TweetBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(vec![
            TweetSample { token_ids: vec![7, 8], label: 0 },
            TweetSample { token_ids: vec![9, 1], label: 1 },
        ]);

        let ids: Vec<i64> = batch
            .token_ids
            .into_data()
            .convert::<i64>()
            .to_vec()
            .unwrap();
        assert_eq!(ids, vec![7, 8, 9, 1]);

        let labels: Vec<i64> = batch.labels.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(labels, vec![0, 1]);
    }
}
