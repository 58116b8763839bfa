// ============================================================
// Layer 5 — Predictor
// ============================================================
// Vectorizes raw sentences, runs the trained model batch by
// batch, and returns probabilities in input order.

use anyhow::Result;
use burn::prelude::*;

use crate::domain::tweet::Label;
use crate::infra::text_vectorizer::TextVectorizer;
use crate::ml::model::EmbeddingClassifier;

/// P(label = 1) for every sentence
pub fn predict_proba<B: Backend>(
    model:      &EmbeddingClassifier<B>,
    vectorizer: &TextVectorizer,
    sentences:  &[String],
    batch_size: usize,
    device:     &B::Device,
) -> Result<Vec<f32>> {
    let seq_len   = vectorizer.output_sequence_length();
    let mut probs = Vec::with_capacity(sentences.len());

    for chunk in sentences.chunks(batch_size.max(1)) {
        let ids: Vec<i32> = vectorizer
            .encode_batch(chunk)?
            .into_iter()
            .flatten()
            .map(|id| id as i32)
            .collect();

        let token_ids = Tensor::<B, 1, Int>::from_ints(ids.as_slice(), device)
            .reshape([chunk.len(), seq_len]);

        let batch_probs: Vec<f32> = model
            .predict_proba(token_ids)
            .into_data()
            .convert::<f32>()
            .to_vec()
            .map_err(|e| anyhow::anyhow!("Cannot read predictions: {e:?}"))?;
        probs.extend(batch_probs);
    }

    tracing::debug!("Predicted {} sentences", probs.len());
    Ok(probs)
}

/// Round probabilities to labels, half to even: 0.5 → 0
pub fn round_predictions(probs: &[f32]) -> Vec<Label> {
    probs.iter().map(|&p| Label::from(p > 0.5)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::EmbeddingClassifierConfig;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_round_predictions() {
        assert_eq!(round_predictions(&[0.1, 0.5, 0.51, 0.99, 0.0]), vec![0, 0, 1, 1, 0]);
    }

    #[test]
    fn test_one_probability_per_sentence() {
        let device = Default::default();
        let mut vectorizer = TextVectorizer::new(50, 6);
        vectorizer
            .adapt(&["forest fire near la ronge".to_string(), "happy day".to_string()])
            .unwrap();

        let model: EmbeddingClassifier<TestBackend> =
            EmbeddingClassifierConfig::new(vectorizer.vocab_size())
                .with_embedding_dim(8)
                .init(&device);

        let sentences: Vec<String> = (0..7).map(|i| format!("fire number {i}")).collect();
        let probs = predict_proba(&model, &vectorizer, &sentences, 3, &device).unwrap();

        assert_eq!(probs.len(), 7);
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
        // Same token ids after vectorization → same probability
        assert!((probs[0] - probs[6]).abs() < 1e-6);
    }
}
