use burn::{
    nn::{
        loss::BinaryCrossEntropyLossConfig,
        Embedding, EmbeddingConfig, Initializer,
        Linear, LinearConfig,
    },
    prelude::*,
};

// #[derive(Config)] already provides Clone + Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct EmbeddingClassifierConfig {
    pub vocab_size: usize,
    #[config(default = 128)]
    pub embedding_dim: usize,
    /// Embedding init range: U(-embedding_init_range, embedding_init_range)
    #[config(default = 0.05)]
    pub embedding_init_range: f64,
}

impl EmbeddingClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> EmbeddingClassifier<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim)
            .with_initializer(Initializer::Uniform {
                min: -self.embedding_init_range,
                max: self.embedding_init_range,
            })
            .init(device);
        let output = LinearConfig::new(self.embedding_dim, 1).init(device);
        EmbeddingClassifier { embedding, output }
    }
}

/// token ids → embedding → mean over the sequence → one sigmoid unit
#[derive(Module, Debug)]
pub struct EmbeddingClassifier<B: Backend> {
    pub embedding: Embedding<B>,
    pub output:    Linear<B>,
}

impl<B: Backend> EmbeddingClassifier<B> {
    /// token_ids: [batch, seq_len] → logits: [batch]
    pub fn forward(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 1> {
        let [batch_size, _seq_len] = token_ids.dims();

        let embedded = self.embedding.forward(token_ids); // [batch, seq_len, dim]
        let [_, _, dim] = embedded.dims();

        // Global average pooling over the sequence axis
        let pooled = embedded.mean_dim(1).reshape([batch_size, dim]);

        self.output.forward(pooled).reshape([batch_size])
    }

    /// Sigmoid probabilities of label 1: [batch]
    pub fn predict_proba(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 1> {
        burn::tensor::activation::sigmoid(self.forward(token_ids))
    }

    /// Mean binary cross-entropy plus the logits it was computed from
    pub fn forward_loss(
        &self,
        token_ids: Tensor<B, 2, Int>,
        labels:    Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 1>) {
        let logits = self.forward(token_ids);
        let bce = BinaryCrossEntropyLossConfig::new()
            .with_logits(true)
            .init(&logits.device());
        let loss = bce.forward(logits.clone(), labels);
        (loss, logits)
    }
}

/// Number of predictions (p > 0.5) that match their labels
pub fn count_correct<B: Backend>(logits: Tensor<B, 1>, labels: Tensor<B, 1, Int>) -> usize {
    let correct: i64 = burn::tensor::activation::sigmoid(logits)
        .greater_elem(0.5)
        .int()
        .equal(labels)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    correct as usize
}
