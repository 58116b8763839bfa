// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Mini-batch Adam on binary cross-entropy, with an optional
// validation pass at the end of every epoch.
//
//   - Training runs on B (an AutodiffBackend)
//   - model.valid() gives the same weights on B::InnerBackend,
//     so validation batches are built for the inner backend
//   - Losses are averaged per sample, not per batch
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{bail, Result};
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::data::{
    batcher::{TweetBatch, TweetBatcher},
    dataset::TweetDataset,
};
use crate::infra::metrics::EpochMetrics;
use crate::ml::model::{count_correct, EmbeddingClassifier};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitConfig {
    pub epochs:        usize,
    pub batch_size:    usize,
    pub learning_rate: f64,
    /// Seed for the per-epoch batch shuffle
    pub shuffle_seed:  u64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            epochs:        5,
            batch_size:    32,
            learning_rate: 1e-3,
            shuffle_seed:  17,
        }
    }
}

/// Train `model` and return it with one EpochMetrics per epoch.
pub fn fit<B: AutodiffBackend>(
    mut model: EmbeddingClassifier<B>,
    cfg:       &FitConfig,
    train:     TweetDataset,
    val:       Option<TweetDataset>,
    device:    &B::Device,
) -> Result<(EmbeddingClassifier<B>, Vec<EpochMetrics>)> {
    if train.sample_count() == 0 {
        bail!("cannot fit on an empty training set");
    }
    if cfg.batch_size == 0 {
        bail!("batch size must be at least 1");
    }

    let n_train = train.sample_count();
    let n_val   = val.as_ref().map_or(0, TweetDataset::sample_count);
    tracing::info!("Training on {} samples, validating on {} samples", n_train, n_val);

    // Adam with the usual Keras defaults
    let optim_cfg = AdamConfig::new()
        .with_beta_1(0.9)
        .with_beta_2(0.999)
        .with_epsilon(1e-7);
    let mut optim = optim_cfg.init();

    let train_loader = DataLoaderBuilder::new(TweetBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.shuffle_seed)
        .num_workers(1)
        .build(train);

    let val_loader = val.filter(|v| v.sample_count() > 0).map(|v| {
        DataLoaderBuilder::new(TweetBatcher::<B::InnerBackend>::new(device.clone()))
            .batch_size(cfg.batch_size)
            .num_workers(1)
            .build(v)
    });

    let mut history = Vec::with_capacity(cfg.epochs);

    for epoch in 1..=cfg.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut loss_sum = 0.0f64;
        let mut correct  = 0usize;
        let mut seen     = 0usize;

        for batch in train_loader.iter() {
            let n = batch.labels.dims()[0];
            let (loss, logits) = model.forward_loss(batch.token_ids, batch.labels.clone());

            loss_sum += loss.clone().into_scalar().elem::<f64>() * n as f64;
            correct  += count_correct(logits.detach(), batch.labels);
            seen     += n;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.learning_rate, model, grads);
        }

        // ── Validation phase ──────────────────────────────────────────────────
        let (val_loss, val_accuracy) = match &val_loader {
            Some(loader) => {
                let (l, a) = evaluate(&model.valid(), loader);
                (Some(l), Some(a))
            }
            None => (None, None),
        };

        let metrics = EpochMetrics {
            epoch,
            loss:     loss_sum / seen.max(1) as f64,
            accuracy: correct as f64 / seen.max(1) as f64,
            val_loss,
            val_accuracy,
        };
        println!("Epoch {}/{} | {}", epoch, cfg.epochs, metrics);
        tracing::debug!(?metrics, "epoch finished");
        history.push(metrics);
    }

    tracing::info!("Training complete after {} epochs", cfg.epochs);
    Ok((model, history))
}

/// Mean loss and accuracy over every batch of `loader`
fn evaluate<B: Backend>(
    model:  &EmbeddingClassifier<B>,
    loader: &Arc<dyn DataLoader<TweetBatch<B>>>,
) -> (f64, f64) {
    let mut loss_sum = 0.0f64;
    let mut correct  = 0usize;
    let mut seen     = 0usize;

    for batch in loader.iter() {
        let n = batch.labels.dims()[0];
        let (loss, logits) = model.forward_loss(batch.token_ids, batch.labels.clone());

        loss_sum += loss.into_scalar().elem::<f64>() * n as f64;
        correct  += count_correct(logits, batch.labels);
        seen     += n;
    }

    let seen = seen.max(1) as f64;
    (loss_sum / seen, correct as f64 / seen)
}
