// ============================================================
// Layer 2 — SubmitUseCase
// ============================================================
// Retrains the embedding model on every labelled tweet (no
// validation split), predicts the Kaggle test file and writes
// the predictions in submission format.
//
//   Step 1: Load all labelled tweets       (Layer 4 - data)
//   Step 2: Adapt the text vectorizer      (Layer 6 - infra)
//   Step 3: Fit the embedding model        (Layer 5 - ml)
//   Step 4: Predict test.csv               (Layer 5 - ml)
//   Step 5: Write id,target CSV            (Layer 6 - infra)

use anyhow::Result;
use burn::{
    backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, Autodiff, NdArray, Wgpu},
    module::AutodiffModule,
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};

use crate::application::exercise_use_case::{train_embedding_model, ComputeDevice};
use crate::data::{
    loader::TweetCsvLoader,
    preprocessor::{PreprocessConfig, PreprocessData},
};
use crate::domain::traits::TweetSource;
use crate::infra::{
    submission::{write_submission, SubmissionRow},
    text_vectorizer::TextVectorizer,
};
use crate::ml::{
    predictor::{predict_proba, round_predictions},
    trainer::FitConfig,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitConfig {
    pub data:          PreprocessConfig,
    pub fit:           FitConfig,
    pub embedding_dim: usize,
    pub seed:          u64,
    pub test_csv:      String,
    pub output:        String,
    pub device:        ComputeDevice,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            data:          PreprocessConfig::default(),
            fit:           FitConfig::default(),
            embedding_dim: 128,
            seed:          17,
            test_csv:      "data/test.csv".to_string(),
            output:        "submission.csv".to_string(),
            device:        ComputeDevice::Cpu,
        }
    }
}

pub struct SubmitUseCase {
    config: SubmitConfig,
}

impl SubmitUseCase {
    pub fn new(config: SubmitConfig) -> Self {
        Self { config }
    }

    /// Returns the number of predictions written
    pub fn execute(&self) -> Result<usize> {
        match self.config.device {
            ComputeDevice::Cpu => {
                self.execute_on::<Autodiff<NdArray>>(&NdArrayDevice::default())
            }
            ComputeDevice::Gpu => {
                self.execute_on::<Autodiff<Wgpu>>(&WgpuDevice::default())
            }
        }
    }

    pub fn execute_on<B: AutodiffBackend>(&self, device: &B::Device) -> Result<usize> {
        let cfg = &self.config;

        // ── Step 1: Every labelled tweet ──────────────────────────────────────
        let preprocess = PreprocessData::new(&cfg.data);
        let (sentences, labels) = preprocess.get_full_train_data()?;

        // ── Step 2: Vectorizer ────────────────────────────────────────────────
        let mut vectorizer = TextVectorizer::new(
            preprocess.max_vocab_length,
            preprocess.max_output_sequence_length,
        );
        vectorizer.adapt(&sentences)?;

        // ── Step 3: Fit without validation ────────────────────────────────────
        let (model, _history) = train_embedding_model::<B>(
            &vectorizer,
            &sentences,
            &labels,
            None,
            cfg.embedding_dim,
            cfg.seed,
            &cfg.fit,
            device,
        )?;
        let model = model.valid();

        // ── Step 4: Predict the test file ─────────────────────────────────────
        let test_tweets = TweetCsvLoader::new(&cfg.test_csv).load_all()?;
        let test_text: Vec<String> = test_tweets.iter().map(|t| t.text.clone()).collect();
        let probs = predict_proba(&model, &vectorizer, &test_text, cfg.fit.batch_size, device)?;
        let preds = round_predictions(&probs);

        // ── Step 5: Submission file ───────────────────────────────────────────
        let rows: Vec<SubmissionRow> = test_tweets
            .iter()
            .zip(preds)
            .map(|(t, target)| SubmissionRow { id: t.id, target })
            .collect();
        write_submission(&cfg.output, &rows)?;

        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_writes_one_row_per_test_tweet() {
        let dir = tempdir().unwrap();
        let train_csv = dir.path().join("train.csv");
        let test_csv  = dir.path().join("test.csv");
        let output    = dir.path().join("submission.csv");

        fs::write(
            &train_csv,
            "id,keyword,location,text,target\n\
             1,,,forest fire near the town,1\n\
             2,,,lovely sunny day,0\n\
             3,,,flood warning downtown,1\n\
             4,,,great song tonight,0\n",
        )
        .unwrap();
        fs::write(
            &test_csv,
            "id,keyword,location,text\n0,,,huge fire\n2,,,sunny song\n9,,,nothing here\n",
        )
        .unwrap();

        let mut config = SubmitConfig::default();
        config.data.train_csv = train_csv.to_string_lossy().into_owned();
        config.test_csv       = test_csv.to_string_lossy().into_owned();
        config.output         = output.to_string_lossy().into_owned();
        config.fit.epochs     = 1;
        config.embedding_dim  = 4;

        let written = SubmitUseCase::new(config)
            .execute_on::<Autodiff<NdArray>>(&NdArrayDevice::default())
            .unwrap();
        assert_eq!(written, 3);

        let text  = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,target");
        assert!(lines[1].starts_with("0,"));
        assert!(lines[3].starts_with("9,"));
    }
}
