// ============================================================
// Layer 2 — ExerciseUseCase
// ============================================================
// Runs the whole exercise top to bottom:
//
//   Step 1: Load train/validation tweets   (Layer 4 - data)
//   Step 2: Adapt the text vectorizer      (Layer 6 - infra)
//   Step 3: Seed, build and fit the
//           embedding model                (Layer 5 - ml)
//   Step 4: Predict + round to labels      (Layer 5 - ml)
//   Step 5: Score the embedding model      (Layer 6 - infra)
//   Step 6: Fit TF-IDF + Naive Bayes on a
//           10% subsample                  (classic)
//   Step 7: Score the baseline             (Layer 6 - infra)
//   Step 8: Confusion matrix of the best
//           model, optional CSV/JSON output
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use burn::{
    backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, Autodiff, NdArray, Wgpu},
    module::AutodiffModule,
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};

use crate::classic::pipeline::BaselinePipeline;
use crate::data::{
    dataset::{TweetDataset, TweetSample},
    preprocessor::{PreprocessConfig, PreprocessData},
    splitter::split_with_seed,
};
use crate::domain::{traits::TextClassifier, tweet::Label};
use crate::infra::{
    metrics::{calculate_results, ConfusionMatrix, EpochMetrics, HistoryLogger},
    report::RunReport,
    text_vectorizer::TextVectorizer,
};
use crate::ml::{
    model::{EmbeddingClassifier, EmbeddingClassifierConfig},
    predictor::{predict_proba, round_predictions},
    trainer::{fit, FitConfig},
};

/// Which burn backend the neural model runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComputeDevice {
    Cpu,
    Gpu,
}

// ─── Exercise Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseConfig {
    pub data:              PreprocessConfig,
    pub fit:               FitConfig,
    pub embedding_dim:     usize,
    /// Backend seed applied before the model is built
    pub seed:              u64,
    pub baseline_fraction: f64,
    pub baseline_seed:     u64,
    pub device:            ComputeDevice,
    pub history_csv:       Option<String>,
    pub report_json:       Option<String>,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            data:              PreprocessConfig::default(),
            fit:               FitConfig::default(),
            embedding_dim:     128,
            seed:              17,
            baseline_fraction: 0.1,
            baseline_seed:     17,
            device:            ComputeDevice::Cpu,
            history_csv:       None,
            report_json:       None,
        }
    }
}

// ─── ExerciseUseCase ─────────────────────────────────────────────────────────
pub struct ExerciseUseCase {
    config: ExerciseConfig,
}

impl ExerciseUseCase {
    pub fn new(config: ExerciseConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<RunReport> {
        match self.config.device {
            ComputeDevice::Cpu => {
                self.execute_on::<Autodiff<NdArray>>(&NdArrayDevice::default())
            }
            ComputeDevice::Gpu => {
                self.execute_on::<Autodiff<Wgpu>>(&WgpuDevice::default())
            }
        }
    }

    pub fn execute_on<B: AutodiffBackend>(&self, device: &B::Device) -> Result<RunReport> {
        let cfg = &self.config;

        // ── Step 1: Load preprocessed splits ──────────────────────────────────
        let preprocess = PreprocessData::new(&cfg.data);
        let data       = preprocess.get_train_val_data()?;

        let max_vocab_length  = preprocess.max_vocab_length;
        let max_output_length = preprocess.max_output_sequence_length;

        // ── Step 2: Text vectorization ────────────────────────────────────────
        let mut vectorizer = TextVectorizer::new(max_vocab_length, max_output_length);
        vectorizer.adapt(&data.train_sentences)?;

        // ── Step 3: Embedding model ───────────────────────────────────────────
        let (model, history) = train_embedding_model::<B>(
            &vectorizer,
            &data.train_sentences,
            &data.train_labels,
            Some((data.val_sentences.as_slice(), data.val_labels.as_slice())),
            cfg.embedding_dim,
            cfg.seed,
            &cfg.fit,
            device,
        )?;
        let model = model.valid();

        // ── Step 4: Probabilities → labels ────────────────────────────────────
        let probs = predict_proba(&model, &vectorizer, &data.val_sentences, cfg.fit.batch_size, device)?;
        println!("{:.4?}", head(&probs, 10));

        let preds = round_predictions(&probs);
        println!("{:?}", head(&preds, 20));

        // ── Step 5: Embedding model results ───────────────────────────────────
        let embedding_results = calculate_results(&data.val_labels, &preds)?;
        println!("{}", embedding_results);

        // ── Step 6: Baseline on 10% of the training data ──────────────────────
        let pairs: Vec<(String, Label)> = data
            .train_sentences
            .iter()
            .cloned()
            .zip(data.train_labels.iter().copied())
            .collect();
        let (_train_90, train_10) = split_with_seed(pairs, cfg.baseline_fraction, cfg.baseline_seed);
        let (train_10_sentences, train_10_labels): (Vec<String>, Vec<Label>) =
            train_10.into_iter().unzip();
        tracing::info!("Fitting baseline on {} tweets", train_10_sentences.len());

        let mut baseline = BaselinePipeline::new()?;
        baseline.fit(&train_10_sentences, &train_10_labels)?;
        tracing::info!("Baseline vocabulary: {} TF-IDF terms", baseline.vocabulary_size());

        // ── Step 7: Baseline results ──────────────────────────────────────────
        let baseline_score = baseline.score(&data.val_sentences, &data.val_labels)?;
        println!("Our baseline model achieves an accuracy of: {:.2}%", baseline_score * 100.0);

        let baseline_preds = baseline.predict(&data.val_sentences)?;
        println!("{:?}", head(&baseline_preds, 20));

        let baseline_results = calculate_results(&data.val_labels, &baseline_preds)?;
        println!("Baseline results:  {}", baseline_results);
        println!("Embedding results: {}", embedding_results);

        // ── Step 8: Confusion matrix + outputs ────────────────────────────────
        let (best_name, best_preds) = if embedding_results.f1 >= baseline_results.f1 {
            ("embedding model", &preds)
        } else {
            ("baseline", &baseline_preds)
        };
        let embedding_confusion = ConfusionMatrix::from_predictions(&data.val_labels, &preds)?;
        let best_confusion      = ConfusionMatrix::from_predictions(&data.val_labels, best_preds)?;
        println!("Confusion matrix ({best_name}, validation set):\n{best_confusion}");

        if let Some(path) = &cfg.history_csv {
            HistoryLogger::new(path).write(&history)?;
        }

        let report = RunReport {
            config: cfg.clone(),
            history,
            embedding_results,
            embedding_confusion,
            baseline_score,
            baseline_results,
        };
        if let Some(path) = &cfg.report_json {
            report.save(path)?;
        }

        Ok(report)
    }
}

/// Seed the backend, build the embedding model and fit it on `sentences`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn train_embedding_model<B: AutodiffBackend>(
    vectorizer:    &TextVectorizer,
    sentences:     &[String],
    labels:        &[Label],
    validation:    Option<(&[String], &[Label])>,
    embedding_dim: usize,
    seed:          u64,
    fit_cfg:       &FitConfig,
    device:        &B::Device,
) -> Result<(EmbeddingClassifier<B>, Vec<EpochMetrics>)> {
    B::seed(seed);

    let model: EmbeddingClassifier<B> = EmbeddingClassifierConfig::new(vectorizer.max_tokens())
        .with_embedding_dim(embedding_dim)
        .init(device);
    tracing::info!(
        "Embedding model ready: {} x {} table",
        vectorizer.max_tokens(),
        embedding_dim
    );

    let train = to_dataset(vectorizer, sentences, labels)?;
    let val = validation
        .map(|(s, l)| to_dataset(vectorizer, s, l))
        .transpose()?;

    fit(model, fit_cfg, train, val, device)
}

fn to_dataset(vectorizer: &TextVectorizer, sentences: &[String], labels: &[Label]) -> Result<TweetDataset> {
    if sentences.len() != labels.len() {
        anyhow::bail!("{} sentences but {} labels", sentences.len(), labels.len());
    }
    let samples = vectorizer
        .encode_batch(sentences)?
        .into_iter()
        .zip(labels)
        .map(|(token_ids, &label)| TweetSample { token_ids, label })
        .collect();
    Ok(TweetDataset::new(samples))
}

fn head<T>(items: &[T], n: usize) -> &[T] {
    &items[..n.min(items.len())]
}
