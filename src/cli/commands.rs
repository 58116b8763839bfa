// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands, `run` and `submit`, and their flags.
// Defaults reproduce the exercise settings.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::exercise_use_case::{ComputeDevice, ExerciseConfig};
use crate::application::submit_use_case::SubmitConfig;
use crate::data::preprocessor::PreprocessConfig;
use crate::ml::trainer::FitConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the embedding model and the TF-IDF baseline, then compare them
    Run(RunArgs),

    /// Retrain on all labelled tweets and write a Kaggle submission
    Submit(SubmitArgs),
}

/// Burn backend for the embedding model
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DeviceArg {
    /// NdArray (CPU)
    Cpu,
    /// WGPU (GPU)
    Gpu,
}

impl From<DeviceArg> for ComputeDevice {
    fn from(d: DeviceArg) -> Self {
        match d {
            DeviceArg::Cpu => ComputeDevice::Cpu,
            DeviceArg::Gpu => ComputeDevice::Gpu,
        }
    }
}

/// Flags shared by both subcommands
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Kaggle train.csv (id,keyword,location,text,target)
    #[arg(long, default_value = "data/train.csv")]
    pub train_csv: String,

    /// Vocabulary cap, including padding and [UNK]
    #[arg(long, default_value_t = 10_000)]
    pub max_vocab_length: usize,

    /// Tokens kept per tweet after vectorization
    #[arg(long, default_value_t = 15)]
    pub max_output_length: usize,

    /// Embedding output dimensionality
    #[arg(long, default_value_t = 128)]
    pub embedding_dim: usize,

    /// Full passes over the training data
    #[arg(long, default_value_t = 5)]
    pub epochs: usize,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Seed for model initialisation and batch shuffling
    #[arg(long, default_value_t = 17)]
    pub seed: u64,

    #[arg(long, value_enum, default_value_t = DeviceArg::Cpu)]
    pub device: DeviceArg,
}

impl ModelArgs {
    fn fit_config(&self) -> FitConfig {
        FitConfig {
            epochs:        self.epochs,
            batch_size:    self.batch_size,
            learning_rate: self.lr,
            shuffle_seed:  self.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Fraction of tweets held out for validation
    #[arg(long, default_value_t = 0.1)]
    pub val_fraction: f64,

    /// Seed for the train/validation split
    #[arg(long, default_value_t = 42)]
    pub split_seed: u64,

    /// Fraction of the training split the baseline is fit on
    #[arg(long, default_value_t = 0.1)]
    pub baseline_fraction: f64,

    #[arg(long, default_value_t = 17)]
    pub baseline_seed: u64,

    /// Write the per-epoch training history to this CSV file
    #[arg(long)]
    pub history_csv: Option<String>,

    /// Write a JSON report of the run to this file
    #[arg(long)]
    pub report_json: Option<String>,
}

impl From<RunArgs> for ExerciseConfig {
    fn from(a: RunArgs) -> Self {
        ExerciseConfig {
            data: PreprocessConfig {
                train_csv:                  a.model.train_csv.clone(),
                val_fraction:               a.val_fraction,
                split_seed:                 a.split_seed,
                max_vocab_length:           a.model.max_vocab_length,
                max_output_sequence_length: a.model.max_output_length,
            },
            fit:               a.model.fit_config(),
            embedding_dim:     a.model.embedding_dim,
            seed:              a.model.seed,
            baseline_fraction: a.baseline_fraction,
            baseline_seed:     a.baseline_seed,
            device:            a.model.device.into(),
            history_csv:       a.history_csv,
            report_json:       a.report_json,
        }
    }
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Kaggle test.csv (id,keyword,location,text)
    #[arg(long, default_value = "data/test.csv")]
    pub test_csv: String,

    /// Where to write the id,target predictions
    #[arg(long, default_value = "submission.csv")]
    pub output: String,
}

impl From<SubmitArgs> for SubmitConfig {
    fn from(a: SubmitArgs) -> Self {
        SubmitConfig {
            data: PreprocessConfig {
                train_csv:                  a.model.train_csv.clone(),
                max_vocab_length:           a.model.max_vocab_length,
                max_output_sequence_length: a.model.max_output_length,
                ..PreprocessConfig::default()
            },
            fit:           a.model.fit_config(),
            embedding_dim: a.model.embedding_dim,
            seed:          a.model.seed,
            test_csv:      a.test_csv,
            output:        a.output,
            device:        a.model.device.into(),
        }
    }
}
