// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes to the use cases:
//   1. `run`    — the full exercise on the validation split
//   2. `submit` — retrain on everything, predict test.csv
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, RunArgs, SubmitArgs};

#[derive(Parser, Debug)]
#[command(
    name = "disaster-tweets",
    version,
    about = "Embedding and TF-IDF/Naive Bayes classifiers for the disaster tweets dataset."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)    => run_exercise(args),
            Commands::Submit(args) => run_submit(args),
        }
    }
}

fn run_exercise(args: RunArgs) -> Result<()> {
    use crate::application::exercise_use_case::ExerciseUseCase;

    tracing::info!("Running exercise on '{}'", args.model.train_csv);
    ExerciseUseCase::new(args.into()).execute()?;
    Ok(())
}

fn run_submit(args: SubmitArgs) -> Result<()> {
    use crate::application::submit_use_case::SubmitUseCase;

    let output = args.output.clone();
    let rows   = SubmitUseCase::new(args.into()).execute()?;
    println!("Wrote {} predictions to {}", rows, output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::exercise_use_case::{ComputeDevice, ExerciseConfig};
    use crate::application::submit_use_case::SubmitConfig;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults() {
        let cli = Cli::parse_from(["disaster-tweets", "run"]);
        let Commands::Run(args) = cli.command else { panic!("expected run") };
        let cfg: ExerciseConfig = args.into();

        assert_eq!(cfg.data.max_vocab_length, 10_000);
        assert_eq!(cfg.data.max_output_sequence_length, 15);
        assert_eq!(cfg.embedding_dim, 128);
        assert_eq!(cfg.fit.epochs, 5);
        assert_eq!(cfg.seed, 17);
        assert_eq!(cfg.baseline_seed, 17);
        assert!((cfg.baseline_fraction - 0.1).abs() < 1e-12);
        assert_eq!(cfg.device, ComputeDevice::Cpu);
    }

    #[test]
    fn test_submit_flags() {
        let cli = Cli::parse_from([
            "disaster-tweets", "submit",
            "--test-csv", "kaggle/test.csv",
            "--epochs", "3",
            "--device", "gpu",
        ]);
        let Commands::Submit(args) = cli.command else { panic!("expected submit") };
        let cfg: SubmitConfig = args.into();

        assert_eq!(cfg.test_csv, "kaggle/test.csv");
        assert_eq!(cfg.fit.epochs, 3);
        assert_eq!(cfg.device, ComputeDevice::Gpu);
        assert_eq!(cfg.output, "submission.csv");
    }
}
