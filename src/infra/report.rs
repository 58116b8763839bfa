// ============================================================
// Layer 6 — Run Report
// ============================================================
// Saves the outcome of one exercise run as pretty JSON: the
// configuration it ran with, the training history, and both
// models' validation results.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::application::exercise_use_case::ExerciseConfig;
use crate::infra::metrics::{ClassificationResults, ConfusionMatrix, EpochMetrics};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub config:              ExerciseConfig,
    pub history:             Vec<EpochMetrics>,
    pub embedding_results:   ClassificationResults,
    pub embedding_confusion: ConfusionMatrix,
    /// Mean accuracy of the baseline pipeline on the validation set, [0, 1]
    pub baseline_score:      f64,
    pub baseline_results:    ClassificationResults,
}

impl RunReport {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write report to '{}'", path.display()))?;

        tracing::info!("Saved run report to '{}'", path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read report from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_report_is_readable_json() {
        let results = ClassificationResults { accuracy: 78.5, precision: 0.79, recall: 0.785, f1: 0.78 };
        let report = RunReport {
            config:              ExerciseConfig::default(),
            history:             Vec::new(),
            embedding_results:   results,
            embedding_confusion: ConfusionMatrix { counts: [[400, 30], [120, 212]] },
            baseline_score:      0.7,
            baseline_results:    results,
        };

        let dir  = tempdir().unwrap();
        let path = dir.path().join("out/report.json");
        report.save(&path).unwrap();

        let loaded = RunReport::load(&path).unwrap();
        assert_eq!(loaded.embedding_results, results);
        assert_eq!(loaded.embedding_confusion.true_positives(), 212);
        assert_eq!(loaded.config.fit.epochs, 5);
    }
}
