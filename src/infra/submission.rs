// ============================================================
// Layer 6 — Kaggle Submission Writer
// ============================================================
// Writes predictions in the competition's sample_submission.csv
// layout:
//
//   id,target
//   0,1
//   2,0

use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;
use std::{fs::File, path::Path};

use crate::domain::tweet::Label;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubmissionRow {
    pub id:     u64,
    pub target: Label,
}

pub fn write_submission(path: impl AsRef<Path>, rows: &[SubmissionRow]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create submission file: {}", path.display()))?;

    let mut writer = Writer::from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} predictions to '{}'", rows.len(), path.display());
    Ok(())
}
