// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends one CSV row per training epoch next to the checkpoint.
//
// Metrics recorded per epoch:
//   - epoch:      the epoch number within this run (1, 2, 3, ...)
//   - total_loss: sum of the batch BCE losses (the number printed
//                 on the console)
//   - mean_loss:  total_loss / batches
//   - batches:    how many mini-batches the epoch had
//
// Output file: checkpoints/metrics.csv
//
//   epoch,total_loss,mean_loss,batches
//   1,2.771200,0.692800,4
//   2,2.650100,0.662525,4
//
// The file is appended to across runs, so resuming training from
// the same checkpoint extends the same log.

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch:      usize,
    pub total_loss: f64,
    pub mean_loss:  f64,
    pub batches:    usize,
}

impl EpochMetrics {
    pub fn new(epoch: usize, total_loss: f64, batches: usize) -> Self {
        let mean_loss = if batches > 0 { total_loss / batches as f64 } else { f64::NAN };
        Self { epoch, total_loss, mean_loss, batches }
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,total_loss,mean_loss,batches")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{:.6},{:.6},{}",
            m.epoch,
            m.total_loss,
            m.mean_loss,
            m.batches,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: total_loss={:.4}, mean_loss={:.4}",
            m.epoch,
            m.total_loss,
            m.mean_loss,
        );

        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
