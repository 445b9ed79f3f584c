// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one training run, in order:
//
//   Step 1: Load question pairs       (Layer 4 - data)
//   Step 2: Encode both questions     (Layer 4 - data)
//   Step 3: Pick the backend          (Layer 5 - ml)
//   Step 4: Load the checkpoint       (Layer 6 - infra)
//   Step 5: Resolve the epoch count   (flag or stdin prompt)
//   Step 6: Run the training loop     (Layer 5 - ml)
//   Step 7: Overwrite the checkpoint  (Layer 6 - infra)
//
// Training never starts from random weights: Step 4 fails with
// PipelineError::MissingCheckpoint when there is nothing to load
// (run `init` first).
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use burn::tensor::backend::AutodiffBackend;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::data::{
    dataset::PairDataset,
    encoder::default_encoder,
    loader::CsvPairLoader,
};
use crate::domain::error::PipelineError;
use crate::domain::traits::PairSource;
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EpochMetrics, MetricsLogger},
};
use crate::ml::backend::{CpuTrainBackend, DeviceKind, GpuTrainBackend};
use crate::ml::trainer::{run_training, TrainOutput};

// ─── Training Configuration ──────────────────────────────────────────────────
// Serialisable so each run's settings land next to the checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub input_path:     String,
    pub checkpoint_dir: String,
    /// None → ask on stdin once the checkpoint is loaded
    pub epochs:         Option<usize>,
    pub batch_size:     usize,
    pub lr:             f64,
    /// Seed of the per-epoch shuffle
    pub seed:           u64,
    pub device:         DeviceKind,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            input_path:     "questions.csv".to_string(),
            checkpoint_dir: "checkpoints".to_string(),
            epochs:         None,
            batch_size:     64,
            lr:             0.005,
            seed:           42,
            device:         DeviceKind::Gpu,
        }
    }
}

impl TrainConfig {
    /// Reject settings the training loop cannot run with.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.epochs == Some(0) {
            return Err(PipelineError::InvalidArgument(
                "epoch count must be a positive integer, got '0'".into(),
            ));
        }
        if self.batch_size == 0 {
            return Err(PipelineError::InvalidArgument("batch size must be at least 1".into()));
        }
        if !(self.lr.is_finite() && self.lr > 0.0) {
            return Err(PipelineError::InvalidArgument(format!(
                "learning rate must be a positive number, got {}",
                self.lr
            )));
        }
        Ok(())
    }
}

/// Parse a user-typed epoch count. Surrounding whitespace is ignored;
/// anything that is not a positive integer is InvalidArgument.
pub fn parse_epochs(raw: &str) -> Result<usize, PipelineError> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n as usize),
        _ => Err(PipelineError::InvalidArgument(format!(
            "epoch count must be a positive integer, got '{trimmed}'"
        ))),
    }
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub history:    Vec<EpochMetrics>,
    pub checkpoint: PathBuf,
}

impl TrainReport {
    pub fn final_loss(&self) -> Option<f64> {
        self.history.last().map(|m| m.total_loss)
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline; progress lines are written to `out`.
    pub fn execute(&self, out: &mut dyn Write) -> Result<TrainReport> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load question pairs ──────────────────────────────────────
        let pairs = CsvPairLoader::new(&cfg.input_path).load_all()?;
        if pairs.is_empty() {
            return Err(PipelineError::EmptyDataset.into());
        }

        // ── Step 2: Encode into sentence vectors ─────────────────────────────
        let mut encoder = default_encoder();
        let dataset     = PairDataset::from_pairs(&pairs, &mut encoder)?;
        tracing::info!(
            "Encoded {} pairs ({} distinct words, {:.1}% duplicates)",
            dataset.sample_count(),
            encoder.vocabulary_size(),
            dataset.positive_rate() * 100.0,
        );

        // ── Step 3: Backend dispatch ─────────────────────────────────────────
        match cfg.device {
            DeviceKind::Cpu => {
                self.train_on::<CpuTrainBackend>(DeviceKind::cpu_device(), dataset, out)
            }
            DeviceKind::Gpu => {
                self.train_on::<GpuTrainBackend>(DeviceKind::gpu_device(), dataset, out)
            }
        }
    }

    fn train_on<B: AutodiffBackend>(
        &self,
        device:  B::Device,
        dataset: PairDataset,
        out:     &mut dyn Write,
    ) -> Result<TrainReport> {
        let cfg = &self.config;
        writeln!(out, "Using device: {:?}", device)?;

        // ── Step 4: Load the checkpoint (mandatory) ──────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        if !ckpt_manager.has_model() {
            return Err(PipelineError::MissingCheckpoint(ckpt_manager.model_path()).into());
        }
        let model_cfg = ckpt_manager.load_model_config()?;
        if model_cfg.input_dim != dataset.dim() {
            return Err(PipelineError::ShapeMismatch {
                what:     "model input width",
                expected: model_cfg.input_dim,
                actual:   dataset.dim(),
            }
            .into());
        }
        let model = ckpt_manager.load_model(model_cfg.init::<B>(&device), &device)?;
        writeln!(out, "Loading saved model {}", ckpt_manager.model_path().display())?;

        // ── Step 5: Epoch count ──────────────────────────────────────────────
        let epochs = match cfg.epochs {
            Some(n) => n,
            None    => prompt_epochs(&mut std::io::stdin().lock(), out)?,
        };
        let run_cfg = TrainConfig { epochs: Some(epochs), ..cfg.clone() };
        ckpt_manager.save_train_config(&run_cfg)?;

        // ── Step 6: Training loop ────────────────────────────────────────────
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;
        let TrainOutput { model, history } =
            run_training(&run_cfg, epochs, model, dataset, &device, &metrics, out)?;
        tracing::info!("Epoch losses appended to '{}'", metrics.csv_path().display());

        // ── Step 7: Persist ──────────────────────────────────────────────────
        ckpt_manager.save_model(&model)?;
        writeln!(out, "Model saved to {}", ckpt_manager.model_path().display())?;

        Ok(TrainReport { history, checkpoint: ckpt_manager.model_path() })
    }
}

/// Ask for the epoch count on `input`, echoing the prompt to `out`.
fn prompt_epochs(input: &mut dyn BufRead, out: &mut dyn Write) -> Result<usize> {
    write!(out, "Epochs: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(parse_epochs(&line)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::application::init_use_case::{InitConfig, InitUseCase};

    const ROWS: &str = "question1,question2,is_duplicate\n\
                        what is ai,what is ai,1\n\
                        cats are great,dogs are bad,0\n\
                        how to code,how do I program,1\n\
                        why is sky blue,why sky blue,1\n";

    struct Fixture {
        _dir:   tempfile::TempDir,
        config: TrainConfig,
    }

    fn fixture(with_checkpoint: bool) -> Fixture {
        let dir  = tempfile::tempdir().unwrap();
        let csv  = dir.path().join("questions.csv");
        let ckpt = dir.path().join("checkpoints");
        fs::write(&csv, ROWS).unwrap();

        let checkpoint_dir = ckpt.to_string_lossy().into_owned();
        if with_checkpoint {
            InitUseCase::new(InitConfig {
                checkpoint_dir: checkpoint_dir.clone(),
                seed:           7,
                force:          false,
            })
            .execute()
            .unwrap();
        }

        let config = TrainConfig {
            input_path: csv.to_string_lossy().into_owned(),
            checkpoint_dir,
            epochs: Some(1),
            device: DeviceKind::Cpu,
            ..TrainConfig::default()
        };
        Fixture { _dir: dir, config }
    }

    #[test]
    fn test_parse_epochs() {
        assert_eq!(parse_epochs("5").unwrap(), 5);
        assert_eq!(parse_epochs(" 12 \n").unwrap(), 12);
        for bad in ["0", "-3", "abc", "", "2.5"] {
            assert!(
                matches!(parse_epochs(bad), Err(PipelineError::InvalidArgument(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_prompt_reads_one_line() {
        let mut input = std::io::Cursor::new("3\nignored\n");
        let mut out   = Vec::<u8>::new();
        assert_eq!(prompt_epochs(&mut input, &mut out).unwrap(), 3);
        assert_eq!(String::from_utf8(out).unwrap(), "Epochs: ");
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let bad = [
            TrainConfig { epochs: Some(0), ..TrainConfig::default() },
            TrainConfig { batch_size: 0, ..TrainConfig::default() },
            TrainConfig { lr: 0.0, ..TrainConfig::default() },
            TrainConfig { lr: f64::NAN, ..TrainConfig::default() },
        ];
        for cfg in bad {
            assert!(matches!(cfg.validate(), Err(PipelineError::InvalidArgument(_))));
        }
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_end_to_end_one_epoch() {
        let fx   = fixture(true);
        let ckpt = CheckpointManager::new(&fx.config.checkpoint_dir);
        let before = fs::read(ckpt.model_path()).unwrap();

        let mut out = Vec::<u8>::new();
        let report  = TrainUseCase::new(fx.config.clone()).execute(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let loss_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("Epoch ")).collect();
        assert_eq!(loss_lines.len(), 1, "{text}");
        assert!(loss_lines[0].starts_with("Epoch 1/1, Loss: "));
        assert!(text.lines().next().unwrap().starts_with("Using device: "));
        assert!(text.lines().last().unwrap().starts_with("Model saved to "));

        assert_eq!(report.history.len(), 1);
        assert_eq!(report.history[0].batches, 1);
        assert!(report.final_loss().unwrap().is_finite());

        let after = fs::read(&report.checkpoint).unwrap();
        assert_ne!(before, after, "weights were not updated");

        // The run's settings are recorded next to the weights
        let saved: TrainConfig = serde_json::from_str(
            &fs::read_to_string(
                std::path::Path::new(&fx.config.checkpoint_dir).join("train_config.json"),
            )
            .unwrap(),
        )
        .unwrap();
        assert_eq!(saved.epochs, Some(1));
    }

    #[test]
    fn test_training_resumes_from_saved_weights() {
        let fx = fixture(true);
        let mut out = Vec::<u8>::new();
        TrainUseCase::new(fx.config.clone()).execute(&mut out).unwrap();
        let second = TrainUseCase::new(fx.config.clone()).execute(&mut out).unwrap();
        assert_eq!(second.history.len(), 1);

        let metrics = fs::read_to_string(
            std::path::Path::new(&fx.config.checkpoint_dir).join("metrics.csv"),
        )
        .unwrap();
        // header + one row per run
        assert_eq!(metrics.lines().count(), 3);
    }

    #[test]
    fn test_missing_checkpoint_stops_before_training() {
        let fx = fixture(false);
        let mut out = Vec::<u8>::new();
        let err = TrainUseCase::new(fx.config.clone()).execute(&mut out).unwrap_err();

        assert!(err.downcast_ref::<PipelineError>().unwrap().is_missing_checkpoint());
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Loss:"));
        assert!(!CheckpointManager::new(&fx.config.checkpoint_dir).has_model());
    }

    #[test]
    fn test_missing_weights_win_over_unreadable_model_config() {
        let fx = fixture(false);
        fs::create_dir_all(&fx.config.checkpoint_dir).unwrap();
        fs::write(
            std::path::Path::new(&fx.config.checkpoint_dir).join("model_config.json"),
            "{ not json",
        )
        .unwrap();

        let err = TrainUseCase::new(fx.config.clone()).execute(&mut std::io::sink()).unwrap_err();
        assert!(err.downcast_ref::<PipelineError>().unwrap().is_missing_checkpoint(), "{err:#}");
    }

    #[test]
    fn test_missing_input_file() {
        let fx  = fixture(true);
        let cfg = TrainConfig { input_path: "/definitely/not/here.csv".into(), ..fx.config.clone() };
        let err = TrainUseCase::new(cfg).execute(&mut std::io::sink()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::MissingInputFile(_))
        ));
    }

    #[test]
    fn test_header_only_file_is_empty_dataset() {
        let fx = fixture(true);
        fs::write(&fx.config.input_path, "question1,question2,is_duplicate\n").unwrap();
        let err = TrainUseCase::new(fx.config.clone()).execute(&mut std::io::sink()).unwrap_err();
        assert!(matches!(err.downcast_ref::<PipelineError>(), Some(PipelineError::EmptyDataset)));
    }
}
