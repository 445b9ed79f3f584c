// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores the twin network's weights with Burn's
// named MessagePack recorder (gzip, full precision).
//
// Directory layout:
//   checkpoints/
//     model.mpk.gz        ← all five layers' weights and biases
//     model_config.json   ← TwinNetworkConfig (layer widths)
//     train_config.json   ← settings of the last training run
//     metrics.csv         ← per-epoch losses (MetricsLogger)
//
// There is exactly one weights file. Training loads it, and
// overwrites it once all epochs are done.
//
// Loading when model.mpk.gz is absent yields
// PipelineError::MissingCheckpoint.
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkGzFileRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::domain::error::PipelineError;
use crate::ml::model::{TwinNetwork, TwinNetworkConfig};

/// Recorder used for every weights file
type CheckpointRecorder = NamedMpkGzFileRecorder<FullPrecisionSettings>;

/// File stem of the weights file; the recorder appends `.mpk.gz`
const MODEL_STEM: &str = "model";

/// Manages saving and loading of model checkpoints.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Full path of the weights file, extension included
    pub fn model_path(&self) -> PathBuf {
        self.dir.join(format!("{MODEL_STEM}.mpk.gz"))
    }

    /// True when there are weights to start from
    pub fn has_model(&self) -> bool {
        self.model_path().is_file()
    }

    /// Write the model weights, replacing any previous file.
    pub fn save_model<B: Backend>(&self, model: &TwinNetwork<B>) -> Result<()> {
        // The recorder adds the extension itself
        let stem = self.dir.join(MODEL_STEM);

        CheckpointRecorder::new()
            .record(model.clone().into_record(), stem)
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", self.model_path().display())
            })?;

        tracing::debug!("Saved checkpoint: '{}'", self.model_path().display());
        Ok(())
    }

    /// Load weights into `model`, which must have the same architecture.
    pub fn load_model<B: Backend>(
        &self,
        model:  TwinNetwork<B>,
        device: &B::Device,
    ) -> Result<TwinNetwork<B>> {
        if !self.has_model() {
            return Err(PipelineError::MissingCheckpoint(self.model_path()).into());
        }

        let record = CheckpointRecorder::new()
            .load(self.dir.join(MODEL_STEM), device)
            .with_context(|| {
                format!(
                    "Cannot load checkpoint '{}'. Does model_config.json match the weights?",
                    self.model_path().display()
                )
            })?;

        tracing::info!("Loaded checkpoint '{}'", self.model_path().display());
        Ok(model.load_record(record))
    }

    /// Save the architecture so the model can be rebuilt before loading.
    pub fn save_model_config(&self, cfg: &TwinNetworkConfig) -> Result<()> {
        let path = self.dir.join("model_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write model config to '{}'", path.display()))?;
        tracing::debug!("Saved model config to '{}'", path.display());
        Ok(())
    }

    /// Architecture of the stored weights.
    ///
    /// Weights placed here by hand without a config file are assumed
    /// to use the default 300 → 256 → 256 → 256 → 128 → 1 layout.
    pub fn load_model_config(&self) -> Result<TwinNetworkConfig> {
        let path = self.dir.join("model_config.json");
        if !path.exists() {
            tracing::warn!(
                "'{}' not found, assuming the default architecture",
                path.display()
            );
            return Ok(TwinNetworkConfig::new());
        }

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read model config from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid model config in '{}'", path.display()))
    }

    /// Record the settings of the latest training run.
    pub fn save_train_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{ndarray::NdArrayDevice, NdArray};

    type TestBackend = NdArray;

    fn manager(dir: &tempfile::TempDir) -> CheckpointManager {
        CheckpointManager::new(dir.path().to_string_lossy().into_owned())
    }

    #[test]
    fn test_load_without_weights_is_missing_checkpoint() {
        let dir   = tempfile::tempdir().unwrap();
        let ckpt  = manager(&dir);
        let model = TwinNetworkConfig::new().init::<TestBackend>(&NdArrayDevice::Cpu);

        assert!(!ckpt.has_model());
        let err = ckpt.load_model(model, &NdArrayDevice::Cpu).unwrap_err();
        assert!(err.downcast_ref::<PipelineError>().unwrap().is_missing_checkpoint());
    }

    #[test]
    fn test_weights_round_trip() {
        let dir    = tempfile::tempdir().unwrap();
        let ckpt   = manager(&dir);
        let device = NdArrayDevice::Cpu;
        let cfg    = TwinNetworkConfig::new().with_input_dim(4).with_hidden_dim(8).with_embed_dim(2);

        let saved = cfg.init::<TestBackend>(&device);
        ckpt.save_model(&saved).unwrap();
        assert!(ckpt.has_model());

        let fresh  = cfg.init::<TestBackend>(&device);
        let loaded = ckpt.load_model(fresh, &device).unwrap();

        let w = |m: &TwinNetwork<TestBackend>| {
            m.tower.hidden1.weight.val().into_data().to_vec::<f32>().unwrap()
        };
        assert_eq!(w(&saved), w(&loaded));
    }

    #[test]
    fn test_model_config_round_trip_and_default() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = manager(&dir);

        assert_eq!(ckpt.load_model_config().unwrap().input_dim, 300);

        ckpt.save_model_config(&TwinNetworkConfig::new().with_embed_dim(64)).unwrap();
        let cfg = ckpt.load_model_config().unwrap();
        assert_eq!(cfg.embed_dim, 64);
        assert_eq!(cfg.hidden_dim, 256);
    }
}
