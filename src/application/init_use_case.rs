// ============================================================
// Layer 2 — InitUseCase
// ============================================================
// Writes the first checkpoint: freshly initialised weights for
// the default twin network plus its model_config.json.
//
// `train` only ever continues from saved weights, so this is
// the one place random initialisation happens. An existing
// checkpoint is left alone unless `force` is set.

use anyhow::Result;
use burn::prelude::*;
use std::path::PathBuf;

use crate::domain::error::PipelineError;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::backend::{CpuBackend, DeviceKind};
use crate::ml::model::TwinNetworkConfig;

#[derive(Debug, Clone)]
pub struct InitConfig {
    pub checkpoint_dir: String,
    /// Seed for the weight initialiser
    pub seed:           u64,
    /// Overwrite an existing checkpoint
    pub force:          bool,
}

pub struct InitUseCase {
    config: InitConfig,
}

impl InitUseCase {
    pub fn new(config: InitConfig) -> Self {
        Self { config }
    }

    /// Create the checkpoint and return the weights file path.
    pub fn execute(&self) -> Result<PathBuf> {
        let cfg          = &self.config;
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);

        if ckpt_manager.has_model() && !cfg.force {
            return Err(PipelineError::InvalidArgument(format!(
                "a checkpoint already exists at '{}' (use --force to replace it)",
                ckpt_manager.model_path().display()
            ))
            .into());
        }

        // Initialisation is backend independent once recorded,
        // so the CPU backend is always enough here.
        CpuBackend::seed(cfg.seed);
        let model_cfg = TwinNetworkConfig::new();
        let model     = model_cfg.init::<CpuBackend>(&DeviceKind::cpu_device());

        ckpt_manager.save_model_config(&model_cfg)?;
        ckpt_manager.save_model(&model)?;
        tracing::info!(
            "Initialised {} → {} → {} twin network (seed {})",
            model_cfg.input_dim, model_cfg.hidden_dim, model_cfg.embed_dim, cfg.seed
        );

        Ok(ckpt_manager.model_path())
    }
}
