// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Loads the trained twin network on a plain (non-autodiff)
// backend and scores single question pairs.

use anyhow::Result;
use burn::prelude::*;

use crate::domain::error::PipelineError;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::TwinNetwork;

pub struct Inferencer<B: Backend> {
    model:     TwinNetwork<B>,
    input_dim: usize,
    device:    B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager, device: B::Device) -> Result<Self> {
        if !ckpt_manager.has_model() {
            return Err(PipelineError::MissingCheckpoint(ckpt_manager.model_path()).into());
        }
        let cfg   = ckpt_manager.load_model_config()?;
        let model = ckpt_manager.load_model(cfg.init::<B>(&device), &device)?;
        tracing::info!("Model loaded from checkpoint");
        Ok(Self { model, input_dim: cfg.input_dim, device })
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Duplicate probability for one pair of sentence vectors.
    pub fn predict(&self, q1: &[f32], q2: &[f32]) -> Result<f32> {
        for v in [q1, q2] {
            if v.len() != self.input_dim {
                return Err(PipelineError::ShapeMismatch {
                    what: "sentence vector", expected: self.input_dim, actual: v.len(),
                }.into());
            }
        }

        let x1 = Tensor::<B, 1>::from_floats(q1, &self.device).reshape([1, self.input_dim]);
        let x2 = Tensor::<B, 1>::from_floats(q2, &self.device).reshape([1, self.input_dim]);

        let p = self.model.forward(x1, x2).into_scalar().elem::<f32>();
        Ok(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{ndarray::NdArrayDevice, NdArray};

    use crate::ml::model::TwinNetworkConfig;

    type TestBackend = NdArray;

    fn saved_checkpoint(dir: &tempfile::TempDir) -> CheckpointManager {
        let ckpt = CheckpointManager::new(dir.path().to_string_lossy().into_owned());
        let cfg  = TwinNetworkConfig::new().with_input_dim(4);
        ckpt.save_model_config(&cfg).unwrap();
        ckpt.save_model(&cfg.init::<TestBackend>(&NdArrayDevice::Cpu)).unwrap();
        ckpt
    }

    #[test]
    fn test_predict_is_probability_and_symmetric() {
        let dir = tempfile::tempdir().unwrap();
        let inf = Inferencer::<TestBackend>::from_checkpoint(&saved_checkpoint(&dir), NdArrayDevice::Cpu)
            .unwrap();
        assert_eq!(inf.input_dim(), 4);

        let a = [0.5, -1.0, 2.0, 0.0];
        let b = [1.5, 0.25, -0.5, 3.0];
        let p = inf.predict(&a, &b).unwrap();
        assert!(p > 0.0 && p < 1.0);
        assert_eq!(p, inf.predict(&b, &a).unwrap());
    }

    #[test]
    fn test_wrong_width_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let inf = Inferencer::<TestBackend>::from_checkpoint(&saved_checkpoint(&dir), NdArrayDevice::Cpu)
            .unwrap();
        let err = inf.predict(&[1.0; 3], &[1.0; 4]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::ShapeMismatch { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn test_missing_weights() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().to_string_lossy().into_owned());
        let err  = Inferencer::<TestBackend>::from_checkpoint(&ckpt, NdArrayDevice::Cpu).err().unwrap();
        assert!(err.downcast_ref::<PipelineError>().unwrap().is_missing_checkpoint());
    }
}
