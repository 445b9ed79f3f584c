// ============================================================
// Layer 2 — ScoreUseCase
// ============================================================
// Answers "are these two questions duplicates?" with the trained
// checkpoint:
//
//   Step 1: Load model config + weights  (Layer 6 - infra)
//   Step 2: Encode both questions        (Layer 4 - data)
//   Step 3: Run the twin network         (Layer 5 - ml)
//
// Word vectors are derived from a fixed hash, so a fresh encoder
// here produces exactly the vectors the model was trained on.

use anyhow::Result;
use burn::prelude::*;

use crate::data::encoder::SentenceEncoder;
use crate::domain::traits::DuplicateScorer;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::backend::DeviceKind;
use crate::ml::inferencer::Inferencer;

#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub checkpoint_dir: String,
    pub device:         DeviceKind,
}

pub struct ScoreUseCase<B: Backend> {
    encoder:    SentenceEncoder,
    inferencer: Inferencer<B>,
}

impl<B: Backend> ScoreUseCase<B> {
    pub fn new(config: &ScoreConfig, device: B::Device) -> Result<Self> {
        let ckpt_manager = CheckpointManager::new(&config.checkpoint_dir);
        let inferencer   = Inferencer::from_checkpoint(&ckpt_manager, device)?;
        let encoder      = SentenceEncoder::new(inferencer.input_dim());
        Ok(Self { encoder, inferencer })
    }
}

impl<B: Backend> DuplicateScorer for ScoreUseCase<B> {
    fn score(&mut self, question1: &str, question2: &str) -> Result<f32> {
        let q1 = self.encoder.encode(question1);
        let q2 = self.encoder.encode(question2);
        let p  = self.inferencer.predict(&q1, &q2)?;
        tracing::debug!("score({question1:?}, {question2:?}) = {p:.4}");
        Ok(p)
    }
}
