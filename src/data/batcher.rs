// ============================================================
// Layer 4 — Pair Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<PairSample>
// into tensors for one forward pass.
//
//   Input:  Vec of N PairSamples, each vector D wide
//   Output: PairBatch with q1, q2 of shape [N, D], labels [N]
//
// Each side is flattened row by row and reshaped:
//   [s1_0 .. s1_D, s2_0 .. s2_D, ..., sN_D] → [N, D]
//
// Shuffling and chunking into batches of `batch_size` are done
// by Burn's DataLoader, which draws a fresh permutation every
// time it is iterated (once per epoch).
//
// Reference: Burn Book §4 (Batcher, DataLoader)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::PairSample;

/// A batch of question pairs ready for the twin network.
#[derive(Debug, Clone)]
pub struct PairBatch<B: Backend> {
    /// First questions — shape: [batch_size, dim]
    pub q1: Tensor<B, 2>,

    /// Second questions — shape: [batch_size, dim]
    pub q2: Tensor<B, 2>,

    /// Ground truth 0/1 labels — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

/// Holds the target device so tensors land on the right CPU/GPU.
#[derive(Clone, Debug)]
pub struct PairBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> PairBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<PairSample, PairBatch<B>> for PairBatcher<B> {
    fn batch(&self, items: Vec<PairSample>) -> PairBatch<B> {
        let batch_size = items.len();
        let dim        = items[0].q1.len();

        let q1_flat: Vec<f32> = items.iter().flat_map(|s| s.q1.iter().copied()).collect();
        let q2_flat: Vec<f32> = items.iter().flat_map(|s| s.q2.iter().copied()).collect();

        // Labels are exactly 0.0 or 1.0; BCE takes integer targets
        let labels: Vec<i32> = items.iter().map(|s| s.label.round() as i32).collect();

        let q1 = Tensor::<B, 1>::from_floats(q1_flat.as_slice(), &self.device)
            .reshape([batch_size, dim]);
        let q2 = Tensor::<B, 1>::from_floats(q2_flat.as_slice(), &self.device)
            .reshape([batch_size, dim]);
        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        PairBatch { q1, q2, labels }
    }
}
