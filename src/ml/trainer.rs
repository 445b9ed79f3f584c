// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Runs `epochs` passes over the shuffled PairDataset:
//
//   for each batch:
//     loss  = BCE(twin_network(q1, q2), labels)
//     grads = loss.backward()
//     model = adam.step(lr, model, grads)
//     epoch_loss += loss
//
// and prints one line per epoch with the summed batch loss.
// There is no validation split and no early stopping; the loss
// is reported, never acted on.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use std::io::Write;

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::PairBatcher, dataset::PairDataset};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::TwinNetwork;

/// Final weights plus one metrics row per epoch.
pub struct TrainOutput<B: AutodiffBackend> {
    pub model:   TwinNetwork<B>,
    pub history: Vec<EpochMetrics>,
}

pub fn run_training<B: AutodiffBackend>(
    cfg:     &TrainConfig,
    epochs:  usize,
    model:   TwinNetwork<B>,
    dataset: PairDataset,
    device:  &B::Device,
    metrics: &MetricsLogger,
    out:     &mut dyn Write,
) -> Result<TrainOutput<B>> {
    let mut model = model;

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

    // ── Data loader: new permutation on every iter() ──────────────────────────
    let sample_count = dataset.sample_count();
    let loader = DataLoaderBuilder::new(PairBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .build(dataset);

    tracing::info!(
        "Training on {} pairs: epochs={}, batch_size={}, lr={}",
        sample_count, epochs, cfg.batch_size, cfg.lr
    );

    let mut history = Vec::with_capacity(epochs);

    for epoch in 1..=epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in loader.iter() {
            let loss = model.forward_loss(batch.q1, batch.q2, batch.labels);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            loss_sum += loss_val;
            batches  += 1;
            tracing::debug!("epoch {} batch {} loss={:.6}", epoch, batches, loss_val);

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        writeln!(out, "Epoch {}/{}, Loss: {:.4}", epoch, epochs, loss_sum)?;

        let row = EpochMetrics::new(epoch, loss_sum, batches);
        metrics.log(&row)?;
        history.push(row);
    }

    tracing::info!("Training complete!");
    Ok(TrainOutput { model, history })
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{ndarray::NdArrayDevice, Autodiff, NdArray};

    use crate::ml::model::TwinNetworkConfig;

    type TestBackend = Autodiff<NdArray>;

    /// Separable toy data: duplicates share their vector, non-duplicates don't
    fn toy_dataset(n: usize, dim: usize) -> PairDataset {
        let mut q1 = Vec::new();
        let mut q2 = Vec::new();
        let mut labels = Vec::new();
        for i in 0..n {
            let a: Vec<f32> = (0..dim).map(|j| ((i * 7 + j) % 5) as f32 - 2.0).collect();
            if i % 2 == 0 {
                q2.push(a.clone());
                labels.push(1.0);
            } else {
                q2.push(a.iter().map(|x| -x * 3.0).collect());
                labels.push(0.0);
            }
            q1.push(a);
        }
        PairDataset::new(q1, q2, labels).unwrap()
    }

    fn small_config(dir: &std::path::Path) -> TrainConfig {
        TrainConfig {
            checkpoint_dir: dir.to_string_lossy().into_owned(),
            batch_size: 8,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_one_line_and_one_metrics_row_per_epoch() {
        let dir     = tempfile::tempdir().unwrap();
        let cfg     = small_config(dir.path());
        let device  = NdArrayDevice::Cpu;
        let model   = TwinNetworkConfig::new().with_input_dim(6).init::<TestBackend>(&device);
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir).unwrap();
        let mut out = Vec::<u8>::new();

        let result = run_training(&cfg, 3, model, toy_dataset(20, 6), &device, &metrics, &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Epoch 1/3, Loss: "));
        assert!(lines[2].starts_with("Epoch 3/3, Loss: "));

        assert_eq!(result.history.len(), 3);
        // 20 samples, batch 8 → 3 batches per epoch
        assert!(result.history.iter().all(|m| m.batches == 3));
        assert!(result.history.iter().all(|m| m.total_loss.is_finite()));
    }

    #[test]
    fn test_loss_goes_down_on_separable_data() {
        let dir     = tempfile::tempdir().unwrap();
        let cfg     = small_config(dir.path());
        let device  = NdArrayDevice::Cpu;
        let model   = TwinNetworkConfig::new().with_input_dim(6).init::<TestBackend>(&device);
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir).unwrap();
        let mut out = Vec::<u8>::new();

        let result = run_training(&cfg, 30, model, toy_dataset(32, 6), &device, &metrics, &mut out)
            .unwrap();

        let first = result.history.first().unwrap().total_loss;
        let last  = result.history.last().unwrap().total_loss;
        assert!(last < first, "loss did not drop: {first} -> {last}");
    }
}
