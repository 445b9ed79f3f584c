// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// What's in this layer:
//
//   model.rs      — The twin (Siamese) network
//                   • One shared 4-layer tower encoder
//                   • |e1 - e2| combiner
//                   • 128 → 1 similarity head + sigmoid
//
//   trainer.rs    — The training loop
//                   Forward pass, BCE loss, backward pass,
//                   Adam step, one loss line per epoch
//
//   inferencer.rs — Loads a checkpoint and scores one pair
//
//   backend.rs    — The CPU / GPU backends the binary ships with
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Twin network architecture
pub mod model;

/// Training loop
pub mod trainer;

/// Inference engine — loads checkpoint and scores pairs
pub mod inferencer;

/// Concrete backend choices
pub mod backend;
