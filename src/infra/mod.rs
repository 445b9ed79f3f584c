// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting file concerns:
//
//   checkpoint.rs — Saving and loading model weights
//                   (Burn named MessagePack recorder) plus the
//                   model / training configs as JSON.
//
//   metrics.rs    — Training metrics logging
//                   Appends per-epoch losses to a CSV file.
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
