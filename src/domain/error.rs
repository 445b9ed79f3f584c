// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// The failures a training run can end with. Everything that is
// not in this list (disk full, corrupt CSV, recorder failures)
// travels as a plain anyhow::Error with context attached.
//
// The CLI layer downcasts to MissingCheckpoint so that `train`
// can stop without an error status when there are no weights.
//
// Reference: Rust Book §9 (Error Handling), thiserror docs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The question file does not exist.
    #[error("Input file '{}' not found", .0.display())]
    MissingInputFile(PathBuf),

    /// No saved weights to start from.
    #[error("No saved model file found at '{}'", .0.display())]
    MissingCheckpoint(PathBuf),

    /// Aligned sequences disagree in length, or a vector has the
    /// wrong dimension.
    #[error("Shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what:     &'static str,
        expected: usize,
        actual:   usize,
    },

    /// A user-supplied value is out of range or unparsable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Training was requested on a file with no rows.
    #[error("Dataset is empty, nothing to train on")]
    EmptyDataset,
}

impl PipelineError {
    /// True when the run should end quietly instead of failing.
    pub fn is_missing_checkpoint(&self) -> bool {
        matches!(self, PipelineError::MissingCheckpoint(_))
    }
}
