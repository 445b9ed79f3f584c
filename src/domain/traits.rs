// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits, so a
// different row source (a database, a JSONL file) or a different
// scorer can be dropped in without touching the use cases.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::question_pair::QuestionPair;

// ─── PairSource ───────────────────────────────────────────────────────────────
/// Anything that can produce the labelled question pairs to train on.
///
/// Implementations:
///   - CsvPairLoader → reads question1 / question2 / is_duplicate columns
pub trait PairSource {
    /// Load every row, in file order.
    fn load_all(&self) -> Result<Vec<QuestionPair>>;
}

// ─── DuplicateScorer ──────────────────────────────────────────────────────────
/// Anything that can say how likely two questions are duplicates.
///
/// Implementations:
///   - ScoreUseCase → runs the trained twin network
pub trait DuplicateScorer {
    /// Probability in (0, 1) that the two questions are duplicates.
    fn score(&mut self, question1: &str, question2: &str) -> Result<f32>;
}
