// ============================================================
// Layer 3 — QuestionPair Domain Type
// ============================================================
// One row of the training file: two questions and a ground-truth
// flag saying whether they ask the same thing.
//
// Example:
//   question1:    "How do I learn Rust?"
//   question2:    "What is the best way to learn Rust?"
//   is_duplicate: 1
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// A labelled pair of questions.
///
/// Field names match the CSV header so `csv` + `serde` can map
/// columns by name; any other columns in the file are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPair {
    /// First question text. An empty cell is an empty question; it is
    /// never replaced by a placeholder word such as "nan".
    pub question1: String,

    /// Second question text
    pub question2: String,

    /// Ground truth: 1 = duplicate, 0 = different questions.
    /// Read as a float so both "1" and "1.0" are accepted; any other
    /// value is rejected by the loader.
    pub is_duplicate: f32,
}

impl QuestionPair {
    #[cfg(test)]
    pub fn new(
        question1:    impl Into<String>,
        question2:    impl Into<String>,
        is_duplicate: bool,
    ) -> Self {
        Self {
            question1:    question1.into(),
            question2:    question2.into(),
            is_duplicate: if is_duplicate { 1.0 } else { 0.0 },
        }
    }

    /// Label as the float target used by the loss.
    /// `CsvPairLoader` only lets 0.0 and 1.0 through.
    pub fn label(&self) -> f32 {
        self.is_duplicate
    }
}
