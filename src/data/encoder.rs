// ============================================================
// Layer 4 — Sentence Encoder
// ============================================================
// Turns one question into one fixed-size vector:
//
//   text ──tokenize──▶ [t1, t2, ..., tk]
//        ──lookup────▶ [e(t1), e(t2), ..., e(tk)]   (each dim-wide)
//        ──mean──────▶ sentence vector               (dim-wide)
//
// A text with no tokens at all encodes to the zero vector.
//
// The encoder owns its EmbeddingTable, so the cache lives
// exactly as long as the encoder that fills it.

use crate::data::embedding::{EmbeddingTable, EMBEDDING_DIM};
use crate::data::tokenizer::tokenize;

#[derive(Debug, Clone, Default)]
pub struct SentenceEncoder {
    table: EmbeddingTable,
}

impl SentenceEncoder {
    pub fn new(dim: usize) -> Self {
        Self { table: EmbeddingTable::new(dim) }
    }

    /// Distinct words seen by this encoder so far
    pub fn vocabulary_size(&self) -> usize {
        self.table.len()
    }

    /// Mean of the token embeddings of `text`.
    pub fn encode(&mut self, text: &str) -> Vec<f32> {
        let tokens = tokenize(text);
        let mut sum = vec![0.0f32; self.table.dim()];

        if tokens.is_empty() {
            return sum;
        }

        for tok in &tokens {
            let e = self.table.embedding_of(tok);
            for (acc, x) in sum.iter_mut().zip(e) {
                *acc += x;
            }
        }

        let n = tokens.len() as f32;
        sum.iter_mut().for_each(|x| *x /= n);
        sum
    }
}

/// Encoder with the standard 300-wide vectors.
pub fn default_encoder() -> SentenceEncoder {
    SentenceEncoder::new(EMBEDDING_DIM)
}
