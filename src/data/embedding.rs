// ============================================================
// Layer 4 — Hashed Word Embedding Table
// ============================================================
// Gives every token a fixed pseudo-random vector, standing in
// for a learned embedding model.
//
// How a vector is produced for an unseen token:
//   1. Hash the token's UTF-8 bytes with FNV-1a (64 bit)
//   2. Keep the low 32 bits as the seed
//   3. Seed a ChaCha8 generator with it
//   4. Draw `dim` samples from the standard normal N(0, 1)
//
// FNV-1a and ChaCha8 are both fixed algorithms, so the same
// token maps to the same vector in every run, on every machine.
// Vectors are cached after the first lookup; the cache only
// grows and is never evicted.
//
// Reference: Fowler–Noll–Vo hash (FNV-1a)
//            rand_chacha / rand_distr documentation

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use std::collections::HashMap;

/// Width of every word and sentence vector.
pub const EMBEDDING_DIM: usize = 300;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME:        u64 = 0x100000001b3;

/// Token → vector cache.
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    dim:     usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl EmbeddingTable {
    pub fn new(dim: usize) -> Self {
        Self { dim, vectors: HashMap::new() }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of distinct tokens seen so far.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Vector for `token`, generating and caching it on first use.
    pub fn embedding_of(&mut self, token: &str) -> &[f32] {
        if !self.vectors.contains_key(token) {
            let v = pseudo_random_vector(token_seed(token), self.dim);
            self.vectors.insert(token.to_string(), v);
        }
        &self.vectors[token]
    }
}

impl Default for EmbeddingTable {
    fn default() -> Self {
        Self::new(EMBEDDING_DIM)
    }
}

/// Seed for a token: FNV-1a of its bytes, reduced mod 2^32.
pub fn token_seed(token: &str) -> u64 {
    fnv1a64(token.as_bytes()) % (1u64 << 32)
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut h = FNV_OFFSET_BASIS;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

fn pseudo_random_vector(seed: u64, dim: usize) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..dim)
        .map(|_| -> f32 { StandardNormal.sample(&mut rng) })
        .collect()
}
