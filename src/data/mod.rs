// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the CSV file on disk and the tensor
// batches the training loop consumes:
//
//   questions.csv
//       │
//       ▼
//   CsvPairLoader     → reads question1 / question2 / is_duplicate
//       │
//       ▼
//   tokenize          → lowercase \w+ word tokens
//       │
//       ▼
//   EmbeddingTable    → token → seeded pseudo-random vector
//       │
//       ▼
//   SentenceEncoder   → mean of token vectors per question
//       │
//       ▼
//   PairDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   PairBatcher       → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → shuffles per epoch, feeds the training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads labelled question pairs from CSV
pub mod loader;

/// Regex word tokenizer
pub mod tokenizer;

/// Deterministic hashed word vectors
pub mod embedding;

/// Averages word vectors into sentence vectors
pub mod encoder;

/// Implements Burn's Dataset trait for question pairs
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
