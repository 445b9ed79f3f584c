// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case wires the data, ml and infra layers together for
// one command. No tensor math lives here.
//
//   train_use_case.rs — load pairs, encode, train, save
//   init_use_case.rs  — write the first checkpoint
//   score_use_case.rs — score one question pair
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// Checkpoint bootstrap
pub mod init_use_case;

// Single-pair inference
pub mod score_use_case;
