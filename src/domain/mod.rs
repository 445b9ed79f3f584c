// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that define what the
// system talks about: question pairs, the errors a run can
// end with, and the seams other layers plug into.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §9 (Errors), §10 (Traits)

// One labelled row of the input file
pub mod question_pair;

// Typed failure taxonomy for the pipeline
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
