// ============================================================
// Layer 4 — Word Tokenizer
// ============================================================
// Splits raw question text into lowercase word tokens.
//
// A token is any maximal run of Unicode word characters
// (letters, digits, underscore), so punctuation and
// whitespace act as separators:
//
//   "What's the capital of France?"
//     → ["what", "s", "the", "capital", "of", "france"]
//
// No stemming, no stop-word removal. Each distinct token gets
// its own pseudo-random vector in the EmbeddingTable.
//
// Reference: regex crate documentation (Unicode classes)

use regex::Regex;
use std::sync::LazyLock;

/// One or more word characters.
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word regex"));

/// Lowercase `text` and return every `\w+` run, in order.
/// Empty or whitespace-only input gives an empty Vec.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
