//! Text normalization and word splitting.
//!
//! Every piece of text that reaches the matcher (user input and knowledge base
//! questions alike) goes through [`tokenize`], so both sides are compared in
//! the same lowercase `[a-z0-9]` alphabet.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything that is not a lowercase ASCII letter, a digit, or whitespace
    static ref RE_NON_WORD: Regex = Regex::new(r"[^a-z0-9\s]").unwrap();
}

/// Lowercase `text`, blank out punctuation and symbols, and split on whitespace.
///
/// Returns an empty vector when no alphanumeric characters remain.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    RE_NON_WORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}
