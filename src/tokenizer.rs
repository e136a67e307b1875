//! Phrase tokenizer.
//!
//! Pipeline (in this order): lowercase, line breaks to a space, strip a fixed
//! punctuation set, collapse whitespace runs, split on single spaces.
//!
//! Punctuation is removed without inserting a space, so `good.bad` becomes the
//! single token `goodbad`. Emoticons built from these characters never survive
//! tokenization; see [`crate::emoticon`] for the raw-text pass.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters removed outright before splitting.
pub const STRIPPED: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '_', '`', '"', '~',
    '(', ')',
];

static WHITESPACE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("whitespace run regex"));

/// Split a phrase into lowercase tokens. Order is preserved, duplicates kept.
///
/// Only a zero-length phrase yields no tokens. A leading or trailing space
/// leaves an empty token at that end (`" a"` -> `["", "a"]`); empty tokens
/// never hit the lexicon but still count as tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    let flattened = lowered.replace("\r\n", " ").replace(['\r', '\n'], " ");
    let stripped: String = flattened.chars().filter(|c| !STRIPPED.contains(c)).collect();
    let collapsed = WHITESPACE_RUNS.replace_all(&stripped, " ");

    collapsed.split(' ').map(str::to_owned).collect()
}
