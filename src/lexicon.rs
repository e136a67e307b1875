//! Read-only lexicon store.
//!
//! JSON shape:
//! {
//!   "languages": { "en": { "good": 3, "bad": -3 } },
//!   "negations": { "en": { "not": true } },
//!   "emoji":     { "😀": 2 },
//!   "emoticons": { ":)": 2, "xD": 3 }
//! }
//!
//! Every section is optional. Lookups return `Option` so that a stored `0`
//! stays distinguishable from a miss. Emoticon keys are lowercased on load;
//! the matcher ignores case and looks glyphs up in lowercase.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

static BUNDLED: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    let raw = include_str!("../data/lexicon.json");
    Arc::new(Lexicon::from_json_str(raw).expect("valid bundled lexicon"))
});

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    languages: HashMap<String, HashMap<String, i32>>,
    #[serde(default)]
    negations: HashMap<String, HashMap<String, bool>>,
    #[serde(default)]
    emoji: HashMap<String, i32>,
    #[serde(default)]
    emoticons: HashMap<String, i32>,
}

impl Lexicon {
    /// Process-wide default lexicon, parsed once from the embedded asset.
    pub fn bundled() -> Arc<Lexicon> {
        Arc::clone(&BUNDLED)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let mut lexicon: Lexicon = serde_json::from_str(raw).context("parsing lexicon json")?;
        lexicon.emoticons = lexicon
            .emoticons
            .into_iter()
            .map(|(glyph, score)| (glyph.to_lowercase(), score))
            .collect();
        Ok(lexicon)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon from {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("loading lexicon {}", path.display()))
    }

    /// Word score in `language`; `None` for an unknown language or word.
    pub fn lookup_word(&self, language: &str, token: &str) -> Option<i32> {
        self.languages.get(language)?.get(token).copied()
    }

    /// Language-independent emoji score.
    pub fn lookup_emoji(&self, token: &str) -> Option<i32> {
        self.emoji.get(token).copied()
    }

    pub fn is_negation(&self, language: &str, token: &str) -> bool {
        self.negations
            .get(language)
            .and_then(|table| table.get(token))
            .copied()
            .unwrap_or(false)
    }

    /// Score of a case-folded emoticon glyph.
    pub fn lookup_emoticon(&self, glyph: &str) -> Option<i32> {
        self.emoticons.get(glyph).copied()
    }

    pub fn emoticons(&self) -> &HashMap<String, i32> {
        &self.emoticons
    }

    /// Language codes with a word table, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "languages": { "en": { "good": 3, "meh": 0 } },
        "negations": { "en": { "not": true, "maybe": false } },
        "emoji": { "🙂": 1 },
        "emoticons": { "xD": 3 }
    }"#;

    #[test]
    fn zero_is_a_hit_not_a_miss() {
        let lx = Lexicon::from_json_str(SAMPLE).unwrap();
        assert_eq!(lx.lookup_word("en", "good"), Some(3));
        assert_eq!(lx.lookup_word("en", "meh"), Some(0));
        assert_eq!(lx.lookup_word("en", "nope"), None);
    }

    #[test]
    fn unknown_language_misses() {
        let lx = Lexicon::from_json_str(SAMPLE).unwrap();
        assert_eq!(lx.lookup_word("xx", "good"), None);
        assert!(!lx.is_negation("xx", "not"));
    }

    #[test]
    fn negation_requires_true_flag() {
        let lx = Lexicon::from_json_str(SAMPLE).unwrap();
        assert!(lx.is_negation("en", "not"));
        assert!(!lx.is_negation("en", "maybe"));
        assert!(!lx.is_negation("en", "good"));
    }

    #[test]
    fn emoticon_keys_are_case_folded() {
        let lx = Lexicon::from_json_str(SAMPLE).unwrap();
        assert_eq!(lx.lookup_emoticon("xd"), Some(3));
        assert_eq!(lx.lookup_emoticon("xD"), None);
        assert_eq!(lx.lookup_emoji("🙂"), Some(1));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let lx = Lexicon::from_json_str("{}").unwrap();
        assert!(lx.languages().is_empty());
        assert_eq!(lx.lookup_emoji("🙂"), None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Lexicon::from_json_str("{ not json").is_err());
    }

    #[test]
    fn bundled_asset_parses() {
        let lx = Lexicon::bundled();
        assert_eq!(lx.lookup_word("en", "good"), Some(3));
        assert!(lx.is_negation("en", "not"));
        assert_eq!(lx.lookup_emoticon(":)"), Some(2));
        assert_eq!(lx.languages(), vec!["de", "en", "es", "fr"]);
    }
}
