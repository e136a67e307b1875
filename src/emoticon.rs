//! Textual emoticon detection over the raw (untokenized) phrase.
//!
//! The tokenizer strips the punctuation emoticons are made of, so they get a
//! separate regex pass. The pattern is an alternation of every table glyph
//! (longest first) followed by generic shapes:
//! - eyes, optional tear, optional nose, mouth run (`:-)`, `;p`, `8)`, `:'(`)
//! - the reversed orientation (`(:`, `)-:`)
//! - named forms (`xd`, `^^`, `^_^`, `<3`, `</3`)
//!
//! Matching is case-insensitive over the raw phrase; table lookups use the
//! lowercased glyph while results keep the glyph as written (`:D`, `XD`).
//!
//! A candidate must be followed by whitespace, `!`, `.`, `?` or end of text.
//! Candidates that start with a letter or digit must not follow one either, so
//! `boxd` or `2008)` do not produce emoticons. Recognized glyphs missing from
//! the table contribute nothing.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

use crate::lexicon::Lexicon;

const GENERIC_SHAPES: &str = concat!(
    r"xd+|\^_*\^|</?3+",
    r"|[:;=8x]'?[\-o^]?[)(\]\[dpo/\\|*3<>@]+",
    r"|[)(\]\[/\\|]+[\-o^]?'?[:;=]",
);

const TRAILING_BOUNDARY: &str = r"(?:\s|[!.?]|$)";

/// One scored emoticon, exactly as it appears in the raw phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmoticonMatch {
    pub glyph: String,
    pub score: i32,
}

#[derive(Debug, Clone)]
pub struct EmoticonMatcher {
    pattern: Regex,
    table: HashMap<String, i32>,
}

impl EmoticonMatcher {
    /// Build from a glyph table. Keys are expected lowercase. Fails when the
    /// combined pattern outgrows the regex size limit.
    pub fn new(table: HashMap<String, i32>) -> Result<Self> {
        Self::build(table, None)
    }

    pub fn from_lexicon(lexicon: &Lexicon) -> Result<Self> {
        Self::new(lexicon.emoticons().clone())
    }

    fn build(table: HashMap<String, i32>, size_limit: Option<usize>) -> Result<Self> {
        let mut glyphs: Vec<&str> = table.keys().map(String::as_str).collect();
        glyphs.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut alternatives: Vec<String> = glyphs.into_iter().map(regex::escape).collect();
        alternatives.push(GENERIC_SHAPES.to_string());

        let source = format!(
            "(?P<glyph>{}){}",
            alternatives.join("|"),
            TRAILING_BOUNDARY
        );
        let mut builder = RegexBuilder::new(&source);
        builder.case_insensitive(true);
        if let Some(limit) = size_limit {
            builder.size_limit(limit);
        }
        let pattern = builder
            .build()
            .with_context(|| format!("compiling emoticon pattern for {} glyphs", table.len()))?;

        Ok(Self { pattern, table })
    }

    /// Left-to-right, non-overlapping scan. Only table glyphs are returned.
    pub fn scan(&self, raw: &str) -> Vec<EmoticonMatch> {
        let mut found = Vec::new();
        let mut pos = 0;

        while pos < raw.len() {
            let Some(caps) = self.pattern.captures_at(raw, pos) else {
                break;
            };
            let (Some(whole), Some(glyph)) = (caps.get(0), caps.name("glyph")) else {
                break;
            };

            if embedded_in_word(raw, glyph.start(), glyph.as_str()) {
                // Retry one character further; the shorter tail may still match.
                let step = glyph.as_str().chars().next().map_or(1, char::len_utf8);
                pos = glyph.start() + step;
                continue;
            }

            if let Some(&score) = self.table.get(&glyph.as_str().to_lowercase()) {
                found.push(EmoticonMatch {
                    glyph: glyph.as_str().to_string(),
                    score,
                });
            }
            pos = whole.end();
        }

        found
    }
}

fn embedded_in_word(text: &str, start: usize, glyph: &str) -> bool {
    let starts_alnum = glyph.chars().next().is_some_and(char::is_alphanumeric);
    let after_alnum = text[..start]
        .chars()
        .next_back()
        .is_some_and(char::is_alphanumeric);
    starts_alnum && after_alnum
}
