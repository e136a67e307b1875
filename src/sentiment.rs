//! Phrase scoring: tokens -> language -> lexicon/emoji walk -> negation ->
//! emoticons -> aggregate.
//!
//! Policy notes:
//! - Tokens are walked in input order, so `words`, `positive` and `negative`
//!   list hits in the order they appear (emoticons last).
//! - A single negation word anywhere flips the sign of the whole word/emoji
//!   total. Emoticon scores are added afterwards and never flipped.
//! - A lexicon entry stored as `0` is a hit: it lands in `words` but in
//!   neither `positive` nor `negative`. The same holds for emoticons.
//! - `comparative` is `NaN` when there are no tokens (serialized as `null`).

use metrics::counter;
use serde::Serialize;
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::emoticon::EmoticonMatcher;
use crate::language::{normalize_code, LanguageResolver, WhatlangResolver};
use crate::lexicon::Lexicon;
use crate::telemetry::anon_hash;
use crate::tokenizer::tokenize;

/// Three-way classification from the sign of the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Positive,
    Negative,
    Neutral,
}

impl Vote {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s > 0 => Vote::Positive,
            s if s < 0 => Vote::Negative,
            _ => Vote::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Vote::Positive => "positive",
            Vote::Negative => "negative",
            Vote::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub score: i32,
    /// `score / tokens.len()`; `NaN` for an empty phrase.
    pub comparative: f64,
    pub vote: Vote,
    pub tokens: Vec<String>,
    pub words: Vec<String>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub negation: bool,
    pub language: Option<String>,
}

/// Running state of one token walk.
#[derive(Debug, Default)]
struct Tally {
    total: i32,
    negation: bool,
    words: Vec<String>,
    positive: Vec<String>,
    negative: Vec<String>,
}

impl Tally {
    fn note(&mut self, item: &str, score: i32) {
        self.words.push(item.to_string());
        if score > 0 {
            self.positive.push(item.to_string());
        } else if score < 0 {
            self.negative.push(item.to_string());
        }
    }
}

/// Cheap to clone; tables are shared and never mutated after construction.
#[derive(Clone)]
pub struct Scorer {
    lexicon: Arc<Lexicon>,
    emoticons: Arc<EmoticonMatcher>,
    resolver: Arc<dyn LanguageResolver>,
}

impl Default for Scorer {
    /// Bundled lexicon, with detection narrowed to the languages it covers.
    fn default() -> Self {
        let lexicon = Lexicon::bundled();
        let resolver = Arc::new(WhatlangResolver::for_languages(lexicon.languages()));
        Self::new(lexicon, resolver).expect("bundled emoticon table compiles")
    }
}

impl fmt::Debug for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scorer")
            .field("languages", &self.lexicon.languages())
            .finish_non_exhaustive()
    }
}

impl Scorer {
    /// Fails only if the lexicon's emoticon table cannot be compiled.
    pub fn new(
        lexicon: Arc<Lexicon>,
        resolver: Arc<dyn LanguageResolver>,
    ) -> anyhow::Result<Self> {
        let emoticons = Arc::new(EmoticonMatcher::from_lexicon(&lexicon)?);
        Ok(Self {
            lexicon,
            emoticons,
            resolver,
        })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score `phrase`. `language` is used verbatim when given; otherwise the
    /// resolver's top guess is used, and no guess leaves it unresolved.
    pub fn score(&self, phrase: &str, language: Option<&str>) -> ScoreResult {
        let tokens = tokenize(phrase);
        let language = self.resolve_language(&tokens, language);

        let mut tally = tokens.iter().fold(Tally::default(), |mut tally, token| {
            if let Some(lang) = language.as_deref() {
                if self.lexicon.is_negation(lang, token) {
                    tally.negation = true;
                }
            }
            let hit = language
                .as_deref()
                .and_then(|lang| self.lexicon.lookup_word(lang, token))
                .or_else(|| self.lexicon.lookup_emoji(token));
            if let Some(score) = hit {
                tally.total = tally.total.saturating_add(score);
                tally.note(token, score);
            }
            tally
        });

        let mut score = if tally.negation {
            tally.total.saturating_neg()
        } else {
            tally.total
        };

        for emoticon in self.emoticons.scan(phrase) {
            score = score.saturating_add(emoticon.score);
            tally.note(&emoticon.glyph, emoticon.score);
        }

        let comparative = if tokens.is_empty() {
            f64::NAN
        } else {
            f64::from(score) / tokens.len() as f64
        };
        let vote = Vote::from_score(score);

        counter!("sentiment_analyze_total", "vote" => vote.as_str()).increment(1);
        debug!(
            target: "sentiment",
            id = %anon_hash(phrase),
            tokens = tokens.len(),
            score,
            negation = tally.negation,
            language = ?language,
            "scored phrase"
        );

        ScoreResult {
            score,
            comparative,
            vote,
            tokens,
            words: tally.words,
            positive: tally.positive,
            negative: tally.negative,
            negation: tally.negation,
            language,
        }
    }

    /// Same as [`Scorer::score`], delivered after yielding to the runtime once.
    pub async fn score_later(&self, phrase: String, language: Option<String>) -> ScoreResult {
        tokio::task::yield_now().await;
        self.score(&phrase, language.as_deref())
    }

    /// Hand the result to `callback` exactly once; the error side is uninhabited.
    ///
    /// Inside a tokio runtime the scoring is spawned and runs on a later turn;
    /// the task handle is returned. Outside one there is nothing to defer to,
    /// so the callback runs before this returns and the result is `None`.
    pub fn score_deferred<F>(
        &self,
        phrase: impl Into<String>,
        language: Option<String>,
        callback: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce(Result<ScoreResult, Infallible>) + Send + 'static,
    {
        let phrase = phrase.into();
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            callback(Ok(self.score(&phrase, language.as_deref())));
            return None;
        };
        let scorer = self.clone();
        Some(runtime.spawn(async move {
            let result = scorer.score_later(phrase, language).await;
            callback(Ok(result));
        }))
    }

    fn resolve_language(&self, tokens: &[String], language: Option<&str>) -> Option<String> {
        if let Some(code) = language {
            return Some(code.to_string());
        }
        match self.resolver.detect(&tokens.join(" ")).into_iter().next() {
            Some(guess) => Some(normalize_code(&guess.code)),
            None => {
                counter!("sentiment_language_unresolved_total").increment(1);
                None
            }
        }
    }
}

/// Textual form of an arbitrary JSON phrase: strings as-is, `null` as empty,
/// everything else as its compact JSON rendering.
pub fn coerce_phrase(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
