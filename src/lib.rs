// src/lib.rs
// Public library surface for the binary, integration tests and reuse.

pub mod api;
pub mod config;
pub mod emoticon;
pub mod language;
pub mod lexicon;
pub mod metrics;
pub mod sentiment;
pub mod telemetry;
pub mod tokenizer;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::emoticon::{EmoticonMatch, EmoticonMatcher};
pub use crate::language::{LanguageGuess, LanguageResolver, NoopResolver, WhatlangResolver};
pub use crate::lexicon::Lexicon;
pub use crate::sentiment::{coerce_phrase, ScoreResult, Scorer, Vote};
pub use crate::tokenizer::tokenize;

use once_cell::sync::Lazy;
use std::convert::Infallible;
use tokio::task::JoinHandle;

/// Bundled lexicon + whatlang detection, built on first use.
static DEFAULT_SCORER: Lazy<Scorer> = Lazy::new(Scorer::default);

/// Score `phrase` with the default scorer.
///
/// ```
/// let r = polyglot_sentiment::analyze("not good", Some("en"));
/// assert_eq!(r.score, -3);
/// assert!(r.negation);
/// ```
pub fn analyze(phrase: &str, language: Option<&str>) -> ScoreResult {
    DEFAULT_SCORER.score(phrase, language)
}

/// Deferred form of [`analyze`]: the callback always receives `Ok`, exactly
/// once. Inside a tokio runtime it runs on a later turn and the task handle is
/// returned; outside one it runs before this returns and `None` comes back.
pub fn analyze_deferred<F>(
    phrase: impl Into<String>,
    language: Option<String>,
    callback: F,
) -> Option<JoinHandle<()>>
where
    F: FnOnce(Result<ScoreResult, Infallible>) + Send + 'static,
{
    DEFAULT_SCORER.score_deferred(phrase, language, callback)
}
