//! Language resolution for phrases scored without an explicit language code.
//!
//! The scorer only consumes the top-ranked guess, normalized with
//! [`normalize_code`]. [`WhatlangResolver`] wraps `whatlang`'s trigram
//! detector and reports ISO 639-1 codes; it can be narrowed to the languages
//! a lexicon actually covers, which keeps short phrases from drifting to
//! languages that would only miss every lookup.

use whatlang::{Detector, Lang};

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageGuess {
    pub code: String,
    pub confidence: f64,
}

/// Detection seam; implementations return candidates best first.
pub trait LanguageResolver: Send + Sync {
    /// `text` is the phrase's tokens joined by single spaces.
    fn detect(&self, text: &str) -> Vec<LanguageGuess>;
}

/// Never guesses; every phrase without a code stays unresolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl LanguageResolver for NoopResolver {
    fn detect(&self, _text: &str) -> Vec<LanguageGuess> {
        Vec::new()
    }
}

// whatlang speaks ISO 639-3; truncating those breaks codes like `spa`.
const ISO_639_1: &[(Lang, &str)] = &[
    (Lang::Eng, "en"),
    (Lang::Fra, "fr"),
    (Lang::Spa, "es"),
    (Lang::Deu, "de"),
    (Lang::Ita, "it"),
    (Lang::Por, "pt"),
    (Lang::Nld, "nl"),
    (Lang::Rus, "ru"),
    (Lang::Ukr, "uk"),
    (Lang::Pol, "pl"),
    (Lang::Ces, "cs"),
    (Lang::Slk, "sk"),
    (Lang::Slv, "sl"),
    (Lang::Hrv, "hr"),
    (Lang::Bul, "bg"),
    (Lang::Ron, "ro"),
    (Lang::Hun, "hu"),
    (Lang::Swe, "sv"),
    (Lang::Dan, "da"),
    (Lang::Nob, "nb"),
    (Lang::Fin, "fi"),
    (Lang::Est, "et"),
    (Lang::Lav, "lv"),
    (Lang::Lit, "lt"),
    (Lang::Ell, "el"),
    (Lang::Tur, "tr"),
    (Lang::Ara, "ar"),
    (Lang::Heb, "he"),
    (Lang::Hin, "hi"),
    (Lang::Jpn, "ja"),
    (Lang::Kor, "ko"),
    (Lang::Cmn, "zh"),
    (Lang::Vie, "vi"),
    (Lang::Ind, "id"),
];

/// ISO 639-1 code for a detected language, if it has one we know.
pub fn iso_639_1(lang: Lang) -> Option<&'static str> {
    ISO_639_1
        .iter()
        .find(|(l, _)| *l == lang)
        .map(|(_, code)| *code)
}

fn lang_for_code(code: &str) -> Option<Lang> {
    ISO_639_1
        .iter()
        .find(|(_, c)| c.eq_ignore_ascii_case(code))
        .map(|(l, _)| *l)
}

/// Trigram detection via `whatlang`.
pub struct WhatlangResolver {
    detector: Detector,
}

impl Default for WhatlangResolver {
    fn default() -> Self {
        Self {
            detector: Detector::new(),
        }
    }
}

impl WhatlangResolver {
    /// Restrict detection to the given ISO 639-1 codes. Unknown codes are
    /// skipped; if none are known the detector stays unrestricted.
    pub fn for_languages<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        let allowlist: Vec<Lang> = codes.into_iter().filter_map(lang_for_code).collect();
        if allowlist.is_empty() {
            return Self::default();
        }
        Self {
            detector: Detector::with_allowlist(allowlist),
        }
    }
}

impl LanguageResolver for WhatlangResolver {
    fn detect(&self, text: &str) -> Vec<LanguageGuess> {
        // whatlang reports a single best guess.
        self.detector
            .detect(text)
            .and_then(|info| {
                iso_639_1(info.lang()).map(|code| LanguageGuess {
                    code: code.to_string(),
                    confidence: info.confidence(),
                })
            })
            .into_iter()
            .collect()
    }
}

/// Two-letter, ASCII-lowercased form of a detector code (`"English"` -> `"en"`).
pub fn normalize_code(code: &str) -> String {
    code.chars().take(2).collect::<String>().to_ascii_lowercase()
}
