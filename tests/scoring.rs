// tests/scoring.rs
//
// Behavioural checks of the public scoring surface against the bundled lexicon.
// Randomized phrases use a seeded RNG so failures are reproducible.

use polyglot_sentiment::{analyze, analyze_deferred, tokenize, Vote};
use rand::{rngs::StdRng, Rng, SeedableRng};

const VOCAB: &[&str] = &[
    "good", "bad", "not", "love", "hate", "the", "movie", "was", "never", "awful", "great", ":)",
    ":(", "xD", "<3", "😀", "😡", "meh", "and", "wonderful", "!", "so", "?",
];

fn random_phrase(rng: &mut StdRng) -> String {
    let len = rng.random_range(0..12);
    (0..len)
        .map(|_| VOCAB[rng.random_range(0..VOCAB.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn vote_always_matches_score_sign() {
    let mut rng = StdRng::seed_from_u64(0x5e_17);
    for _ in 0..500 {
        let phrase = random_phrase(&mut rng);
        for lang in [Some("en"), None] {
            let r = analyze(&phrase, lang);
            let expected = if r.score > 0 {
                Vote::Positive
            } else if r.score < 0 {
                Vote::Negative
            } else {
                Vote::Neutral
            };
            assert_eq!(r.vote, expected, "phrase={phrase:?} lang={lang:?}");
        }
    }
}

#[test]
fn signed_lists_are_subsets_of_words() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..300 {
        let phrase = random_phrase(&mut rng);
        let r = analyze(&phrase, Some("en"));
        for w in r.positive.iter().chain(r.negative.iter()) {
            assert!(r.words.contains(w), "{w:?} missing from words for {phrase:?}");
        }
    }
}

#[test]
fn empty_phrase_is_neutral_with_nan_comparative() {
    let r = analyze("", Some("en"));
    assert_eq!(r.score, 0);
    assert!(r.tokens.is_empty());
    assert!(r.comparative.is_nan());
    assert_eq!(r.vote, Vote::Neutral);
}

#[test]
fn good_in_english() {
    let r = analyze("good", Some("en"));
    assert_eq!(r.score, 3);
    assert_eq!(r.comparative, 3.0);
    assert_eq!(r.vote, Vote::Positive);
    assert_eq!(r.words, vec!["good"]);
    assert_eq!(r.positive, vec!["good"]);
    assert!(r.negative.is_empty());
}

#[test]
fn negation_inverts_single_positive_word() {
    let r = analyze("not good", Some("en"));
    assert_eq!(r.score, -3);
    assert_eq!(r.vote, Vote::Negative);
    assert!(r.negation);
}

#[test]
fn negation_is_phrase_wide() {
    // "never" sits far from the words it flips.
    let r = analyze("never mind the awful weather it was great", Some("en"));
    assert!(r.negation);
    assert_eq!(r.score, -(-3 + 3));
    let r = analyze("great and wonderful but never again", Some("en"));
    assert_eq!(r.score, -(3 + 4));
}

#[test]
fn smiley_scores_regardless_of_language() {
    for lang in [Some("en"), Some("fr"), Some("zz"), None] {
        let r = analyze(":)", lang);
        assert_eq!(r.score, 2, "lang={lang:?}");
        assert_eq!(r.vote, Vote::Positive);
        assert_eq!(r.positive, vec![":)"]);
    }
}

#[test]
fn emoticons_ignore_negation() {
    let plain = analyze("great :(", Some("en"));
    assert_eq!(plain.score, 3 - 2);

    let negated = analyze("not great :(", Some("en"));
    assert!(negated.negation);
    assert_eq!(negated.score, -3 - 2);
}

#[test]
fn hits_follow_input_order() {
    let r = analyze("bad movie but great actors and love story", Some("en"));
    assert_eq!(r.words, vec!["bad", "great", "love"]);
    assert_eq!(r.positive, vec!["great", "love"]);
    assert_eq!(r.negative, vec!["bad"]);
}

#[test]
fn other_languages_use_their_tables() {
    let r = analyze("je ne suis pas content", Some("fr"));
    assert!(r.negation);
    assert_eq!(r.score, -3);

    let r = analyze(
        "der film ist leider nicht gut und die geschichte ist langweilig",
        None,
    );
    assert_eq!(r.language.as_deref(), Some("de"));
    assert_eq!(r.score, -3);
}

#[test]
fn short_english_phrase_is_detected() {
    let r = analyze("what a great movie", None);
    assert_eq!(r.language.as_deref(), Some("en"));
    assert_eq!(r.score, 3);
    assert_eq!(r.vote, Vote::Positive);
}

#[test]
fn emoticons_are_reported_as_written() {
    let r = analyze("yay :D", Some("xx"));
    assert_eq!(r.score, 3);
    assert_eq!(r.positive, vec![":D"]);

    let r = analyze("lol XD", Some("xx"));
    assert_eq!(r.positive, vec!["XD"]);
    assert_eq!(r.words, vec!["XD"]);
}

#[test]
fn unresolved_language_falls_back_to_emoji() {
    let r = analyze("12345 😀", None);
    assert_eq!(r.language, None);
    assert_eq!(r.score, 2);
    assert_eq!(r.words, vec!["😀"]);
}

#[test]
fn tokenize_is_idempotent_on_normalized_text() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let phrase = random_phrase(&mut rng);
        let once = tokenize(&phrase);
        if once.iter().any(|t| t.is_empty()) {
            // Edge spaces re-split differently once joined; covered in unit tests.
            continue;
        }
        assert_eq!(tokenize(&once.join(" ")), once, "phrase={phrase:?}");
    }
}

#[tokio::test]
async fn deferred_delivery_yields_the_same_result() {
    let (tx, rx) = tokio::sync::oneshot::channel();
    let handle = analyze_deferred("not good :)", Some("en".to_string()), move |res| {
        let _ = tx.send(res);
    });
    handle
        .expect("called inside a runtime")
        .await
        .expect("deferred task");

    let deferred = rx.await.expect("callback ran").expect("infallible");
    let direct = analyze("not good :)", Some("en"));
    assert_eq!(deferred.score, direct.score);
    assert_eq!(deferred.words, direct.words);
    assert_eq!(deferred.score, -1);
}

#[test]
fn deferred_delivery_outside_a_runtime_runs_inline() {
    let (tx, rx) = std::sync::mpsc::channel();
    let handle = analyze_deferred("good", Some("en".to_string()), move |res| {
        let _ = tx.send(res);
    });
    assert!(handle.is_none());
    let r = rx.try_recv().expect("callback already ran").expect("infallible");
    assert_eq!(r.score, 3);
}
