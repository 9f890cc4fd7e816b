//! Free-text yes/no classification.
//!
//! Deliberately dumb: curated word lists per supported language, no
//! natural-language inference. An utterance that matches neither list is
//! ignored, leaving the request pending until a structured signal or the
//! timeout resolves it.

/// Affirmative words and phrases (English, Spanish, German).
const AFFIRMATIVE: &[&str] = &[
    // English
    "yes",
    "y",
    "yeah",
    "yep",
    "yup",
    "ok",
    "okay",
    "sure",
    "approve",
    "approved",
    "accept",
    "go ahead",
    "do it",
    "proceed",
    // Spanish
    "si",
    "sí",
    "claro",
    "adelante",
    "aprobar",
    // German
    "ja",
    "jawohl",
    "genehmigt",
    "mach es",
];

/// Negative words and phrases (English, Spanish, German).
const NEGATIVE: &[&str] = &[
    // English
    "no",
    "n",
    "nope",
    "deny",
    "denied",
    "reject",
    "rejected",
    "stop",
    "cancel",
    "don't",
    "dont",
    "abort",
    // Spanish
    "para",
    "cancelar",
    "rechazar",
    // German
    "nein",
    "stopp",
    "abbrechen",
];

/// Classify an utterance as affirmative (`Some(true)`), negative
/// (`Some(false)`), or neither (`None`).
///
/// Matching is case-insensitive, ignores leading/trailing punctuation, and
/// accepts either the whole utterance or its first word ("yes please" is
/// affirmative; "did you say yes?" is not).
#[must_use]
pub fn classify_utterance(text: &str) -> Option<bool> {
    let normalized = text
        .trim()
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if AFFIRMATIVE.contains(&normalized.as_str()) {
        return Some(true);
    }
    if NEGATIVE.contains(&normalized.as_str()) {
        return Some(false);
    }

    let first = normalized
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| c.is_ascii_punctuation());
    if AFFIRMATIVE.contains(&first) {
        return Some(true);
    }
    if NEGATIVE.contains(&first) {
        return Some(false);
    }

    None
}
