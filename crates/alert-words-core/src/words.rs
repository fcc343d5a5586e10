//! Alert word encoding and list operations.
//!
//! Alert words are stored as JSON text. Everything in this module is pure: the
//! storage layer reads the field, calls into here, and writes the result back.

use crate::error::{CoreError, DecodeError, Result};

/// Encoding of an empty alert-word list.
///
/// The realm-wide query filters on this exact string, so it must match what
/// [`encode_alert_words`] produces for an empty list.
pub const EMPTY_ALERT_WORDS: &str = "[]";

/// Encode alert words as a JSON array.
///
/// # Errors
///
/// Returns `CoreError::Encode` if serialization fails.
pub fn encode_alert_words<S: AsRef<str>>(words: &[S]) -> Result<String> {
    let words: Vec<&str> = words.iter().map(|w| w.as_ref()).collect();
    serde_json::to_string(&words).map_err(|e| CoreError::Encode(e.to_string()))
}

/// Decode a stored alert-word field.
///
/// # Errors
///
/// Returns `DecodeError` if `raw` is not a JSON array of strings.
pub fn decode_alert_words(raw: &str) -> std::result::Result<Vec<String>, DecodeError> {
    serde_json::from_str(raw).map_err(|e| DecodeError(e.to_string()))
}

/// Append each word from `new` that is not already present.
///
/// Matching is exact and case-sensitive. Existing words keep their positions and
/// new words are appended in input order; a word repeated in `new` is added once.
#[must_use]
pub fn merge_alert_words<S: AsRef<str>>(mut existing: Vec<String>, new: &[S]) -> Vec<String> {
    for word in new.iter().map(|w| w.as_ref()) {
        if !existing.iter().any(|w| w == word) {
            existing.push(word.to_string());
        }
    }
    existing
}

/// Drop every word that exactly matches an entry of `remove`.
#[must_use]
pub fn strip_alert_words<S: AsRef<str>>(existing: Vec<String>, remove: &[S]) -> Vec<String> {
    existing
        .into_iter()
        .filter(|w| !remove.iter().any(|r| r.as_ref() == w.as_str()))
        .collect()
}
