//! Core types and utilities for alert words.
//!
//! This crate provides the foundational types shared by the alert-words storage layer:
//!
//! - **Identifiers**: `UserId`, `RealmId`
//! - **Profiles**: `UserProfile`, the user record that owns an alert-word list
//! - **Alert words**: the JSON text codec and the pure add/remove list operations
//!
//! # Storage format
//!
//! A user's alert words live in a single text field holding a JSON array of strings.
//! The empty array `"[]"` is the default for every new user and doubles as the
//! sentinel the realm-wide query uses to skip users without alert words.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod profile;
pub mod words;

pub use error::{CoreError, DecodeError, Result};
pub use ids::{IdError, RealmId, UserId};
pub use profile::UserProfile;
pub use words::{
    decode_alert_words, encode_alert_words, merge_alert_words, strip_alert_words,
    EMPTY_ALERT_WORDS,
};
