//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// User profile records without alert words, keyed by `user_id`.
    pub const USER_PROFILES: &str = "user_profiles";

    /// Raw alert-word text per user, keyed by `user_id`.
    ///
    /// Kept apart from the profile so alert-word writes never rewrite (and
    /// never clobber) the other profile fields.
    pub const ALERT_WORDS: &str = "alert_words";

    /// Index: users by realm, keyed by `realm_id || user_id`.
    /// Value is empty (index only).
    pub const USERS_BY_REALM: &str = "users_by_realm";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::USER_PROFILES, cf::ALERT_WORDS, cf::USERS_BY_REALM]
}
