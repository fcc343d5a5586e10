//! Alert word reads, writes and the cached realm mapping.
//!
//! Add and remove are read-modify-write over the profile's stored field with no
//! concurrency check. Two concurrent updates for the same user can lose one of the
//! writes (last write wins).
//!
//! Computing the realm mapping is not atomic with caching it either. A write that
//! invalidates the realm between the store query and the cache fill leaves the
//! older mapping cached until the next write in the realm or the cache lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;

use alert_words_core::{
    decode_alert_words, encode_alert_words, merge_alert_words, strip_alert_words, RealmId,
    UserId, UserProfile,
};

use crate::cache::Cache;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::keys;
use crate::Store;

/// Non-empty alert-word lists of a realm's active users.
pub type RealmAlertWords = HashMap<UserId, Vec<String>>;

/// Reads and updates user alert words and serves the cached realm mapping.
pub struct AlertWordStore<S, C> {
    store: Arc<S>,
    cache: Arc<C>,
    realm_cache_ttl: Duration,
}

impl<S: Store, C: Cache> AlertWordStore<S, C> {
    /// Create an alert word store using the default configuration.
    #[must_use]
    pub fn new(store: Arc<S>, cache: Arc<C>) -> Self {
        Self::with_config(store, cache, &StoreConfig::default())
    }

    /// Create an alert word store with the realm cache lifetime from `config`.
    #[must_use]
    pub fn with_config(store: Arc<S>, cache: Arc<C>, config: &StoreConfig) -> Self {
        Self {
            store,
            cache,
            realm_cache_ttl: config.realm_cache_ttl(),
        }
    }

    /// Load a user profile.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist.
    pub fn load_user(&self, user_id: &UserId) -> Result<UserProfile> {
        self.store
            .get_user(user_id)?
            .ok_or_else(|| StoreError::user_not_found(user_id))
    }

    /// Insert or update a user profile, alert words included.
    ///
    /// Drops the cached mapping of the user's realm, and of the realm the stored
    /// profile belonged to if the user moved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store or cache fails.
    pub fn save_user(&self, user: &UserProfile) -> Result<()> {
        let previous_realm = self.store.get_user(&user.id)?.map(|u| u.realm_id);
        self.store.put_user(user)?;

        tracing::info!(user_id = %user.id, realm_id = %user.realm_id, "Saved user");

        self.invalidate_realm(&user.realm_id)?;
        match previous_realm {
            Some(realm_id) if realm_id != user.realm_id => self.invalidate_realm(&realm_id),
            _ => Ok(()),
        }
    }

    /// Delete a user and drop the cached mapping of their realm.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist, or an error if
    /// the store or cache fails.
    pub fn delete_user(&self, user_id: &UserId) -> Result<()> {
        let user = self.load_user(user_id)?;
        self.store.delete_user(user_id)?;

        tracing::info!(user_id = %user_id, realm_id = %user.realm_id, "Deleted user");

        self.invalidate_realm(&user.realm_id)
    }

    /// Alert words of every active user in the realm that has any.
    ///
    /// Served from the cache when possible; otherwise computed from the store and
    /// cached until the realm cache lifetime elapses or an alert word write in the
    /// realm invalidates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store or cache fails, or if a stored field cannot
    /// be decoded.
    pub fn realm_alert_words(&self, realm_id: &RealmId) -> Result<RealmAlertWords> {
        let key = keys::realm_alert_words_cache_key(realm_id);

        if let Some(bytes) = self.cache.get(&key)? {
            match ciborium::from_reader::<RealmAlertWords, _>(bytes.as_slice()) {
                Ok(words) => {
                    tracing::debug!(
                        realm_id = %realm_id,
                        users = words.len(),
                        "Realm alert words cache hit"
                    );
                    return Ok(words);
                }
                Err(e) => {
                    tracing::warn!(
                        realm_id = %realm_id,
                        error = %e,
                        "Discarding undecodable realm alert words cache entry"
                    );
                }
            }
        }

        tracing::debug!(realm_id = %realm_id, "Realm alert words cache miss");

        let mut words = RealmAlertWords::new();
        for (user_id, raw) in self.store.realm_alert_words_rows(realm_id)? {
            let decoded = decode_alert_words(&raw)?;
            // Formatting variants of "[]" pass the query filter but decode to nothing
            if !decoded.is_empty() {
                words.insert(user_id, decoded);
            }
        }

        let mut buf = Vec::new();
        ciborium::into_writer(&words, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.cache.set(&key, buf, self.realm_cache_ttl)?;

        Ok(words)
    }

    /// Decode a user's alert words.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Decode` if the stored field is not a JSON array of strings.
    pub fn user_alert_words(&self, user: &UserProfile) -> Result<Vec<String>> {
        Ok(decode_alert_words(&user.alert_words)?)
    }

    /// Add alert words, skipping any the user already has, and return the full list.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored field cannot be decoded or the write fails.
    pub fn add_user_alert_words<W: AsRef<str>>(
        &self,
        user: &mut UserProfile,
        words: &[W],
    ) -> Result<Vec<String>> {
        let merged = merge_alert_words(self.user_alert_words(user)?, words);
        self.set_user_alert_words(user, &merged)?;
        Ok(merged)
    }

    /// Remove every alert word matching one of `words` and return what is left.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored field cannot be decoded or the write fails.
    pub fn remove_user_alert_words<W: AsRef<str>>(
        &self,
        user: &mut UserProfile,
        words: &[W],
    ) -> Result<Vec<String>> {
        let remaining = strip_alert_words(self.user_alert_words(user)?, words);
        self.set_user_alert_words(user, &remaining)?;
        Ok(remaining)
    }

    /// Replace a user's alert words.
    ///
    /// Only the alert-word field is persisted. The cached mapping for the realm the
    /// stored user belongs to is dropped before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the user doesn't exist or the store or cache fails.
    pub fn set_user_alert_words<W: AsRef<str>>(
        &self,
        user: &mut UserProfile,
        words: &[W],
    ) -> Result<()> {
        let raw = encode_alert_words(words)?;
        let realm_id = self.store.set_user_alert_words(&user.id, &raw)?;
        user.alert_words = raw;

        tracing::info!(
            user_id = %user.id,
            realm_id = %realm_id,
            count = words.len(),
            "Updated alert words"
        );

        self.invalidate_realms(&realm_id, &user.realm_id)
    }

    /// Activate or deactivate a user.
    ///
    /// The realm mapping only covers active users, so the realm's cache entry is
    /// dropped as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the user doesn't exist or the store or cache fails.
    pub fn set_user_active(&self, user: &mut UserProfile, is_active: bool) -> Result<()> {
        let realm_id = self.store.set_user_active(&user.id, is_active)?;
        user.is_active = is_active;

        tracing::info!(
            user_id = %user.id,
            realm_id = %realm_id,
            is_active,
            "Updated user active flag"
        );

        self.invalidate_realms(&realm_id, &user.realm_id)
    }

    /// Drop the stored realm's entry, and the caller's realm if the profile in
    /// hand is out of date.
    fn invalidate_realms(&self, stored: &RealmId, in_hand: &RealmId) -> Result<()> {
        self.invalidate_realm(stored)?;
        if stored != in_hand {
            self.invalidate_realm(in_hand)?;
        }
        Ok(())
    }

    fn invalidate_realm(&self, realm_id: &RealmId) -> Result<()> {
        tracing::debug!(realm_id = %realm_id, "Invalidating realm alert words cache");
        self.cache.delete(&keys::realm_alert_words_cache_key(realm_id))
    }
}
