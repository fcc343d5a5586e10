//! Storage and realm-wide caching for alert words.
//!
//! This crate persists user profiles and their alert words in `RocksDB` and provides
//! [`AlertWordStore`], which reads and updates a user's alert words and serves a
//! cached per-realm mapping of every active user's non-empty alert-word list.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `user_profiles`: Profile records (without alert words), keyed by `user_id`
//! - `alert_words`: Raw JSON alert-word text, keyed by `user_id`
//! - `users_by_realm`: Index for listing the users of a realm
//!
//! The realm mapping lives in an injected [`Cache`]; every alert-word write
//! invalidates the entry for the user's realm.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use alert_words_core::{RealmId, UserId, UserProfile};
//! use alert_words_store::{AlertWordStore, MemoryCache, RocksStore, Store};
//!
//! let store = Arc::new(RocksStore::open("/tmp/alert-words-db").unwrap());
//! let words = AlertWordStore::new(store.clone(), Arc::new(MemoryCache::new()));
//!
//! let realm_id = RealmId::generate();
//! let mut user = UserProfile::new(
//!     UserId::generate(),
//!     realm_id,
//!     "hamlet@example.com".into(),
//!     "Hamlet".into(),
//! );
//! store.put_user(&user).unwrap();
//!
//! words.add_user_alert_words(&mut user, &["deploy", "outage"]).unwrap();
//! let realm_words = words.realm_alert_words(&realm_id).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod config;
pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;
pub mod service;

pub use cache::{Cache, MemoryCache};
pub use config::{StoreConfig, REALM_ALERT_WORDS_CACHE_TTL_SECONDS};
pub use error::{Result, StoreError};
pub use rocks::RocksStore;
pub use service::{AlertWordStore, RealmAlertWords};

use alert_words_core::{RealmId, UserId, UserProfile};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // Profile Operations
    // =========================================================================

    /// Insert or update a user profile, including its alert words.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_user(&self, user: &UserProfile) -> Result<()>;

    /// Get a user profile by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user(&self, user_id: &UserId) -> Result<Option<UserProfile>>;

    /// Delete a user profile and its alert words.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist.
    fn delete_user(&self, user_id: &UserId) -> Result<()>;

    /// Mark a user active or deactivated.
    ///
    /// Returns the realm the stored user belongs to.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist.
    fn set_user_active(&self, user_id: &UserId, is_active: bool) -> Result<RealmId>;

    // =========================================================================
    // Alert Word Operations
    // =========================================================================

    /// Overwrite the raw alert-word field of a user.
    ///
    /// Only the alert-word field is written; other profile fields are left as stored.
    /// Returns the realm the stored user belongs to.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist.
    fn set_user_alert_words(&self, user_id: &UserId, raw: &str) -> Result<RealmId>;

    /// List `(user_id, raw alert words)` for the active users of a realm whose
    /// field is not exactly the empty-array encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn realm_alert_words_rows(&self, realm_id: &RealmId) -> Result<Vec<(UserId, String)>>;
}
