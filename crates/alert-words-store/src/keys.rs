//! Key encoding utilities.
//!
//! `RocksDB` keys are raw identifier bytes; cache keys are strings derived from the realm.

use alert_words_core::{RealmId, UserId};

/// Length of an encoded identifier.
const ID_LEN: usize = 16;

/// Create a user key from a user ID.
#[must_use]
pub fn user_key(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Create a realm-user index key.
///
/// Format: `realm_id (16 bytes) || user_id (16 bytes)`
#[must_use]
pub fn realm_user_key(realm_id: &RealmId, user_id: &UserId) -> Vec<u8> {
    let mut key = Vec::with_capacity(ID_LEN * 2);
    key.extend_from_slice(realm_id.as_bytes());
    key.extend_from_slice(user_id.as_bytes());
    key
}

/// Create a prefix for iterating all users in a realm.
#[must_use]
pub fn realm_users_prefix(realm_id: &RealmId) -> Vec<u8> {
    realm_id.as_bytes().to_vec()
}

/// Extract the user ID from a realm-user index key.
///
/// Returns `None` if the key is not exactly 32 bytes.
#[must_use]
pub fn extract_user_id_from_realm_key(key: &[u8]) -> Option<UserId> {
    if key.len() != ID_LEN * 2 {
        return None;
    }
    let mut bytes = [0u8; ID_LEN];
    bytes.copy_from_slice(&key[ID_LEN..]);
    Some(UserId::from_bytes(bytes))
}

/// Cache key for a realm's alert-word mapping.
#[must_use]
pub fn realm_alert_words_cache_key(realm_id: &RealmId) -> String {
    format!("realm_alert_words:{realm_id}")
}
