//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};
use serde::{Deserialize, Serialize};

use alert_words_core::{RealmId, UserId, UserProfile, EMPTY_ALERT_WORDS};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// Profile fields stored in `user_profiles`. Alert words live in their own
/// column family.
#[derive(Debug, Serialize, Deserialize)]
struct ProfileRecord {
    realm_id: RealmId,
    email: String,
    full_name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    fn from_profile(user: &UserProfile) -> Self {
        Self {
            realm_id: user.realm_id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    fn into_profile(self, id: UserId, alert_words: String) -> UserProfile {
        UserProfile {
            id,
            realm_id: self.realm_id,
            email: self.email,
            full_name: self.full_name,
            is_active: self.is_active,
            alert_words,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(path = %path.as_ref().display(), "Opened alert words store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Open or create the database in the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open_with_config(config: &StoreConfig) -> Result<Self> {
        Self::open(&config.data_dir)
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn get_profile_record(&self, user_id: &UserId) -> Result<Option<ProfileRecord>> {
        let cf = self.cf(cf::USER_PROFILES)?;

        self.db
            .get_cf(&cf, keys::user_key(user_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    /// Raw alert words for a user. A missing entry reads as the empty list.
    fn get_raw_alert_words(&self, user_id: &UserId) -> Result<String> {
        let cf = self.cf(cf::ALERT_WORDS)?;

        let raw = self
            .db
            .get_cf(&cf, keys::user_key(user_id))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        match raw {
            Some(bytes) => {
                String::from_utf8(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
            }
            None => Ok(EMPTY_ALERT_WORDS.to_string()),
        }
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Profile Operations
    // =========================================================================

    fn put_user(&self, user: &UserProfile) -> Result<()> {
        let cf_profiles = self.cf(cf::USER_PROFILES)?;
        let cf_words = self.cf(cf::ALERT_WORDS)?;
        let cf_by_realm = self.cf(cf::USERS_BY_REALM)?;

        let user_key = keys::user_key(&user.id);
        let value = Self::serialize(&ProfileRecord::from_profile(user))?;

        let mut batch = WriteBatch::default();

        // Moving a user to another realm drops the old index entry
        if let Some(previous) = self.get_profile_record(&user.id)? {
            if previous.realm_id != user.realm_id {
                batch.delete_cf(
                    &cf_by_realm,
                    keys::realm_user_key(&previous.realm_id, &user.id),
                );
            }
        }

        batch.put_cf(&cf_profiles, &user_key, &value);
        batch.put_cf(&cf_words, &user_key, user.alert_words.as_bytes());
        batch.put_cf(&cf_by_realm, keys::realm_user_key(&user.realm_id, &user.id), []);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_user(&self, user_id: &UserId) -> Result<Option<UserProfile>> {
        let Some(record) = self.get_profile_record(user_id)? else {
            return Ok(None);
        };
        let alert_words = self.get_raw_alert_words(user_id)?;

        Ok(Some(record.into_profile(*user_id, alert_words)))
    }

    fn delete_user(&self, user_id: &UserId) -> Result<()> {
        let record = self
            .get_profile_record(user_id)?
            .ok_or_else(|| StoreError::user_not_found(user_id))?;

        let cf_profiles = self.cf(cf::USER_PROFILES)?;
        let cf_words = self.cf(cf::ALERT_WORDS)?;
        let cf_by_realm = self.cf(cf::USERS_BY_REALM)?;
        let user_key = keys::user_key(user_id);

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_profiles, &user_key);
        batch.delete_cf(&cf_words, &user_key);
        batch.delete_cf(&cf_by_realm, keys::realm_user_key(&record.realm_id, user_id));

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn set_user_active(&self, user_id: &UserId, is_active: bool) -> Result<RealmId> {
        let mut record = self
            .get_profile_record(user_id)?
            .ok_or_else(|| StoreError::user_not_found(user_id))?;

        record.is_active = is_active;
        record.updated_at = Utc::now();

        let cf = self.cf(cf::USER_PROFILES)?;
        let value = Self::serialize(&record)?;

        self.db
            .put_cf(&cf, keys::user_key(user_id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(record.realm_id)
    }

    // =========================================================================
    // Alert Word Operations
    // =========================================================================

    fn set_user_alert_words(&self, user_id: &UserId, raw: &str) -> Result<RealmId> {
        let record = self
            .get_profile_record(user_id)?
            .ok_or_else(|| StoreError::user_not_found(user_id))?;

        let cf = self.cf(cf::ALERT_WORDS)?;

        self.db
            .put_cf(&cf, keys::user_key(user_id), raw.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(record.realm_id)
    }

    fn realm_alert_words_rows(&self, realm_id: &RealmId) -> Result<Vec<(UserId, String)>> {
        let cf_by_realm = self.cf(cf::USERS_BY_REALM)?;
        let prefix = keys::realm_users_prefix(realm_id);

        let iter = self
            .db
            .iterator_cf(&cf_by_realm, IteratorMode::From(&prefix, Direction::Forward));

        let mut rows = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            let Some(user_id) = keys::extract_user_id_from_realm_key(&key) else {
                tracing::warn!(realm_id = %realm_id, "Skipping malformed realm index key");
                continue;
            };

            let Some(record) = self.get_profile_record(&user_id)? else {
                continue;
            };
            if !record.is_active {
                continue;
            }

            let raw = self.get_raw_alert_words(&user_id)?;
            if raw != EMPTY_ALERT_WORDS {
                rows.push((user_id, raw));
            }
        }

        Ok(rows)
    }
}
