//! Key-value cache with per-entry expiry.
//!
//! [`Cache`] is the boundary the realm alert-word mapping is cached behind. It is
//! injected into [`crate::AlertWordStore`] so deployments can back it with a shared
//! cache and tests can use [`MemoryCache`].

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::error::{Result, StoreError};

/// A byte-valued cache keyed by string.
pub trait Cache: Send + Sync {
    /// Get a value if present and not expired.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Cache` if the backend fails.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store a value that expires after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Cache` if the backend fails.
    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Cache` if the backend fails.
    fn delete(&self, key: &str) -> Result<()>;
}

#[derive(Debug)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: DateTime<Utc>,
}

/// In-process cache backed by a mutex-guarded map.
///
/// Expired entries are evicted when read, and all expired entries are swept on
/// every write.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, CacheEntry>>> {
        self.entries
            .lock()
            .map_err(|e| StoreError::Cache(format!("cache lock poisoned: {e}")))
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut entries = self.lock()?;
        let now = Utc::now();

        match entries.get(key) {
            Some(entry) if now < entry.expires_at => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut entries = self.lock()?;
        entries.retain(|_, entry| now < entry.expires_at);
        entries.insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
