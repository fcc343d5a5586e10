//! Shared test utilities for alert word integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use alert_words_core::{RealmId, UserId, UserProfile};
use alert_words_store::{AlertWordStore, MemoryCache, RocksStore, Store, StoreConfig};
use tempfile::TempDir;

/// A store, cache and alert word store over a temporary `RocksDB` directory.
pub struct TestHarness {
    pub store: Arc<RocksStore>,
    pub cache: Arc<MemoryCache>,
    pub alert_words: AlertWordStore<RocksStore, MemoryCache>,
    pub realm_id: RealmId,
    _dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    pub fn with_config(config: &StoreConfig) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(RocksStore::open(dir.path()).expect("Failed to open store"));
        let cache = Arc::new(MemoryCache::new());
        let alert_words = AlertWordStore::with_config(store.clone(), cache.clone(), config);

        Self {
            store,
            cache,
            alert_words,
            realm_id: RealmId::generate(),
            _dir: dir,
        }
    }

    /// Create and persist an active user in the harness realm.
    pub fn create_user(&self, name: &str, words: &[&str]) -> UserProfile {
        self.create_user_in(self.realm_id, name, words)
    }

    pub fn create_user_in(&self, realm_id: RealmId, name: &str, words: &[&str]) -> UserProfile {
        let mut user = UserProfile::new(
            UserId::generate(),
            realm_id,
            format!("{}@example.com", name.to_lowercase()),
            name.to_string(),
        );
        user.alert_words = encoded(words);
        self.store.put_user(&user).expect("Failed to put user");
        user
    }
}

fn encoded(words: &[&str]) -> String {
    alert_words_core::encode_alert_words(words).expect("Failed to encode alert words")
}

pub fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
