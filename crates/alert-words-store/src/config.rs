//! Storage configuration.

use chrono::Duration;

/// Default lifetime of a cached realm alert-word mapping (24 hours).
pub const REALM_ALERT_WORDS_CACHE_TTL_SECONDS: i64 = 3600 * 24;

/// Default `RocksDB` data directory.
const DEFAULT_DATA_DIR: &str = "/data/alert-words";

/// Storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to `RocksDB` data directory (default: "/data/alert-words").
    pub data_dir: String,

    /// Lifetime of a cached realm mapping in seconds (default: 86400).
    pub realm_cache_ttl_seconds: i64,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup.
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            data_dir: var("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.into()),
            realm_cache_ttl_seconds: var("REALM_ALERT_WORDS_CACHE_TTL_SECONDS")
                .and_then(|s| s.parse().ok())
                .filter(|secs: &i64| *secs >= 0)
                .unwrap_or(REALM_ALERT_WORDS_CACHE_TTL_SECONDS),
        }
    }

    /// Lifetime of a cached realm mapping.
    #[must_use]
    pub fn realm_cache_ttl(&self) -> Duration {
        Duration::try_seconds(self.realm_cache_ttl_seconds)
            .unwrap_or_else(|| Duration::seconds(REALM_ALERT_WORDS_CACHE_TTL_SECONDS))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.into(),
            realm_cache_ttl_seconds: REALM_ALERT_WORDS_CACHE_TTL_SECONDS,
        }
    }
}
