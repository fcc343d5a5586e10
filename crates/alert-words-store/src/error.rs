//! Error types for alert-word storage.

use alert_words_core::{CoreError, DecodeError};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record that was looked up.
        entity: &'static str,
        /// The identifier that was not found.
        id: String,
    },

    /// A stored alert-word field is not a JSON array of strings.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Cache backend failed.
    #[error("cache error: {0}")]
    Cache(String),
}

impl StoreError {
    /// Build a `NotFound` error for a user.
    pub(crate) fn user_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "user",
            id: id.to_string(),
        }
    }
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Decode(e) => Self::Decode(e),
            CoreError::Encode(msg) => Self::Serialization(msg),
        }
    }
}
