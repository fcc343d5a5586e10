//! Error types for alert words.

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// A stored alert-word field that is not a JSON array of strings.
///
/// Every write goes through [`crate::encode_alert_words`], so this only shows up
/// when the underlying record was modified out of band.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid alert words encoding: {0}")]
pub struct DecodeError(pub String);

/// Errors that can occur in core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Stored alert words could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Alert words could not be encoded.
    #[error("encoding error: {0}")]
    Encode(String),
}
