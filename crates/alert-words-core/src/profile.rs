//! User profile records.
//!
//! A profile is the record that owns a user's alert words. The alert words stay
//! in their stored textual form here; decoding happens at the storage boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::words::EMPTY_ALERT_WORDS;
use crate::{RealmId, UserId};

/// A user in a realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user ID.
    pub id: UserId,

    /// The realm (tenant) this user belongs to.
    pub realm_id: RealmId,

    /// Email address used to log in.
    pub email: String,

    /// Display name.
    pub full_name: String,

    /// Whether the user is active. Deactivated users are excluded from
    /// realm-wide alert word lookups.
    pub is_active: bool,

    /// Alert words as a JSON array of strings.
    pub alert_words: String,

    /// When the profile was created.
    pub created_at: DateTime<Utc>,

    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a new active user with no alert words.
    #[must_use]
    pub fn new(id: UserId, realm_id: RealmId, email: String, full_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            realm_id,
            email,
            full_name,
            is_active: true,
            alert_words: EMPTY_ALERT_WORDS.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_profile_defaults() {
        let profile = UserProfile::new(
            UserId::generate(),
            RealmId::generate(),
            "iago@example.com".into(),
            "Iago".into(),
        );

        assert!(profile.is_active);
        assert_eq!(profile.alert_words, "[]");
        assert_eq!(profile.created_at, profile.updated_at);
    }
}
