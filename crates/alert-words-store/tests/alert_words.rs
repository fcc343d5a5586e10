//! Alert word store integration tests.

mod common;

use alert_words_core::RealmId;
use alert_words_store::{Cache, Store, StoreConfig, StoreError};
use common::{words, TestHarness};

// ============================================================================
// User Alert Words
// ============================================================================

#[test]
fn add_then_remove_scenario() {
    let harness = TestHarness::new();
    let mut user = harness.create_user("Hamlet", &["foo", "bar"]);

    let added = harness
        .alert_words
        .add_user_alert_words(&mut user, &["bar", "baz"])
        .unwrap();
    assert_eq!(added, words(&["foo", "bar", "baz"]));

    let removed = harness
        .alert_words
        .remove_user_alert_words(&mut user, &["foo"])
        .unwrap();
    assert_eq!(removed, words(&["bar", "baz"]));

    // Both the in-memory profile and the stored one reflect the writes
    assert_eq!(
        harness.alert_words.user_alert_words(&user).unwrap(),
        words(&["bar", "baz"])
    );
    let stored = harness.alert_words.load_user(&user.id).unwrap();
    assert_eq!(
        harness.alert_words.user_alert_words(&stored).unwrap(),
        words(&["bar", "baz"])
    );
}

#[test]
fn add_is_idempotent() {
    let harness = TestHarness::new();
    let mut user = harness.create_user("Lear", &["storm"]);

    let first = harness
        .alert_words
        .add_user_alert_words(&mut user, &["storm", "heath"])
        .unwrap();
    let second = harness
        .alert_words
        .add_user_alert_words(&mut user, &["heath"])
        .unwrap();

    assert_eq!(first, words(&["storm", "heath"]));
    assert_eq!(second, first);
}

#[test]
fn remove_missing_word_is_noop() {
    let harness = TestHarness::new();
    let mut user = harness.create_user("Kent", &["loyal"]);

    let remaining = harness
        .alert_words
        .remove_user_alert_words(&mut user, &["disguise"])
        .unwrap();

    assert_eq!(remaining, words(&["loyal"]));
}

#[test]
fn new_user_has_no_alert_words() {
    let harness = TestHarness::new();
    let user = harness.create_user("Miranda", &[]);

    assert!(harness.alert_words.user_alert_words(&user).unwrap().is_empty());
}

#[test]
fn corrupt_field_surfaces_decode_error() {
    let harness = TestHarness::new();
    let mut user = harness.create_user("Caliban", &[]);
    user.alert_words = "not json".to_string();

    assert!(matches!(
        harness.alert_words.user_alert_words(&user),
        Err(StoreError::Decode(_))
    ));
    assert!(matches!(
        harness.alert_words.add_user_alert_words(&mut user, &["island"]),
        Err(StoreError::Decode(_))
    ));
}

#[test]
fn load_missing_user_is_not_found() {
    let harness = TestHarness::new();
    let result = harness
        .alert_words
        .load_user(&alert_words_core::UserId::generate());

    assert!(matches!(result, Err(StoreError::NotFound { entity: "user", .. })));
}

// ============================================================================
// Realm Alert Words
// ============================================================================

#[test]
fn realm_mapping_excludes_empty_lists() {
    let harness = TestHarness::new();
    let a = harness.create_user("A", &["x"]);
    let _b = harness.create_user("B", &[]);
    let c = harness.create_user("C", &["y", "z"]);

    let realm = harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();

    assert_eq!(realm.len(), 2);
    assert_eq!(realm[&a.id], words(&["x"]));
    assert_eq!(realm[&c.id], words(&["y", "z"]));
}

#[test]
fn realm_mapping_excludes_inactive_users() {
    let harness = TestHarness::new();
    let active = harness.create_user("Portia", &["mercy"]);
    let mut inactive = harness.create_user("Shylock", &["bond"]);

    harness
        .alert_words
        .set_user_active(&mut inactive, false)
        .unwrap();

    let realm = harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();
    assert_eq!(realm.len(), 1);
    assert!(realm.contains_key(&active.id));
}

#[test]
fn realm_mapping_drops_whitespace_empty_encodings() {
    let harness = TestHarness::new();
    let user = harness.create_user("Puck", &[]);
    harness.store.set_user_alert_words(&user.id, "[ ]").unwrap();

    let realm = harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();
    assert!(realm.is_empty());
}

#[test]
fn realm_mapping_is_scoped_to_realm() {
    let harness = TestHarness::new();
    let other_realm = RealmId::generate();
    harness.create_user("Oberon", &["fairy"]);
    let outsider = harness.create_user_in(other_realm, "Titania", &["ass"]);

    let realm = harness.alert_words.realm_alert_words(&other_realm).unwrap();
    assert_eq!(realm.len(), 1);
    assert_eq!(realm[&outsider.id], words(&["ass"]));
}

#[test]
fn realm_mapping_served_from_cache_until_invalidated() {
    let harness = TestHarness::new();
    let mut user = harness.create_user("Prospero", &["storm"]);

    let first = harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();
    assert_eq!(first[&user.id], words(&["storm"]));

    // A write that bypasses the alert word store is not seen while cached
    harness
        .store
        .set_user_alert_words(&user.id, r#"["books"]"#)
        .unwrap();
    let cached = harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();
    assert_eq!(cached, first);

    // Writing through the alert word store invalidates the realm entry
    user.alert_words = r#"["books"]"#.to_string();
    harness
        .alert_words
        .add_user_alert_words(&mut user, &["staff"])
        .unwrap();
    let fresh = harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();
    assert_eq!(fresh[&user.id], words(&["books", "staff"]));
}

#[test]
fn removing_last_word_drops_user_from_realm_mapping() {
    let harness = TestHarness::new();
    let mut user = harness.create_user("Ariel", &["free"]);

    assert_eq!(
        harness
            .alert_words
            .realm_alert_words(&harness.realm_id)
            .unwrap()
            .len(),
        1
    );

    harness
        .alert_words
        .remove_user_alert_words(&mut user, &["free"])
        .unwrap();

    assert!(harness
        .alert_words
        .realm_alert_words(&harness.realm_id)
        .unwrap()
        .is_empty());
}

#[test]
fn expired_cache_entry_is_recomputed() {
    let config = StoreConfig {
        realm_cache_ttl_seconds: 0,
        ..StoreConfig::default()
    };
    let harness = TestHarness::with_config(&config);
    let user = harness.create_user("Antonio", &["ship"]);

    harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();
    harness
        .store
        .set_user_alert_words(&user.id, r#"["bond"]"#)
        .unwrap();

    let realm = harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();
    assert_eq!(realm[&user.id], words(&["bond"]));
}

#[test]
fn undecodable_cache_entry_is_replaced() {
    let harness = TestHarness::new();
    let user = harness.create_user("Rosalind", &["forest"]);
    let key = alert_words_store::keys::realm_alert_words_cache_key(&harness.realm_id);

    harness
        .cache
        .set(&key, b"garbage".to_vec(), chrono::Duration::hours(1))
        .unwrap();

    let realm = harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();
    assert_eq!(realm[&user.id], words(&["forest"]));
    assert_ne!(harness.cache.get(&key).unwrap(), Some(b"garbage".to_vec()));
}

// ============================================================================
// Profile Writes
// ============================================================================

#[test]
fn saving_new_user_refreshes_realm_mapping() {
    let harness = TestHarness::new();
    let existing = harness.create_user("Beatrice", &["wit"]);
    assert_eq!(
        harness
            .alert_words
            .realm_alert_words(&harness.realm_id)
            .unwrap()
            .len(),
        1
    );

    let mut newcomer = alert_words_core::UserProfile::new(
        alert_words_core::UserId::generate(),
        harness.realm_id,
        "benedick@example.com".into(),
        "Benedick".into(),
    );
    newcomer.alert_words = r#"["marriage"]"#.to_string();
    harness.alert_words.save_user(&newcomer).unwrap();

    let realm = harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();
    assert_eq!(realm.len(), 2);
    assert_eq!(realm[&existing.id], words(&["wit"]));
    assert_eq!(realm[&newcomer.id], words(&["marriage"]));
}

#[test]
fn deleting_user_refreshes_realm_mapping() {
    let harness = TestHarness::new();
    let leaving = harness.create_user("Banquo", &["crown"]);
    let staying = harness.create_user("Macduff", &["thane"]);
    harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();

    harness.alert_words.delete_user(&leaving.id).unwrap();

    let realm = harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();
    assert_eq!(realm.len(), 1);
    assert!(realm.contains_key(&staying.id));
    assert!(matches!(
        harness.alert_words.delete_user(&leaving.id),
        Err(StoreError::NotFound { entity: "user", .. })
    ));
}

#[test]
fn moving_user_refreshes_both_realms() {
    let harness = TestHarness::new();
    let new_realm = RealmId::generate();
    let mut user = harness.create_user("Orlando", &["arden"]);

    harness.alert_words.realm_alert_words(&harness.realm_id).unwrap();
    assert!(harness
        .alert_words
        .realm_alert_words(&new_realm)
        .unwrap()
        .is_empty());

    user.realm_id = new_realm;
    harness.alert_words.save_user(&user).unwrap();

    assert!(harness
        .alert_words
        .realm_alert_words(&harness.realm_id)
        .unwrap()
        .is_empty());
    assert_eq!(
        harness.alert_words.realm_alert_words(&new_realm).unwrap()[&user.id],
        words(&["arden"])
    );
}

#[test]
fn alert_word_write_invalidates_stored_realm() {
    let harness = TestHarness::new();
    let new_realm = RealmId::generate();
    let mut stale = harness.create_user("Celia", &["cousin"]);

    // The stored profile moves realms while the caller keeps the old copy
    let mut moved = stale.clone();
    moved.realm_id = new_realm;
    harness.alert_words.save_user(&moved).unwrap();
    harness.alert_words.realm_alert_words(&new_realm).unwrap();

    harness
        .alert_words
        .add_user_alert_words(&mut stale, &["shepherd"])
        .unwrap();

    assert_eq!(
        harness.alert_words.realm_alert_words(&new_realm).unwrap()[&stale.id],
        words(&["cousin", "shepherd"])
    );
}
