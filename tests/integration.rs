use std::fs;

use userdb::auth::hash_hex;
use userdb::storage::{self, ParseMode, SaveMode};
use userdb::{AuthError, CredentialRecord, CredentialStore, StorageError};

// Helper to build the two-user fixture store
fn fixture_store() -> CredentialStore {
    let mut store = CredentialStore::new();
    store.insert_record(CredentialRecord::new("bcamp1", "salt1", "hash1"));
    store.insert_record(CredentialRecord::new("bcamp2", "salt2", "hash2"));
    store
}

fn triples(store: &CredentialStore) -> Vec<(String, String, String)> {
    store
        .records()
        .map(|r| (r.username().into(), r.salt().into(), r.hash().into()))
        .collect()
}

#[test]
fn test_hash_known_vector() {
    assert_eq!(
        hash_hex("Hello World"),
        "a591a6d40bf420404a011733cfb7b190d62c65bf0bcda32b57b277d9ad9f146e"
    );
}

#[test]
fn test_save_fixture_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usersDB_test.txt");

    storage::save(&path, &fixture_store(), SaveMode::Atomic).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "bcamp1\nsalt1\nhash1\nbcamp2\nsalt2\nhash2\n"
    );
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usersDB_test.txt");
    let store = fixture_store();

    storage::save(&path, &store, SaveMode::Overwrite).unwrap();
    let loaded = storage::load(&path, ParseMode::Strict).unwrap();

    assert_eq!(triples(&loaded), triples(&store));
}

#[test]
fn test_load_missing_file_bootstraps_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.txt");
    assert!(!path.exists());

    let store = storage::load(&path, ParseMode::Lenient).unwrap();

    assert!(store.is_empty());
    assert!(path.is_file());
    assert!(fs::read(&path).unwrap().is_empty());
}

#[test]
fn test_create_save_reload_validate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test");

    let mut store = storage::load(&path, ParseMode::Lenient).unwrap();
    store.create_user("bcamp3", "mypass").unwrap();
    storage::save(&path, &store, SaveMode::Atomic).unwrap();

    let reloaded = storage::load(&path, ParseMode::Strict).unwrap();
    assert_eq!(
        reloaded.validate_login("bcamp2345", "pw12345"),
        Err(AuthError::UsernameNotFound("bcamp2345".into()))
    );
    assert_eq!(
        reloaded.validate_login("bcamp3", "wrongpassword"),
        Err(AuthError::IncorrectPassword("bcamp3".into()))
    );
    assert_eq!(reloaded.validate_login("bcamp3", "mypass"), Ok(()));
}

#[test]
fn test_create_twice_across_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.txt");

    let mut store = storage::load(&path, ParseMode::Lenient).unwrap();
    store.create_user("dup", "first").unwrap();
    let first_hash = store.get("dup").unwrap().hash().to_string();
    storage::save(&path, &store, SaveMode::Atomic).unwrap();

    let mut store = storage::load(&path, ParseMode::Lenient).unwrap();
    assert_eq!(
        store.create_user("dup", "second"),
        Err(AuthError::UsernameExists("dup".into()))
    );
    assert_eq!(store.get("dup").unwrap().hash(), first_hash);
}

#[test]
fn test_truncated_file_modes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.txt");
    fs::write(&path, "bcamp1\nsalt1\nhash1\nbcamp2\nsalt2\n").unwrap();

    let lenient = storage::load(&path, ParseMode::Lenient).unwrap();
    assert_eq!(lenient.len(), 1);
    assert!(lenient.user_exists("bcamp1"));

    assert!(matches!(
        storage::load(&path, ParseMode::Strict),
        Err(StorageError::MalformedRecord { line: 4, found: 2 })
    ));
}

#[test]
fn test_hash_file_matches_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test-file-for-hash.txt");
    fs::write(&path, "this is a test").unwrap();

    assert_eq!(
        userdb::auth::hash_file(&path).unwrap(),
        "2e99758548972a8e8822ad47fa1017ff72f06f3ff6a016851f45c398732bc50c"
    );
}
