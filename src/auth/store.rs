//! Credential store
//!
//! Owns the username -> record mapping and the hashing policy. Records are
//! only ever added; an existing username is never replaced by `create_user`.

use log::{debug, info};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::credentials::CredentialRecord;
use super::hash::{salted_hash, verify};
use super::salt::{DEFAULT_SALT_LENGTH, generate_salt};
use super::validator::{DEFAULT_MAX_USERNAME_LENGTH, validate_username};
use crate::error::AuthError;

/// Store shared between tasks of one process
pub type SharedCredentialStore = Arc<RwLock<CredentialStore>>;

/// Tunables applied when new users are created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorePolicy {
    pub salt_length: usize,
    pub max_username_length: usize,
}

impl Default for StorePolicy {
    fn default() -> Self {
        Self {
            salt_length: DEFAULT_SALT_LENGTH,
            max_username_length: DEFAULT_MAX_USERNAME_LENGTH,
        }
    }
}

/// In-memory credential store.
///
/// Keyed by username; every key equals the username of its record. The map
/// is ordered so that iteration (and the file written from it) is sorted.
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: BTreeMap<String, CredentialRecord>,
    policy: StorePolicy,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_policy(&mut self, policy: StorePolicy) {
        self.policy = policy;
    }

    /// Wraps the store for shared in-process access
    pub fn into_shared(self) -> SharedCredentialStore {
        Arc::new(RwLock::new(self))
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Creates a user with a fresh salt. Only touches memory; call
    /// [`crate::storage::save`] to persist.
    pub fn create_user(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if self.user_exists(username) {
            return Err(AuthError::UsernameExists(username.to_string()));
        }
        validate_username(username, self.policy.max_username_length)?;

        let salt = generate_salt(self.policy.salt_length);
        let hash = salted_hash(&salt, password);
        self.users.insert(
            username.to_string(),
            CredentialRecord::new(username, salt, hash),
        );

        info!("Created user {}", username);
        Ok(())
    }

    pub fn validate_login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let record = self
            .users
            .get(username)
            .ok_or_else(|| AuthError::UsernameNotFound(username.to_string()))?;

        if verify(record.salt(), password, record.hash()) {
            debug!("Login accepted for {}", username);
            Ok(())
        } else {
            debug!("Login rejected for {}", username);
            Err(AuthError::IncorrectPassword(username.to_string()))
        }
    }

    pub fn get(&self, username: &str) -> Option<&CredentialRecord> {
        self.users.get(username)
    }

    /// Inserts a record as read from storage. A later record with the same
    /// username replaces the earlier one.
    pub fn insert_record(&mut self, record: CredentialRecord) -> Option<CredentialRecord> {
        self.users.insert(record.username().to_string(), record)
    }

    /// Records in username order
    pub fn records(&self) -> impl Iterator<Item = &CredentialRecord> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

const RULE: &str = "----------------------------------------------------------------------";

impl fmt::Display for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------USERDB----------")?;
        for record in self.records() {
            writeln!(f, "{}", RULE)?;
            writeln!(f, "NAME: {}", record.username())?;
            writeln!(f, "SALT: {}", record.salt())?;
            writeln!(f, "HASH: {}", record.hash())?;
        }
        writeln!(f, "{}", RULE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_validate() {
        let mut store = CredentialStore::new();
        store.create_user("u", "p").unwrap();

        assert!(store.user_exists("u"));
        assert_eq!(store.validate_login("u", "p"), Ok(()));
        assert_eq!(
            store.validate_login("u", "wrong"),
            Err(AuthError::IncorrectPassword("u".into()))
        );
        assert_eq!(
            store.validate_login("missing", "p"),
            Err(AuthError::UsernameNotFound("missing".into()))
        );
    }

    #[test]
    fn test_create_twice_keeps_first() {
        let mut store = CredentialStore::new();
        store.create_user("bcamp3", "mypass").unwrap();
        let first = store.get("bcamp3").unwrap().clone();

        assert_eq!(
            store.create_user("bcamp3", "other"),
            Err(AuthError::UsernameExists("bcamp3".into()))
        );
        assert_eq!(store.get("bcamp3"), Some(&first));
        assert_eq!(store.len(), 1);
        assert!(store.validate_login("bcamp3", "mypass").is_ok());
        assert!(store.validate_login("bcamp3", "other").is_err());
    }

    #[test]
    fn test_record_fields() {
        let mut store = CredentialStore::new();
        store.create_user("alice", "alice123").unwrap();
        let record = store.get("alice").unwrap();

        assert_eq!(record.username(), "alice");
        assert_eq!(record.salt().len(), DEFAULT_SALT_LENGTH);
        assert_eq!(record.hash().len(), 64);
        assert_eq!(record.hash(), salted_hash(record.salt(), "alice123"));
    }

    #[test]
    fn test_same_password_different_salt() {
        let mut store = CredentialStore::new();
        store.create_user("a", "same").unwrap();
        store.create_user("b", "same").unwrap();
        assert_ne!(store.get("a").unwrap().hash(), store.get("b").unwrap().hash());
    }

    #[test]
    fn test_policy_salt_length() {
        let mut store = CredentialStore::new();
        store.set_policy(StorePolicy {
            salt_length: 8,
            max_username_length: 16,
        });
        store.create_user("short", "pw").unwrap();
        assert_eq!(store.get("short").unwrap().salt().len(), 8);
        assert!(matches!(
            store.create_user("a-name-way-over-sixteen", "pw"),
            Err(AuthError::InvalidUsername(_))
        ));
    }

    #[test]
    fn test_invalid_username_not_inserted() {
        let mut store = CredentialStore::new();
        assert!(store.create_user("bad\nname", "pw").is_err());
        assert!(store.create_user("", "pw").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_record_overwrites() {
        let mut store = CredentialStore::new();
        store.insert_record(CredentialRecord::new("x", "s1", "h1"));
        let old = store.insert_record(CredentialRecord::new("x", "s2", "h2"));

        assert_eq!(old, Some(CredentialRecord::new("x", "s1", "h1")));
        assert_eq!(store.get("x").unwrap().salt(), "s2");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_records_sorted() {
        let mut store = CredentialStore::new();
        for name in ["carol", "alice", "bob"] {
            store.create_user(name, "pw").unwrap();
        }
        let names: Vec<&str> = store.records().map(|r| r.username()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_display_dump() {
        let mut store = CredentialStore::new();
        store.insert_record(CredentialRecord::new("bcamp1", "salt1", "hash1"));
        let dump = store.to_string();

        assert!(dump.starts_with("----------USERDB----------\n"));
        assert!(dump.contains("NAME: bcamp1\nSALT: salt1\nHASH: hash1\n"));
    }

    #[tokio::test]
    async fn test_shared_store_sees_mutations() {
        let shared = CredentialStore::new().into_shared();
        let writer = Arc::clone(&shared);

        tokio::spawn(async move {
            writer.write().await.create_user("u", "p").unwrap();
        })
        .await
        .unwrap();

        assert!(shared.read().await.validate_login("u", "p").is_ok());
    }
}
