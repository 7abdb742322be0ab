//! Credential records
//!
//! A single username paired with its salt and salted password hash.

/// One stored credential.
///
/// `hash` is the lowercase hex SHA-256 of `salt` followed by the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    username: String,
    salt: String,
    hash: String,
}

impl CredentialRecord {
    pub fn new(
        username: impl Into<String>,
        salt: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            salt: salt.into(),
            hash: hash.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}
