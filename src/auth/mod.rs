//! Authentication system
//!
//! Handles credential records, salted hashing, and login validation.

pub mod credentials;
pub mod hash;
pub mod salt;
pub mod store;
pub mod validator;

pub use credentials::CredentialRecord;
pub use hash::{hash_file, hash_hex};
pub use store::{CredentialStore, SharedCredentialStore, StorePolicy};
