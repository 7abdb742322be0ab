//! userdb - a flat-file credential store
//!
//! Usernames are stored with a random salt and the SHA-256 of salt plus
//! password, three lines per user.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod shell;
pub mod storage;
pub mod utils;

pub use auth::{CredentialRecord, CredentialStore, SharedCredentialStore};
pub use error::{AuthError, StorageError, UserDbError};
