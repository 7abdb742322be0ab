//! Error handlers
//!
//! Provides error reporting and exit code mapping.

use crate::error::types::{AuthError, StorageError, UserDbError};
use log::{error, warn};

/// Log an error at a level matching its kind
pub fn handle_error(err: &UserDbError) {
    match err {
        UserDbError::Auth(_) => warn!("{}", err),
        _ => error!("{}", err),
    }
}

/// Convert error to a process exit code, one per kind
pub fn error_to_exit_code(err: &UserDbError) -> u8 {
    match err {
        UserDbError::Auth(AuthError::UsernameExists(_)) => 10,
        UserDbError::Auth(AuthError::UsernameNotFound(_)) => 11,
        UserDbError::Auth(AuthError::IncorrectPassword(_)) => 12,
        UserDbError::Auth(AuthError::InvalidUsername(_)) => 13,
        UserDbError::Storage(StorageError::MalformedRecord { .. }) => 20,
        UserDbError::Storage(StorageError::IoError(_)) => 21,
        UserDbError::IoError(_) => 21,
        UserDbError::Config(_) => 30,
    }
}
