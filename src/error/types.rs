//! Error types
//!
//! Defines domain-specific error types for each module of the credential store.

use std::fmt;
use std::io;

/// Credential store errors
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    UsernameExists(String),
    UsernameNotFound(String),
    IncorrectPassword(String),
    InvalidUsername(String),
}

impl AuthError {
    /// Short, stable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::UsernameExists(_) => "UsernameExists",
            AuthError::UsernameNotFound(_) => "UsernameNotFound",
            AuthError::IncorrectPassword(_) => "IncorrectPassword",
            AuthError::InvalidUsername(_) => "InvalidUsername",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::UsernameExists(u) => write!(f, "Username already exists: {}", u),
            AuthError::UsernameNotFound(u) => write!(f, "Username doesn't exist: {}", u),
            AuthError::IncorrectPassword(u) => write!(f, "Incorrect password for user: {}", u),
            AuthError::InvalidUsername(s) => write!(f, "Invalid username: {}", s),
        }
    }
}

impl std::error::Error for AuthError {}

/// Flat file storage errors
#[derive(Debug)]
pub enum StorageError {
    IoError(io::Error),
    /// Trailing group that does not hold a full username/salt/hash triple.
    /// `line` is the 1-based line number where the group starts.
    MalformedRecord { line: usize, found: usize },
}

impl StorageError {
    pub fn kind(&self) -> &'static str {
        match self {
            StorageError::IoError(_) => "IoError",
            StorageError::MalformedRecord { .. } => "MalformedRecord",
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
            StorageError::MalformedRecord { line, found } => write!(
                f,
                "Malformed record at line {}: expected 3 lines, found {}",
                line, found
            ),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            StorageError::MalformedRecord { .. } => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// General error that encompasses all error types
#[derive(Debug)]
pub enum UserDbError {
    Auth(AuthError),
    Storage(StorageError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl UserDbError {
    pub fn kind(&self) -> &'static str {
        match self {
            UserDbError::Auth(e) => e.kind(),
            UserDbError::Storage(e) => e.kind(),
            UserDbError::Config(_) => "ConfigError",
            UserDbError::IoError(_) => "IoError",
        }
    }
}

impl fmt::Display for UserDbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserDbError::Auth(e) => write!(f, "Authentication error: {}", e),
            UserDbError::Storage(e) => write!(f, "Storage error: {}", e),
            UserDbError::Config(e) => write!(f, "Configuration error: {}", e),
            UserDbError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for UserDbError {}

impl From<AuthError> for UserDbError {
    fn from(error: AuthError) -> Self {
        UserDbError::Auth(error)
    }
}

impl From<StorageError> for UserDbError {
    fn from(error: StorageError) -> Self {
        UserDbError::Storage(error)
    }
}

impl From<config::ConfigError> for UserDbError {
    fn from(error: config::ConfigError) -> Self {
        UserDbError::Config(error)
    }
}

impl From<io::Error> for UserDbError {
    fn from(error: io::Error) -> Self {
        UserDbError::IoError(error)
    }
}
