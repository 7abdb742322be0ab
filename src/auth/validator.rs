//! Username validation
//!
//! Usernames are written verbatim as one line of the flat file, so anything
//! that would split or truncate a line is rejected up front.

use crate::error::AuthError;

/// Default upper bound on username length in bytes
pub const DEFAULT_MAX_USERNAME_LENGTH: usize = 256;

/// Checks that `username` can be stored as a single line.
pub fn validate_username(username: &str, max_length: usize) -> Result<(), AuthError> {
    if username.is_empty() {
        return Err(AuthError::InvalidUsername("username is empty".into()));
    }

    if username.len() > max_length {
        return Err(AuthError::InvalidUsername(format!(
            "username longer than {} bytes",
            max_length
        )));
    }

    if username.contains(['\r', '\n', '\0']) {
        return Err(AuthError::InvalidUsername(
            "username contains a line break or NUL".into(),
        ));
    }

    Ok(())
}
