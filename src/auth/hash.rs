//! Password hashing utilities.

use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

/// Compute SHA-256 of `input` and return it as a lowercase hex string.
#[inline]
pub fn hash_hex(input: &str) -> String {
    digest_hex(input.as_bytes())
}

fn digest_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Hash a salted password. The salt always comes first.
#[inline]
pub fn salted_hash(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash the full contents of a file.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let contents = fs::read(path)?;
    Ok(digest_hex(&contents))
}

/// Check `password` against a stored salt and hash.
///
/// The comparison touches every byte regardless of where the first
/// difference is.
pub fn verify(salt: &str, password: &str, expected_hash: &str) -> bool {
    constant_time_eq(salted_hash(salt, password).as_bytes(), expected_hash.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
