//! Salt generation

use rand::Rng;
use rand::rngs::OsRng;

/// Default salt length in characters
pub const DEFAULT_SALT_LENGTH: usize = 50;

/// Lowest codepoint a salt character may take (`!`)
const SALT_CHAR_MIN: u8 = 33;
/// Exclusive upper bound; `~` (126) is never drawn
const SALT_CHAR_MAX: u8 = 126;

/// Generates a random salt of `len` printable ASCII characters.
///
/// Each character is drawn independently and uniformly from `[33, 126)`.
pub fn generate_salt(len: usize) -> String {
    let mut rng = OsRng;
    (0..len)
        .map(|_| char::from(rng.gen_range(SALT_CHAR_MIN..SALT_CHAR_MAX)))
        .collect()
}
