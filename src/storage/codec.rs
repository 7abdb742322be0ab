//! Flat file codec
//!
//! The file is UTF-8 text made of repeating three-line groups:
//! username, salt, hash. Every line ends with `\n`. There is no header and
//! no escaping, so fields must not contain a newline.

use log::{debug, warn};
use serde::Deserialize;

use crate::auth::{CredentialRecord, CredentialStore};
use crate::error::StorageError;

const LINES_PER_RECORD: usize = 3;

/// How to treat a trailing group with fewer than three lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Drop the incomplete group and carry on
    #[default]
    Lenient,
    /// Fail with [`StorageError::MalformedRecord`]
    Strict,
}

/// Writes every record as three newline-terminated lines, in username order.
pub fn serialize(store: &CredentialStore) -> String {
    let mut contents = String::new();
    for record in store.records() {
        contents.push_str(record.username());
        contents.push('\n');
        contents.push_str(record.salt());
        contents.push('\n');
        contents.push_str(record.hash());
        contents.push('\n');
    }
    contents
}

/// Parses three-line groups into a store. A repeated username keeps the
/// last group seen.
pub fn deserialize(input: &str, mode: ParseMode) -> Result<CredentialStore, StorageError> {
    let body = input.strip_suffix('\n').unwrap_or(input);
    let lines: Vec<&str> = if body.is_empty() {
        Vec::new()
    } else {
        body.split('\n').collect()
    };

    let mut store = CredentialStore::new();
    let mut groups = lines.chunks_exact(LINES_PER_RECORD);

    for group in groups.by_ref() {
        let record = CredentialRecord::new(group[0], group[1], group[2]);
        if let Some(previous) = store.insert_record(record) {
            debug!("Duplicate record for {} replaced", previous.username());
        }
    }

    let leftover = groups.remainder();
    if !leftover.is_empty() {
        let line = lines.len() - leftover.len() + 1;
        match mode {
            ParseMode::Lenient => warn!(
                "Ignoring incomplete record at line {} ({} of {} lines)",
                line,
                leftover.len(),
                LINES_PER_RECORD
            ),
            ParseMode::Strict => {
                return Err(StorageError::MalformedRecord {
                    line,
                    found: leftover.len(),
                });
            }
        }
    }

    Ok(store)
}
