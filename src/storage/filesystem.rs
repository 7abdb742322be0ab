//! File system access for the credential file
//!
//! Loading a missing file creates it empty. Saving either overwrites in place
//! or writes a sibling temp file and renames it over the target.

use log::{debug, info};
use serde::Deserialize;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::codec::{ParseMode, deserialize, serialize};
use crate::auth::CredentialStore;
use crate::error::StorageError;

/// How `save` puts bytes on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    /// Truncate and write the target directly. A crash mid-write can leave
    /// a partial file behind.
    Overwrite,
    /// Write `<file>.tmp`, sync it, rename over the target, then sync the
    /// containing directory so the rename itself is durable
    #[default]
    Atomic,
}

/// Reads the store at `path`, creating an empty file if none exists.
pub fn load(path: &Path, mode: ParseMode) -> Result<CredentialStore, StorageError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            File::create(path)?;
            info!("Created empty credential file {}", path.display());
            String::new()
        }
        Err(e) => return Err(StorageError::from(e)),
    };

    let store = deserialize(&contents, mode)?;
    info!("Loaded {} users from {}", store.len(), path.display());
    Ok(store)
}

/// Writes the whole store to `path`, replacing any previous contents.
pub fn save(path: &Path, store: &CredentialStore, mode: SaveMode) -> Result<(), StorageError> {
    let contents = serialize(store);

    match mode {
        SaveMode::Overwrite => fs::write(path, contents.as_bytes())?,
        SaveMode::Atomic => {
            let temp_path = temp_path_for(path);
            debug!("Writing {} via {}", path.display(), temp_path.display());

            let result = write_synced(&temp_path, contents.as_bytes())
                .and_then(|_| fs::rename(&temp_path, path))
                .and_then(|_| sync_dir(parent_dir(path)));
            if let Err(e) = result {
                let _ = fs::remove_file(&temp_path);
                return Err(StorageError::from(e));
            }
        }
    }

    info!("Saved {} users to {}", store.len(), path.display());
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    File::open(dir)?.sync_all()
}

// Directory handles cannot be synced here; the rename is left to the OS.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
