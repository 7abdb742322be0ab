//! Flat file storage
//!
//! Serializes the credential store to a line-oriented file and back.

pub mod codec;
pub mod filesystem;

pub use codec::{ParseMode, deserialize, serialize};
pub use filesystem::{SaveMode, load, save};
