//! Configuration management for userdb
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `USERDB_*` environment variables (e.g. `USERDB_DB_PATH`).

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::auth::StorePolicy;
use crate::auth::salt::DEFAULT_SALT_LENGTH;
use crate::auth::validator::DEFAULT_MAX_USERNAME_LENGTH;
use crate::storage::{ParseMode, SaveMode};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "userdb";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UserDbConfig {
    /// Credential file read on startup and written after changes
    pub db_path: PathBuf,

    /// Characters per generated salt
    pub salt_length: usize,

    pub max_username_length: usize,

    /// Treatment of a trailing incomplete record when loading
    pub parse_mode: ParseMode,

    pub save_mode: SaveMode,

    /// Default log filter; `RUST_LOG` wins when set
    pub log_level: String,
}

impl Default for UserDbConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("usersDB.txt"),
            salt_length: DEFAULT_SALT_LENGTH,
            max_username_length: DEFAULT_MAX_USERNAME_LENGTH,
            parse_mode: ParseMode::Lenient,
            save_mode: SaveMode::Atomic,
            log_level: "info".to_string(),
        }
    }
}

impl UserDbConfig {
    /// Load configuration with environment overrides.
    ///
    /// An explicit `path` must exist; the default `userdb.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("USERDB").try_parsing(true))
            .build()?;

        let config: UserDbConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(config::ConfigError::Message(
                "db_path cannot be empty".into(),
            ));
        }

        if self.salt_length == 0 {
            return Err(config::ConfigError::Message(
                "salt_length must be greater than 0".into(),
            ));
        }

        if self.max_username_length == 0 {
            return Err(config::ConfigError::Message(
                "max_username_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Policy handed to the credential store
    pub fn store_policy(&self) -> StorePolicy {
        StorePolicy {
            salt_length: self.salt_length,
            max_username_length: self.max_username_length,
        }
    }
}
