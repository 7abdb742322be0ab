//! Command-line interface for userdb.
//!
//! Every subcommand loads the credential file, runs one operation, and
//! saves again only when something changed.
//!
//! # Usage
//!
//! ```bash
//! # Add a user (password read from stdin when not given)
//! userdb --db users.txt create alice -p alice123
//!
//! # Check a login
//! userdb --db users.txt login alice -p alice123
//!
//! # Interactive session
//! userdb --db users.txt shell
//! ```

use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::auth::{CredentialStore, hash_file};
use crate::config::UserDbConfig;
use crate::error::{AuthError, UserDbError};
use crate::shell::{SessionContext, run_shell};
use crate::storage;

/// userdb command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "userdb", version, about = "Manage a flat-file credential store")]
pub struct UserDbArgs {
    /// Credential file; overrides `db_path` from the config.
    #[arg(short, long, global = true)]
    pub db: Option<PathBuf>,

    /// TOML config file (defaults to ./userdb.toml when present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: UserDbCommands,
}

/// userdb subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum UserDbCommands {
    /// Create a user and save the file.
    Create {
        username: String,

        /// Password; read from stdin when omitted.
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Check a username/password pair.
    Login {
        username: String,

        /// Password; read from stdin when omitted.
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Exit successfully if the user exists.
    Exists { username: String },

    /// Print every stored record.
    List,

    /// Print the SHA-256 of a file's contents.
    HashFile { path: PathBuf },

    /// Read commands from stdin until QUIT.
    Shell,
}

/// Resolve configuration from the config file and command-line overrides.
pub fn resolve_config(args: &UserDbArgs) -> Result<UserDbConfig, UserDbError> {
    let mut config = UserDbConfig::load(args.config.as_deref())?;
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    Ok(config)
}

/// Run a parsed command line.
pub async fn run(args: UserDbArgs, config: UserDbConfig) -> Result<(), UserDbError> {
    match args.command {
        UserDbCommands::Create { username, password } => {
            let mut store = open_store(&config)?;
            let password = password_or_stdin(password).await?;
            store.create_user(&username, &password)?;
            storage::save(&config.db_path, &store, config.save_mode)?;
            println!("Created user {}", username);
        }
        UserDbCommands::Login { username, password } => {
            let store = open_store(&config)?;
            let password = password_or_stdin(password).await?;
            store.validate_login(&username, &password)?;
            println!("Login successful");
        }
        UserDbCommands::Exists { username } => {
            if !open_store(&config)?.user_exists(&username) {
                return Err(AuthError::UsernameNotFound(username).into());
            }
            println!("{}", username);
        }
        UserDbCommands::List => print!("{}", open_store(&config)?),
        UserDbCommands::HashFile { path } => println!("{}", hash_file(&path)?),
        UserDbCommands::Shell => run_stdio_shell(open_store(&config)?, &config).await?,
    }

    Ok(())
}

fn open_store(config: &UserDbConfig) -> Result<CredentialStore, UserDbError> {
    let mut store = storage::load(&config.db_path, config.parse_mode)?;
    store.set_policy(config.store_policy());
    Ok(store)
}

async fn run_stdio_shell(store: CredentialStore, config: &UserDbConfig) -> Result<(), UserDbError> {
    info!("Starting shell on {}", config.db_path.display());
    let context = SessionContext {
        db_path: config.db_path.clone(),
        save_mode: config.save_mode,
    };

    run_shell(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        store.into_shared(),
        context,
    )
    .await?;
    Ok(())
}

async fn password_or_stdin(password: Option<String>) -> Result<String, UserDbError> {
    if let Some(password) = password {
        return Ok(password);
    }

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
