use log::{error, info, warn};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::parser::{Command, CommandResult, CommandStatus, parse_command};
use crate::auth::{CredentialStore, SharedCredentialStore};
use crate::error::{AuthError, StorageError};
use crate::storage::{self, SaveMode};

const MAX_COMMAND_LENGTH: usize = 1024;

/// Where `SAVE` writes the store
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub db_path: PathBuf,
    pub save_mode: SaveMode,
}

/// Runs one shell session until `QUIT` or end of input.
///
/// - Reads command lines from `reader` and writes one reply per command.
/// - Takes the store lock for the duration of each command only.
pub async fn run_shell<R, W>(
    mut reader: R,
    mut writer: W,
    store: SharedCredentialStore,
    context: SessionContext,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                info!("Shell input closed");
                break;
            }
            Ok(_) => {
                if buf.len() > MAX_COMMAND_LENGTH {
                    writer.write_all(b"ERR Command too long\n").await?;
                    writer.flush().await?;
                    continue;
                }

                let line = match std::str::from_utf8(&buf) {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Discarding non UTF-8 shell input: {}", e);
                        writer
                            .write_all(b"ERR InvalidInput: line is not valid UTF-8\n")
                            .await?;
                        writer.flush().await?;
                        continue;
                    }
                };

                let command = parse_command(line.trim_end_matches(['\r', '\n']));
                let result = {
                    let mut guard = store.write().await;
                    handle_command(&mut guard, command, &context)
                };

                if let Some(msg) = result.message {
                    writer.write_all(msg.as_bytes()).await?;
                    writer.flush().await?;
                }

                if result.status == CommandStatus::CloseSession {
                    info!("Shell session ended by QUIT");
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read shell input: {}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}

/// Handle a single command against the store
pub fn handle_command(
    store: &mut CredentialStore,
    command: Command,
    context: &SessionContext,
) -> CommandResult {
    match command {
        Command::Create { username, password } => handle_cmd_create(store, &username, &password),
        Command::Login { username, password } => handle_cmd_login(store, &username, &password),
        Command::Exists(username) => handle_cmd_exists(store, &username),
        Command::List => handle_cmd_list(store),
        Command::Save => handle_cmd_save(store, context),
        Command::Quit => CommandResult {
            status: CommandStatus::CloseSession,
            message: Some("OK bye\n".into()),
        },
        Command::Unknown(raw) => {
            warn!("Unknown shell command: {}", raw);
            failure("Unknown", "unrecognized command".into())
        }
    }
}

fn handle_cmd_create(store: &mut CredentialStore, username: &str, password: &str) -> CommandResult {
    match store.create_user(username, password) {
        Ok(()) => success(format!("user {} created", username)),
        Err(e) => auth_failure(e),
    }
}

fn handle_cmd_login(store: &CredentialStore, username: &str, password: &str) -> CommandResult {
    match store.validate_login(username, password) {
        Ok(()) => success(format!("login accepted for {}", username)),
        Err(e) => auth_failure(e),
    }
}

fn handle_cmd_exists(store: &CredentialStore, username: &str) -> CommandResult {
    success(store.user_exists(username).to_string())
}

fn handle_cmd_list(store: &CredentialStore) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message: Some(format!("OK {} users\n{}", store.len(), store)),
    }
}

fn handle_cmd_save(store: &CredentialStore, context: &SessionContext) -> CommandResult {
    match storage::save(&context.db_path, store, context.save_mode) {
        Ok(()) => success(format!("saved {} users", store.len())),
        Err(e) => {
            error!("Failed to save {}: {}", context.db_path.display(), e);
            storage_failure(e)
        }
    }
}

fn success(msg: String) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message: Some(format!("OK {}\n", msg)),
    }
}

fn failure(kind: &str, msg: String) -> CommandResult {
    CommandResult {
        status: CommandStatus::Failure(kind.to_string()),
        message: Some(format!("ERR {}: {}\n", kind, msg)),
    }
}

fn auth_failure(err: AuthError) -> CommandResult {
    failure(err.kind(), err.to_string())
}

fn storage_failure(err: StorageError) -> CommandResult {
    failure(err.kind(), err.to_string())
}
