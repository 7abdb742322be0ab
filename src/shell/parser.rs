//! Shell command parsing
//!
//! Turns one input line into a [`Command`]. Command words are
//! case-insensitive; arguments are kept as typed.

/// A command entered in the interactive shell.
#[derive(Debug, PartialEq)]
pub enum Command {
    Create { username: String, password: String },
    Login { username: String, password: String },
    Exists(String),
    List,
    Save,
    Quit,
    Unknown(String),
}

/// Outcome of running a command
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseSession,
}

/// Status plus the reply line to send back
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

/// Parses a raw line. The password is everything after the username, so it
/// may contain spaces but not leading or trailing whitespace.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "CREATE" | "LOGIN" => match split_credentials(arg) {
            Some((username, password)) if cmd == "CREATE" => Command::Create { username, password },
            Some((username, password)) => Command::Login { username, password },
            None => Command::Unknown(trimmed.to_string()),
        },
        "EXISTS" if !arg.is_empty() => Command::Exists(arg.to_string()),
        "LIST" => Command::List,
        "SAVE" => Command::Save,
        "QUIT" | "Q" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

fn split_credentials(arg: &str) -> Option<(String, String)> {
    let mut parts = arg.splitn(2, char::is_whitespace);
    let username = parts.next().filter(|u| !u.is_empty())?;
    let password = parts.next().map(str::trim).filter(|p| !p.is_empty())?;
    Some((username.to_string(), password.to_string()))
}
