//! Interactive shell
//!
//! A line-oriented session over any async reader/writer pair. The binary
//! wires it to stdin/stdout.

pub mod handler;
pub mod parser;

pub use handler::{SessionContext, handle_command, run_shell};
pub use parser::{Command, CommandResult, CommandStatus, parse_command};
