//! userdb - Entry Point
//!
//! Loads the credential file, runs one command, and reports the outcome as
//! an exit code per error kind.

use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use userdb::cli::{self, UserDbArgs};
use userdb::error::handlers::{error_to_exit_code, handle_error};
use userdb::utils::setup_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args = UserDbArgs::parse();

    let config = match cli::resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            setup_logging("info");
            error!("{}", e);
            return ExitCode::from(error_to_exit_code(&e));
        }
    };

    // RUST_LOG still overrides the configured level
    setup_logging(&config.log_level);
    info!("Using credential file {}", config.db_path.display());

    match cli::run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handle_error(&e);
            eprintln!("Error: {}", e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}
