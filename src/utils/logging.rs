//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::Env;

/// Setup logging for the CLI.
///
/// `default_level` applies unless `RUST_LOG` is set. Calling this twice is
/// harmless.
pub fn setup_logging(default_level: &str) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}
