//! Main application entry point.
//!
//! This is a thin wrapper around the `lead_relay` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line and environment configuration
//! - Logger initialization
//!
//! Configuration is validated by [`lead_relay::run`].
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use lead_relay::initialization::init_logger_with;
use lead_relay::{run, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the environment may already be set
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("lead_relay: ignoring unreadable .env file: {e}");
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Err(e) = run(config).await {
        eprintln!("lead_relay error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
