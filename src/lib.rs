//! lead_relay library: lead intake, mapping and CMS forwarding
//!
//! This library receives lead-capture form submissions over HTTP, resolves the
//! dealer they are meant for, maps them onto the CMS lead schema, forwards
//! them to the CMS and keeps an audit trail of every exchange.
//!
//! # Example
//!
//! ```no_run
//! use lead_relay::{run, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     cms_api_url: "https://cms.example.com/api/leads".to_string(),
//!     cms_api_key: "secret".to_string(),
//!     ..Default::default()
//! };
//!
//! run(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod config;
pub mod error_handling;
pub mod forward;
pub mod initialization;
pub mod lead;
pub mod pipeline;
pub mod server;
pub mod storage;

// Re-export public API
pub use config::{Config, IntakeFormat, IntakeProfile, LogFormat, LogLevel};
pub use error_handling::{LeadError, OutcomeType, ProcessingStats};
pub use pipeline::{process_lead, LeadOutcome, PipelineContext};
pub use server::{build_router, serve, AppState};

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::forward::CmsForwarder;
use crate::initialization::init_client;
use crate::storage::{init_db_pool_with_path, run_migrations};

/// Opens the database, applies migrations and wires up the pipeline.
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated, or if the HTTP client
/// or CMS credential cannot be set up.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let pool = init_db_pool_with_path(&config.db_path)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let client = init_client().context("Failed to initialize HTTP client")?;
    let forwarder =
        CmsForwarder::new(client, config).context("Failed to initialize CMS forwarder")?;

    log::info!(
        "Forwarding leads to {} (intake format: {}, region: {}, source: {})",
        forwarder.endpoint(),
        config.intake_format,
        config.region_field,
        config.source_label
    );

    Ok(AppState::new(PipelineContext {
        pool,
        forwarder,
        profile: config.intake_profile(),
        stats: Arc::new(ProcessingStats::new()),
    }))
}

/// Runs the lead server until Ctrl-C.
///
/// # Errors
///
/// Fails if the configuration is invalid, startup fails, or the listener
/// cannot be bound.
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;
    let state = build_state(&config).await?;

    let address = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind lead server to {}", address))?;

    let pool = Arc::clone(&state.pipeline.pool);
    serve(listener, state, server::shutdown_signal()).await?;

    if let Err(e) = sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
        .execute(pool.as_ref())
        .await
    {
        log::warn!(
            "Failed to checkpoint WAL file (this is non-critical): {}",
            e
        );
    }
    pool.close().await;

    Ok(())
}
