//! Schema management.
//!
//! The dealer directory, contact directory and audit tables are created by the
//! SQL files under `migrations/`, applied in version order at startup. The
//! files are embedded at compile time, so the binary carries its own schema.

use anyhow::Context;
use sqlx::migrate::Migrator;
use sqlx::{Pool, Sqlite};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applies every pending embedded migration.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), anyhow::Error> {
    MIGRATOR
        .run(pool)
        .await
        .context("Failed to apply migrations")?;
    log::debug!("Schema up to date ({} migrations known)", MIGRATOR.iter().count());
    Ok(())
}
