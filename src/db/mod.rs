//! Pool lifecycle and schema migrations.
//!
//! Every operation in the crate borrows the pool and acquires a connection
//! per call; the pool is the injected handle that stands in for any
//! process-global connection.

pub mod seed;

use crate::config::DatabaseConfig;
use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Opens a pool on the configured database, creating the file on first use.
///
/// In-memory databases are pinned to a single pooled connection with idle
/// reaping disabled: a `sqlite::memory:` store lives exactly as long as its
/// connection does.
pub async fn connect(cfg: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&cfg.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if cfg.is_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(cfg.max_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::debug!(url = %cfg.url, "database pool opened");
    Ok(pool)
}

/// Applies the embedded migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::debug!("database migrations applied");
    Ok(())
}

/// Closes the handle and opens a fresh one bound to the same configuration.
///
/// A file-backed store keeps its rows across the swap. An in-memory store
/// dies with its connection, so the fresh pool starts empty and needs
/// migrations again.
pub async fn reset(cfg: &DatabaseConfig, pool: SqlitePool) -> Result<SqlitePool> {
    pool.close().await;
    tracing::info!(url = %cfg.url, "database handle reset");
    connect(cfg).await
}
