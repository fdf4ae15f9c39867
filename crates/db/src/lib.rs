//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - The PostgreSQL ledger store
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::LedgerRepository;

use std::str::FromStr;
use std::time::Duration;

use rollcall_shared::config::DatabaseConfig;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while establishing connectivity.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The connection URL could not be parsed.
    #[error("invalid database url: {0}")]
    InvalidUrl(#[source] sqlx::Error),

    /// The pool could not connect.
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Connectivity was not established within the startup window.
    #[error("timed out connecting to database after {0:?}")]
    TimedOut(Duration),
}

/// Establishes a pooled connection to the database.
///
/// The whole attempt is bounded by `connect_timeout_secs`.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the connection fails, or the
/// startup window elapses.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, ConnectError> {
    let window = Duration::from_secs(config.connect_timeout_secs);

    let options = PgConnectOptions::from_str(&config.url)
        .map_err(ConnectError::InvalidUrl)?
        .statement_cache_capacity(config.statement_cache_capacity);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(window)
        .connect_with(options);

    let pool = tokio::time::timeout(window, pool)
        .await
        .map_err(|_| ConnectError::TimedOut(window))?
        .map_err(ConnectError::Connect)?;

    info!(
        max_connections = config.max_connections,
        statement_cache = config.statement_cache_capacity,
        "Database pool ready"
    );

    Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
}
