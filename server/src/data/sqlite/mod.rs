//! SQLite database service
//!
//! Relational backend for small and embedded deployments. The database is
//! owned by the tracking pipeline; this service only reads from it, so no
//! migrations run here.

pub mod error;
pub mod repositories;
mod repository_impl;
pub mod schema;

pub use error::SqliteError;
pub use sqlx::SqlitePool;

use std::str::FromStr;
use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::log::LevelFilter;

use crate::core::constants::{SQLITE_BUSY_TIMEOUT_SECS, SQLITE_MAX_CONNECTIONS};

/// SQLite database service
///
/// Should be created once at startup and shared.
pub struct SqliteService {
    pool: SqlitePool,
}

impl SqliteService {
    /// Open a connection pool for a `sqlite:` URL
    pub async fn init(url: &str) -> Result<Self, SqliteError> {
        if !url.starts_with("sqlite:") {
            return Err(SqliteError::Config(format!(
                "SQLite URL must start with 'sqlite:', got '{}'",
                url
            )));
        }

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| SqliteError::Config(format!("Invalid SQLite URL: {}", e)))?
            .read_only(true)
            .busy_timeout(Duration::from_secs(SQLITE_BUSY_TIMEOUT_SECS))
            .log_statements(LevelFilter::Trace);

        let pool = SqlitePoolOptions::new()
            .max_connections(SQLITE_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        tracing::debug!(%url, "SqliteService initialized");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a SqliteService from an existing pool (primarily for testing)
    #[cfg(test)]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("SQLite pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_rejects_bad_url() {
        let err = SqliteService::init("postgres://localhost/db")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, SqliteError::Config(_)));
    }

    #[tokio::test]
    async fn test_from_pool_and_close() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let service = SqliteService::from_pool(pool);
        sqlx::query("SELECT 1").execute(service.pool()).await.unwrap();
        service.close().await;
        assert!(service.pool().is_closed());
    }
}
