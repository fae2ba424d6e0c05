//! Data storage layer
//!
//! Provides the stats query over both storage families:
//! - `sqlite` / `postgres` - Relational backend (normalized `session` + `website_event`)
//! - `clickhouse` - Columnar backend (denormalized events plus an hourly rollup)
//! - `relational` - Statement shared by the relational drivers
//! - `filters` - Filter parsing and SQL condition building
//! - `sql` - Dialects and ordered parameters
//! - `types` - Shared data types across all backends
//! - `traits` - Repository trait implemented by every backend
//! - `error` - Unified error type for all backends

pub mod clickhouse;
pub mod error;
pub mod filters;
pub mod postgres;
pub mod relational;
pub mod sql;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export backend-specific services
pub use clickhouse::ClickhouseService;
pub use postgres::PostgresService;
pub use sqlite::SqliteService;

pub use error::DataError;
pub use traits::StatsRepository;
pub use types::{QueryFilters, StatsResult};

use std::sync::Arc;

use crate::core::config::{AnalyticsBackend, DatabaseConfig, RelationalConfig};
use sql::Driver;
use types::FilterColumn;

/// Relational database service enum
///
/// Wraps the driver picked from the URL scheme (SQLite or PostgreSQL).
pub enum RelationalService {
    Sqlite(Arc<SqliteService>),
    Postgres(Arc<PostgresService>),
}

impl RelationalService {
    pub async fn init(config: &RelationalConfig) -> Result<Self, DataError> {
        match config.driver() {
            Some(Driver::Sqlite) => {
                let service = SqliteService::init(&config.url).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            Some(Driver::Postgres) => {
                let service = PostgresService::init(config).await?;
                Ok(Self::Postgres(Arc::new(service)))
            }
            Some(Driver::Clickhouse) | None => Err(DataError::Config(format!(
                "Unsupported relational database URL: {}",
                config.url
            ))),
        }
    }

    pub fn driver(&self) -> Driver {
        match self {
            Self::Sqlite(_) => Driver::Sqlite,
            Self::Postgres(_) => Driver::Postgres,
        }
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Postgres(p) => p.close().await,
        }
    }
}

/// Analytics service enum
///
/// Wraps the backend selected by configuration. The choice is made once at
/// init and every stats call dispatches on it.
pub enum AnalyticsService {
    /// SQLite or PostgreSQL
    Relational(RelationalService),
    /// ClickHouse
    Columnar(Arc<ClickhouseService>),
}

impl AnalyticsService {
    /// Initialize the analytics service based on configuration
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DataError> {
        match config.backend {
            AnalyticsBackend::Relational => {
                let rel = config.relational.as_ref().ok_or_else(|| {
                    DataError::Config("Relational database configuration required".to_string())
                })?;
                Ok(Self::Relational(RelationalService::init(rel).await?))
            }
            AnalyticsBackend::Columnar => {
                let ch = config.clickhouse.as_ref().ok_or_else(|| {
                    DataError::Config("ClickHouse configuration required".to_string())
                })?;
                let service = ClickhouseService::init(ch).await?;
                Ok(Self::Columnar(Arc::new(service)))
            }
        }
    }

    /// Get the backend type
    pub fn backend(&self) -> AnalyticsBackend {
        match self {
            Self::Relational(_) => AnalyticsBackend::Relational,
            Self::Columnar(_) => AnalyticsBackend::Columnar,
        }
    }

    /// Get the driver the stats statement is built for
    pub fn driver(&self) -> Driver {
        match self {
            Self::Relational(r) => r.driver(),
            Self::Columnar(_) => Driver::Clickhouse,
        }
    }

    /// Get the repository trait object for data operations
    pub fn repository(&self) -> Box<dyn StatsRepository + Send + Sync> {
        match self {
            Self::Relational(RelationalService::Sqlite(s)) => Box::new(Arc::clone(s)),
            Self::Relational(RelationalService::Postgres(p)) => Box::new(Arc::clone(p)),
            Self::Columnar(c) => Box::new(Arc::clone(c)),
        }
    }

    /// Aggregate stats for one site over the filtered range
    ///
    /// Returns exactly one row. `conversions` is only present on the
    /// relational backend.
    pub async fn get_website_stats(
        &self,
        site_id: &str,
        filters: &QueryFilters,
    ) -> Result<Vec<StatsResult>, DataError> {
        tracing::debug!(
            backend = %self.backend(),
            driver = %self.driver(),
            %site_id,
            filters = ?filters.dimensions.keys().map(FilterColumn::as_str).collect::<Vec<_>>(),
            "Querying website stats"
        );
        self.repository().get_website_stats(site_id, filters).await
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        match self {
            Self::Relational(r) => r.close().await,
            Self::Columnar(c) => c.close().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn sqlite_service() -> AnalyticsService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        AnalyticsService::Relational(RelationalService::Sqlite(Arc::new(
            SqliteService::from_pool(pool),
        )))
    }

    #[tokio::test]
    async fn test_dispatch_relational_sqlite() {
        let service = sqlite_service().await;
        assert_eq!(service.backend(), AnalyticsBackend::Relational);
        assert_eq!(service.driver(), Driver::Sqlite);

        let filters = QueryFilters::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
        );
        let rows = service
            .get_website_stats("7f9a3c2e-0b7e-4a49-9d5a-5d3c1f0e2b11", &filters)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].conversions.is_some());
        service.close().await;
    }

    #[tokio::test]
    async fn test_init_requires_backend_section() {
        let config = DatabaseConfig {
            backend: AnalyticsBackend::Columnar,
            relational: None,
            clickhouse: None,
        };
        let err = AnalyticsService::init(&config).await.err().unwrap();
        assert!(matches!(err, DataError::Config(_)));
    }

    #[tokio::test]
    async fn test_init_rejects_unknown_relational_scheme() {
        let config = DatabaseConfig {
            backend: AnalyticsBackend::Relational,
            relational: Some(RelationalConfig {
                url: "mysql://localhost/umami".to_string(),
                ..Default::default()
            }),
            clickhouse: None,
        };
        let err = AnalyticsService::init(&config).await.err().unwrap();
        assert!(matches!(err, DataError::Config(_)));
    }
}
