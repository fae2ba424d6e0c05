//! Unified error type for data layer
//!
//! This module provides a unified error type that can represent errors from
//! all database backends (SQLite, PostgreSQL, ClickHouse) as well as filter
//! validation failures raised before any statement is executed.

use thiserror::Error;

/// Unified error type for data layer operations
///
/// This error type wraps backend-specific errors while preserving context
/// about which backend generated the error.
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error (relational backend)
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// PostgreSQL database error (relational backend)
    #[error("PostgreSQL error: {0}")]
    Postgres(sqlx::Error),

    /// ClickHouse database error (columnar backend)
    #[error("ClickHouse error: {0}")]
    Clickhouse(#[from] clickhouse::error::Error),

    /// Filters or site id rejected before querying
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend not available
    #[error("Backend {backend} is not available: {reason}")]
    BackendUnavailable {
        backend: &'static str,
        reason: String,
    },
}

impl DataError {
    /// Create an invalid filter error
    pub fn invalid_filter(msg: impl Into<String>) -> Self {
        Self::InvalidFilter(msg.into())
    }

    /// Create a backend unavailable error
    pub fn backend_unavailable(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            backend,
            reason: reason.into(),
        }
    }

    /// Check if this is a connection-related error that might be transient
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Sqlite(e) | Self::Postgres(e) => {
                matches!(
                    e,
                    sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
                )
            }
            Self::Clickhouse(e) => {
                let msg = e.to_string();
                msg.contains("connection") || msg.contains("timeout") || msg.contains("network")
            }
            Self::BackendUnavailable { .. } => true,
            Self::InvalidFilter(_) | Self::Config(_) => false,
        }
    }

    /// Get the backend name that generated this error
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
            Self::Clickhouse(_) => "clickhouse",
            Self::BackendUnavailable { backend, .. } => backend,
            Self::InvalidFilter(_) | Self::Config(_) => "unknown",
        }
    }
}

/// Convert from the SQLite service error type
impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        match e {
            crate::data::sqlite::SqliteError::Database(e) => Self::Sqlite(e),
            crate::data::sqlite::SqliteError::Config(msg) => Self::Config(msg),
        }
    }
}

/// Convert from the PostgreSQL service error type
impl From<crate::data::postgres::PostgresError> for DataError {
    fn from(e: crate::data::postgres::PostgresError) -> Self {
        match e {
            crate::data::postgres::PostgresError::Database(e) => Self::Postgres(e),
            crate::data::postgres::PostgresError::Config(msg) => Self::Config(msg),
        }
    }
}

/// Convert from the ClickHouse service error type
impl From<crate::data::clickhouse::ClickhouseError> for DataError {
    fn from(e: crate::data::clickhouse::ClickhouseError) -> Self {
        match e {
            crate::data::clickhouse::ClickhouseError::Database(e) => Self::Clickhouse(e),
            crate::data::clickhouse::ClickhouseError::Connection(msg) => {
                Self::backend_unavailable("clickhouse", msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_display() {
        let err = DataError::invalid_filter("start date after end date");
        assert_eq!(err.to_string(), "Invalid filter: start date after end date");
    }

    #[test]
    fn test_backend_unavailable_error_display() {
        let err = DataError::backend_unavailable("clickhouse", "connection refused");
        assert_eq!(
            err.to_string(),
            "Backend clickhouse is not available: connection refused"
        );
    }

    #[test]
    fn test_backend_method() {
        assert_eq!(
            DataError::Postgres(sqlx::Error::PoolTimedOut).backend(),
            "postgres"
        );
        assert_eq!(DataError::Sqlite(sqlx::Error::PoolClosed).backend(), "sqlite");
        assert_eq!(DataError::Config("x".into()).backend(), "unknown");
    }

    #[test]
    fn test_is_transient() {
        assert!(DataError::Sqlite(sqlx::Error::PoolTimedOut).is_transient());
        assert!(DataError::backend_unavailable("clickhouse", "down").is_transient());
        assert!(!DataError::Config("bad config".into()).is_transient());
        assert!(!DataError::invalid_filter("bad").is_transient());
        assert!(!DataError::Sqlite(sqlx::Error::RowNotFound).is_transient());
    }

    #[test]
    fn test_from_service_errors() {
        let err: DataError = crate::data::postgres::PostgresError::Config("no url".into()).into();
        assert!(matches!(err, DataError::Config(_)));

        let err: DataError =
            crate::data::clickhouse::ClickhouseError::Connection("refused".into()).into();
        assert_eq!(err.backend(), "clickhouse");
    }
}
