//! SQL abstraction layer for multi-database support
//!
//! This module provides abstractions for generating SQL that works across
//! the database backends (SQLite, PostgreSQL, ClickHouse), plus the ordered
//! parameter collector shared by every statement builder.

mod clickhouse_dialect;
mod dialect;
mod params;
mod postgres_dialect;
mod sqlite_dialect;

pub use clickhouse_dialect::ClickhouseDialect;
pub use dialect::SqlDialect;
pub use params::{BoundQuery, SqlParams, SqlValue};
pub use postgres_dialect::PostgresDialect;
pub use sqlite_dialect::SqliteDialect;

/// Database driver identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Sqlite,
    Postgres,
    Clickhouse,
}

impl Driver {
    /// Get the SQL dialect for this driver
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Driver::Sqlite => &SqliteDialect,
            Driver::Postgres => &PostgresDialect,
            Driver::Clickhouse => &ClickhouseDialect,
        }
    }

    /// Get the driver name
    pub fn name(&self) -> &'static str {
        match self {
            Driver::Sqlite => "sqlite",
            Driver::Postgres => "postgres",
            Driver::Clickhouse => "clickhouse",
        }
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_dialect_names_match() {
        for driver in [Driver::Sqlite, Driver::Postgres, Driver::Clickhouse] {
            assert_eq!(driver.dialect().name(), driver.name());
        }
    }

    #[test]
    fn test_driver_display() {
        assert_eq!(Driver::Postgres.to_string(), "postgres");
    }
}
