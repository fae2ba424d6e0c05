//! Ordered, typed query parameters

use chrono::{DateTime, Utc};

use super::{Driver, SqlDialect};

/// A bound parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i64),
    /// Bound as `timestamptz` on PostgreSQL, as microseconds elsewhere
    Timestamp(DateTime<Utc>),
}

/// Collects SQL parameters during query building (maintains insertion order)
///
/// Every `push_*` call appends one value and returns the placeholder to splice
/// into the statement. For positional dialects (ClickHouse) the caller must
/// push in the same order the placeholders appear in the final SQL.
#[derive(Debug, Clone)]
pub struct SqlParams {
    driver: Driver,
    pub values: Vec<SqlValue>,
}

impl SqlParams {
    pub fn new(driver: Driver) -> Self {
        Self {
            driver,
            values: Vec::new(),
        }
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    pub fn dialect(&self) -> &'static dyn SqlDialect {
        self.driver.dialect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push_text(&mut self, value: impl Into<String>) -> String {
        self.values.push(SqlValue::Text(value.into()));
        self.dialect().placeholder(self.values.len())
    }

    pub fn push_int(&mut self, value: i64) -> String {
        self.values.push(SqlValue::Int(value));
        self.dialect().placeholder(self.values.len())
    }

    pub fn push_uuid(&mut self, value: impl Into<String>) -> String {
        self.values.push(SqlValue::Text(value.into()));
        self.dialect().uuid_placeholder(self.values.len())
    }

    pub fn push_timestamp(&mut self, value: DateTime<Utc>) -> String {
        self.values.push(SqlValue::Timestamp(value));
        self.dialect().timestamp_placeholder(self.values.len())
    }
}

/// A finished statement together with its bound parameters
#[derive(Debug, Clone)]
pub struct BoundQuery {
    pub sql: String,
    pub params: SqlParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_postgres_numbering() {
        let mut params = SqlParams::new(Driver::Postgres);
        assert_eq!(params.push_uuid("abc"), "$1::uuid");
        assert_eq!(params.push_int(1), "$2");
        assert_eq!(params.push_text("x"), "$3");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_clickhouse_positional() {
        let mut params = SqlParams::new(Driver::Clickhouse);
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(params.push_timestamp(ts), "fromUnixTimestamp64Micro(?)");
        assert_eq!(params.push_text("x"), "?");
        assert_eq!(
            params.values,
            vec![SqlValue::Timestamp(ts), SqlValue::Text("x".to_string())]
        );
    }

    #[test]
    fn test_empty() {
        let params = SqlParams::new(Driver::Sqlite);
        assert!(params.is_empty());
        assert_eq!(params.driver(), Driver::Sqlite);
    }
}
