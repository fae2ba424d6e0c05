//! PostgreSQL SQL dialect implementation

use super::SqlDialect;

/// PostgreSQL SQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn uuid_placeholder(&self, index: usize) -> String {
        format!("${}::uuid", index)
    }

    fn timestamp_diff_secs(&self, start: &str, end: &str) -> String {
        format!("FLOOR(EXTRACT(EPOCH FROM ({} - {})))", end, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = PostgresDialect;
        assert_eq!(dialect.placeholder(1), "$1");
        assert_eq!(dialect.placeholder(5), "$5");
    }

    #[test]
    fn test_uuid_placeholder() {
        let dialect = PostgresDialect;
        assert_eq!(dialect.uuid_placeholder(1), "$1::uuid");
        assert_eq!(dialect.timestamp_placeholder(2), "$2");
    }

    #[test]
    fn test_timestamp_diff_secs() {
        let dialect = PostgresDialect;
        assert_eq!(
            dialect.timestamp_diff_secs("metrics.min_time", "metrics.max_time"),
            "FLOOR(EXTRACT(EPOCH FROM (metrics.max_time - metrics.min_time)))"
        );
    }

    #[test]
    fn test_like_escape_default() {
        assert_eq!(PostgresDialect.like_escape(), "");
    }
}
