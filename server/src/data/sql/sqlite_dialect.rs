//! SQLite SQL dialect implementation

use super::SqlDialect;

/// SQLite SQL dialect
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, index: usize) -> String {
        // Numbered so the same statement can reference a parameter out of order
        format!("?{}", index)
    }

    fn timestamp_diff_secs(&self, start: &str, end: &str) -> String {
        // SQLite timestamps are stored as microseconds
        format!("({} - {}) / 1000000", end, start)
    }

    fn like_escape(&self) -> &'static str {
        " ESCAPE '\\'"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = SqliteDialect;
        assert_eq!(dialect.placeholder(1), "?1");
        assert_eq!(dialect.placeholder(12), "?12");
    }

    #[test]
    fn test_uuid_and_timestamp_are_plain() {
        let dialect = SqliteDialect;
        assert_eq!(dialect.uuid_placeholder(2), "?2");
        assert_eq!(dialect.timestamp_placeholder(3), "?3");
    }

    #[test]
    fn test_timestamp_diff_secs() {
        let dialect = SqliteDialect;
        assert_eq!(
            dialect.timestamp_diff_secs("metrics.min_time", "metrics.max_time"),
            "(metrics.max_time - metrics.min_time) / 1000000"
        );
    }

    #[test]
    fn test_like_escape() {
        assert_eq!(SqliteDialect.like_escape(), " ESCAPE '\\'");
    }
}
