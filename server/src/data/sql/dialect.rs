//! SQL dialect trait for multi-database support
//!
//! This trait defines the interface for generating database-specific SQL syntax.

/// SQL dialect trait for generating database-specific SQL
///
/// Different databases have different syntax for:
/// - Parameter placeholders (?1 vs $1 vs ?)
/// - UUID and timestamp parameters
/// - Timestamp arithmetic
/// - LIKE escaping
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite: `?1`, `?2`, etc.
    /// - PostgreSQL: `$1`, `$2`, etc.
    /// - ClickHouse: always `?` (bound in order of appearance)
    fn placeholder(&self, index: usize) -> String;

    /// Placeholder for a UUID parameter bound as text
    ///
    /// - SQLite: plain placeholder (UUIDs are stored as TEXT)
    /// - PostgreSQL: `$1::uuid`
    /// - ClickHouse: `toUUID(?)`
    fn uuid_placeholder(&self, index: usize) -> String {
        self.placeholder(index)
    }

    /// Placeholder for a timestamp parameter
    ///
    /// - SQLite: plain placeholder (timestamps are INTEGER microseconds)
    /// - PostgreSQL: plain placeholder (bound as `timestamptz`)
    /// - ClickHouse: `fromUnixTimestamp64Micro(?)`
    fn timestamp_placeholder(&self, index: usize) -> String {
        self.placeholder(index)
    }

    /// Whole seconds elapsed between two timestamp expressions
    ///
    /// - SQLite: `(end - start) / 1000000`
    /// - PostgreSQL: `FLOOR(EXTRACT(EPOCH FROM (end - start)))`
    /// - ClickHouse: `dateDiff('second', start, end)`
    fn timestamp_diff_secs(&self, start: &str, end: &str) -> String;

    /// Suffix appended after a LIKE pattern placeholder
    ///
    /// SQLite has no default escape character, so it needs an explicit
    /// `ESCAPE '\'`. PostgreSQL and ClickHouse escape with backslash by default.
    fn like_escape(&self) -> &'static str {
        ""
    }
}
