//! ClickHouse SQL dialect implementation

use super::SqlDialect;

/// ClickHouse SQL dialect
pub struct ClickhouseDialect;

impl SqlDialect for ClickhouseDialect {
    fn name(&self) -> &'static str {
        "clickhouse"
    }

    fn placeholder(&self, _index: usize) -> String {
        // ClickHouse uses ? for positional parameters
        "?".to_string()
    }

    fn uuid_placeholder(&self, _index: usize) -> String {
        "toUUID(?)".to_string()
    }

    fn timestamp_placeholder(&self, _index: usize) -> String {
        "fromUnixTimestamp64Micro(?)".to_string()
    }

    fn timestamp_diff_secs(&self, start: &str, end: &str) -> String {
        format!("dateDiff('second', {}, {})", start, end)
    }
}
