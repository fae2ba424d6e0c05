// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "SiteStats";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "sitestats";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".sitestats";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "sitestats.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "SITESTATS_CONFIG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "SITESTATS_LOG";

// =============================================================================
// Environment Variables - Database
// =============================================================================

/// Environment variable for the statistics backend (relational or columnar)
pub const ENV_BACKEND: &str = "SITESTATS_BACKEND";

/// Environment variable for the relational database URL (sqlite: or postgres:)
pub const ENV_DATABASE_URL: &str = "SITESTATS_DATABASE_URL";

/// Environment variable for ClickHouse connection URL
pub const ENV_CLICKHOUSE_URL: &str = "SITESTATS_CLICKHOUSE_URL";

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// PostgreSQL Database
// =============================================================================

/// PostgreSQL default max connections
pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL default connection acquire timeout in seconds
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// PostgreSQL statement timeout in seconds (prevent runaway queries, 0 = disabled)
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// ClickHouse Database
// =============================================================================

/// ClickHouse default database name
pub const CLICKHOUSE_DEFAULT_DATABASE: &str = "umami";

// =============================================================================
// Event Model
// =============================================================================

/// Event name counted as a conversion by the relational stats query
pub const CONVERSION_EVENT_NAME: &str = "alert_submit";

/// Pre-aggregated hourly rollup table (columnar backend only)
pub const HOURLY_STATS_TABLE: &str = "website_event_stats_hourly";

// =============================================================================
// Filter Limits
// =============================================================================

/// Maximum size of filter JSON in bytes (64KB)
pub const MAX_FILTER_JSON_SIZE: usize = 64 * 1024;
