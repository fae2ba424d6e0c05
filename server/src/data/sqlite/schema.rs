//! SQLite schema definitions
//!
//! Tables read by the stats query. Timestamps are INTEGER microseconds since
//! the Unix epoch and UUIDs are TEXT.

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Sessions (one per visitor device)
-- =============================================================================
CREATE TABLE IF NOT EXISTS session (
    session_id TEXT PRIMARY KEY,
    website_id TEXT NOT NULL,
    browser TEXT,
    os TEXT,
    device TEXT,
    screen TEXT,
    language TEXT,
    country TEXT,
    region TEXT,
    city TEXT,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_session_website ON session(website_id);

-- =============================================================================
-- Website events (pageviews and custom events)
-- =============================================================================
CREATE TABLE IF NOT EXISTS website_event (
    event_id TEXT PRIMARY KEY,
    website_id TEXT NOT NULL,
    session_id TEXT NOT NULL,
    visit_id TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    url_path TEXT NOT NULL,
    url_query TEXT,
    referrer_domain TEXT,
    page_title TEXT,
    hostname TEXT,
    tag TEXT,
    event_type INTEGER NOT NULL DEFAULT 1,
    event_name TEXT
);

CREATE INDEX IF NOT EXISTS idx_website_event_website_created
    ON website_event(website_id, created_at);
CREATE INDEX IF NOT EXISTS idx_website_event_session ON website_event(session_id);
"#;
