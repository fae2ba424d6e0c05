//! Repository traits for database backends
//!
//! Each backend (SQLite, PostgreSQL, ClickHouse) implements these traits with
//! its own statement and driver, so callers hold a trait object and never
//! branch on the backend themselves.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::{QueryFilters, StatsResult};

// ============================================================================
// Stats Repository Trait
// ============================================================================

/// Repository trait for website statistics
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Aggregate pageview, visit, bounce and time statistics for a site
    ///
    /// Always returns exactly one row. The event type in `filters` is
    /// replaced with pageview before querying.
    async fn get_website_stats(
        &self,
        site_id: &str,
        filters: &QueryFilters,
    ) -> Result<Vec<StatsResult>, DataError>;
}
