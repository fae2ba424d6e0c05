//! Shared stats types for all database backends

use serde::Serialize;

/// Aggregate website statistics for one site and date range
///
/// `totaltime` is in whole seconds. `conversions` is only computed by the
/// relational backend and is left out of serialized output otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsResult {
    pub pageviews: i64,
    pub visitors: i64,
    pub visits: i64,
    pub bounces: i64,
    pub totaltime: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversions: Option<i64>,
}
