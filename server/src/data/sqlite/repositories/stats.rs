//! Website stats execution for SQLite

use sqlx::SqlitePool;

use crate::data::sql::{BoundQuery, SqlValue};
use crate::data::sqlite::SqliteError;
use crate::data::types::StatsResult;

type StatsTuple = (i64, i64, i64, i64, i64, i64);

/// Run a relational stats statement and return its single row
///
/// Timestamps bind as microseconds since the epoch, matching the schema.
pub async fn fetch_website_stats(
    pool: &SqlitePool,
    query: &BoundQuery,
) -> Result<StatsResult, SqliteError> {
    let mut q = sqlx::query_as::<_, StatsTuple>(&query.sql);
    for value in &query.params.values {
        q = match value {
            SqlValue::Text(s) => q.bind(s.as_str()),
            SqlValue::Int(i) => q.bind(*i),
            SqlValue::Timestamp(ts) => q.bind(ts.timestamp_micros()),
        };
    }

    let (pageviews, visitors, visits, bounces, totaltime, conversions) = q.fetch_one(pool).await?;

    Ok(StatsResult {
        pageviews,
        visitors,
        visits,
        bounces,
        totaltime,
        conversions: Some(conversions),
    })
}
