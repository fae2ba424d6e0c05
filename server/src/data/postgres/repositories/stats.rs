//! Website stats execution for PostgreSQL

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::sql::{BoundQuery, SqlValue};
use crate::data::types::StatsResult;

type StatsTuple = (i64, i64, i64, i64, i64, i64);

/// Run a relational stats statement and return its single row
///
/// Timestamps bind as `timestamptz`.
pub async fn fetch_website_stats(
    pool: &PgPool,
    query: &BoundQuery,
) -> Result<StatsResult, PostgresError> {
    let mut q = sqlx::query_as::<_, StatsTuple>(&query.sql);
    for value in &query.params.values {
        q = match value {
            SqlValue::Text(s) => q.bind(s.as_str()),
            SqlValue::Int(i) => q.bind(*i),
            SqlValue::Timestamp(ts) => q.bind(*ts),
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
