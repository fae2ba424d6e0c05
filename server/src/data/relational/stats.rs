//! Website stats statement for the relational backend
//!
//! One statement in four stages: the filtered event set, per-visit metrics,
//! the conversion count, and the final aggregate row.

use crate::core::constants::CONVERSION_EVENT_NAME;
use crate::data::error::DataError;
use crate::data::filters::{ColumnLayout, parse_filters};
use crate::data::sql::{BoundQuery, Driver};
use crate::data::types::{EventType, QueryFilters};

/// Build the stats statement for SQLite or PostgreSQL
///
/// The event type is always pageview, whatever the caller passed. Filters
/// apply to the event set before the pageview restriction, so the conversion
/// count sees every filtered event.
pub fn build_stats_query(
    driver: Driver,
    site_id: &str,
    filters: &QueryFilters,
) -> Result<BoundQuery, DataError> {
    if driver == Driver::Clickhouse {
        return Err(DataError::Config(
            "Relational stats query cannot target ClickHouse".to_string(),
        ));
    }

    let filters = filters.clone().with_event_type(EventType::PageView);
    let parsed = parse_filters(driver, ColumnLayout::Relational, site_id, &filters)?;
    let totaltime = driver
        .dialect()
        .timestamp_diff_secs("metrics.min_time", "metrics.max_time");

    let sql = format!(
        r#"WITH filtered_events AS (
    SELECT website_event.*
    FROM website_event
    {join_session}
    WHERE website_event.website_id = {website_id}
      AND website_event.created_at BETWEEN {start_date} AND {end_date}
    {filter_query}
),
metrics AS (
    SELECT
        filtered_events.session_id,
        filtered_events.visit_id,
        COUNT(*) AS c,
        MIN(filtered_events.created_at) AS min_time,
        MAX(filtered_events.created_at) AS max_time
    FROM filtered_events
    WHERE filtered_events.event_type = {event_type}
    GROUP BY filtered_events.session_id, filtered_events.visit_id
),
conversions AS (
    SELECT COUNT(DISTINCT filtered_events.event_id) AS conversions
    FROM filtered_events
    WHERE filtered_events.event_name = '{conversion_event}'
)
SELECT
    CAST(COALESCE(SUM(metrics.c), 0) AS BIGINT) AS pageviews,
    CAST(COUNT(DISTINCT metrics.session_id) AS BIGINT) AS visitors,
    CAST(COUNT(DISTINCT metrics.visit_id) AS BIGINT) AS visits,
    CAST(COALESCE(SUM(CASE WHEN metrics.c = 1 THEN 1 ELSE 0 END), 0) AS BIGINT) AS bounces,
    CAST(COALESCE(SUM({totaltime}), 0) AS BIGINT) AS totaltime,
    CAST(COALESCE((SELECT conversions.conversions FROM conversions), 0) AS BIGINT) AS conversions
FROM metrics"#,
        join_session = parsed.join_session,
        website_id = parsed.website_id,
        start_date = parsed.start_date,
        end_date = parsed.end_date,
        filter_query = parsed.filter_query,
        event_type = parsed.event_type,
        conversion_event = CONVERSION_EVENT_NAME,
        totaltime = totaltime,
    );

    Ok(BoundQuery {
        sql,
        params: parsed.params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sql::SqlValue;
    use crate::data::types::{FilterColumn, FilterValue};
    use chrono::{TimeZone, Utc};

    const SITE: &str = "7f9a3c2e-0b7e-4a49-9d5a-5d3c1f0e2b11";

    fn filters() -> QueryFilters {
        QueryFilters::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_postgres_statement_shape() {
        let query = build_stats_query(Driver::Postgres, SITE, &filters()).unwrap();

        assert!(query.sql.starts_with("WITH filtered_events AS ("));
        assert!(query.sql.contains("website_event.website_id = $1::uuid"));
        assert!(query.sql.contains("BETWEEN $2 AND $3"));
        assert!(query.sql.contains("filtered_events.event_type = $4"));
        assert!(query.sql.contains("event_name = 'alert_submit'"));
        assert!(query.sql.contains("EXTRACT(EPOCH FROM"));
        assert!(!query.sql.contains("INNER JOIN session"));
        assert_eq!(query.params.len(), 4);
    }

    #[test]
    fn test_event_type_forced_to_pageview() {
        let f = filters().with_event_type(EventType::CustomEvent);
        let query = build_stats_query(Driver::Sqlite, SITE, &f).unwrap();
        assert_eq!(query.params.values[3], SqlValue::Int(EventType::PageView.code()));
    }

    #[test]
    fn test_session_filter_joins_session() {
        let f = filters().with_filter(FilterColumn::City, FilterValue::eq("Berlin"));
        let query = build_stats_query(Driver::Sqlite, SITE, &f).unwrap();

        assert!(query.sql.contains("INNER JOIN session ON"));
        assert!(query.sql.contains("AND session.city = ?5"));
        assert_eq!(query.params.values[4], SqlValue::Text("Berlin".to_string()));
    }

    #[test]
    fn test_rejects_clickhouse_driver() {
        assert!(build_stats_query(Driver::Clickhouse, SITE, &filters()).is_err());
    }

    #[test]
    fn test_invalid_site_id() {
        let err = build_stats_query(Driver::Sqlite, "not-a-uuid", &filters()).unwrap_err();
        assert!(matches!(err, DataError::InvalidFilter(_)));
    }
}
