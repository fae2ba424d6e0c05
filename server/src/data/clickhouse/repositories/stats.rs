//! Website stats repository (ClickHouse backend)
//!
//! Filters on event-only columns (url, referrer, title, ...) need raw
//! `website_event` rows. Everything else reads the hourly rollup, which
//! carries session columns but pre-sums views per session and visit.

use clickhouse::{Client, Row};
use serde::Deserialize;

use crate::core::constants::HOURLY_STATS_TABLE;
use crate::data::clickhouse::ClickhouseError;
use crate::data::error::DataError;
use crate::data::filters::{ColumnLayout, parse_filters};
use crate::data::sql::{BoundQuery, Driver, SqlValue};
use crate::data::types::{EventType, QueryFilters, StatsResult};

/// ClickHouse row for the stats aggregate
#[derive(Row, Deserialize)]
struct ChStatsRow {
    pageviews: u64,
    visitors: u64,
    visits: u64,
    bounces: u64,
    totaltime: i64,
}

/// Build the stats statement, choosing raw events or the hourly rollup
pub fn build_stats_query(site_id: &str, filters: &QueryFilters) -> Result<BoundQuery, DataError> {
    let use_raw_events = filters.has_event_columns();
    let filters = filters.clone().with_event_type(EventType::PageView);
    let parsed = parse_filters(Driver::Clickhouse, ColumnLayout::Columnar, site_id, &filters)?;

    let totaltime = Driver::Clickhouse
        .dialect()
        .timestamp_diff_secs("t.min_time", "t.max_time");

    let (source, views, min_time, max_time, bounces) = if use_raw_events {
        (
            "website_event".to_string(),
            "count(*)",
            "min(created_at)",
            "max(created_at)",
            "sum(if(t.c = 1, 1, 0))",
        )
    } else {
        (
            format!("{} AS website_event", HOURLY_STATS_TABLE),
            "sum(views)",
            "min(min_time)",
            "max(max_time)",
            "sumIf(1, t.c = 1)",
        )
    };

    let sql = format!(
        r#"SELECT
    toUInt64(sum(t.c)) AS pageviews,
    toUInt64(uniq(t.session_id)) AS visitors,
    toUInt64(uniq(t.visit_id)) AS visits,
    toUInt64({bounces}) AS bounces,
    toInt64(sum({totaltime})) AS totaltime
FROM (
    SELECT
        session_id,
        visit_id,
        {views} AS c,
        {min_time} AS min_time,
        {max_time} AS max_time
    FROM {source}
    WHERE website_id = {website_id}
      AND created_at BETWEEN {start_date} AND {end_date}
      AND event_type = {event_type}
    {filter_query}
    GROUP BY session_id, visit_id
) AS t"#,
        bounces = bounces,
        totaltime = totaltime,
        views = views,
        min_time = min_time,
        max_time = max_time,
        source = source,
        website_id = parsed.website_id,
        start_date = parsed.start_date,
        end_date = parsed.end_date,
        event_type = parsed.event_type,
        filter_query = parsed.filter_query,
    );

    Ok(BoundQuery {
        sql,
        params: parsed.params,
    })
}

/// Run the stats statement and return its single row
///
/// The columnar schema has no conversion count, so `conversions` is `None`.
pub async fn get_website_stats(
    client: &Client,
    query: &BoundQuery,
) -> Result<StatsResult, ClickhouseError> {
    let mut q = client.query(&query.sql);
    for value in &query.params.values {
        q = match value {
            SqlValue::Text(s) => q.bind(s.as_str()),
            SqlValue::Int(i) => q.bind(*i),
            SqlValue::Timestamp(ts) => q.bind(ts.timestamp_micros()),
        };
    }

    let row: ChStatsRow = q.fetch_one().await?;

    Ok(StatsResult {
        pageviews: row.pageviews as i64,
        visitors: row.visitors as i64,
        visits: row.visits as i64,
        bounces: row.bounces as i64,
        totaltime: row.totaltime,
        conversions: None,
    })
}
