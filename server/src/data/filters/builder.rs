//! SQL filter builder
//!
//! Builds the filter fragment, session join, and parameters for a stats
//! statement from `QueryFilters`.

use uuid::Uuid;

use crate::data::error::DataError;
use crate::data::sql::{Driver, SqlParams};
use crate::data::types::{FilterColumn, FilterOperator, FilterValue, QueryFilters};

/// Join added to the relational statement when a session column is filtered
const JOIN_SESSION: &str = "INNER JOIN session ON session.session_id = website_event.session_id AND session.website_id = website_event.website_id";

/// Where filter columns physically live for a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    /// Event columns on `website_event`, session columns on a joined `session`
    Relational,
    /// Everything denormalized onto the event (or rollup) table
    Columnar,
}

impl ColumnLayout {
    fn qualify(&self, column: FilterColumn) -> String {
        match self {
            Self::Relational if column.is_event_column() => {
                format!("website_event.{}", column.db_column())
            }
            Self::Relational => format!("session.{}", column.db_column()),
            Self::Columnar => column.db_column().to_string(),
        }
    }
}

/// Output of the filter parser
///
/// The placeholder fields are spliced into the statement template; all
/// values they refer to are in `params`.
#[derive(Debug, Clone)]
pub struct ParsedFilters {
    /// Zero or more `AND <condition>` lines
    pub filter_query: String,
    /// Session join clause, empty when no session column is filtered
    pub join_session: String,
    pub params: SqlParams,
    pub website_id: String,
    pub start_date: String,
    pub end_date: String,
    pub event_type: String,
}

/// Parse filters into SQL pieces for the given driver and column layout
///
/// Parameters are pushed in the order their placeholders appear in the stats
/// templates (site, start, end, event type, then dimension values), which
/// keeps positional dialects correct.
pub fn parse_filters(
    driver: Driver,
    layout: ColumnLayout,
    site_id: &str,
    filters: &QueryFilters,
) -> Result<ParsedFilters, DataError> {
    let site_uuid = Uuid::parse_str(site_id)
        .map_err(|e| DataError::invalid_filter(format!("Invalid site id '{}': {}", site_id, e)))?;

    if filters.start_date > filters.end_date {
        return Err(DataError::invalid_filter(format!(
            "Start date {} is after end date {}",
            filters.start_date, filters.end_date
        )));
    }

    let mut params = SqlParams::new(driver);
    let website_id = params.push_uuid(site_uuid.to_string());
    let start_date = params.push_timestamp(filters.start_date);
    let end_date = params.push_timestamp(filters.end_date);
    let event_type = params.push_int(filters.event_type.unwrap_or_default().code());

    let conditions: Vec<String> = filters
        .dimensions
        .iter()
        .map(|(column, value)| build_condition(&layout.qualify(*column), value, &mut params))
        .collect();

    let filter_query = conditions
        .iter()
        .map(|c| format!("AND {}", c))
        .collect::<Vec<_>>()
        .join("\n");

    let join_session = if layout == ColumnLayout::Relational && filters.has_session_columns() {
        JOIN_SESSION.to_string()
    } else {
        String::new()
    };

    Ok(ParsedFilters {
        filter_query,
        join_session,
        params,
        website_id,
        start_date,
        end_date,
        event_type,
    })
}

/// Build a single condition with its placeholder
fn build_condition(col: &str, filter: &FilterValue, params: &mut SqlParams) -> String {
    let escape = params.dialect().like_escape();
    match filter.op {
        FilterOperator::Eq => {
            let ph = params.push_text(filter.value.clone());
            format!("{} = {}", col, ph)
        }
        FilterOperator::Neq => {
            let ph = params.push_text(filter.value.clone());
            format!("{} != {}", col, ph)
        }
        FilterOperator::Contains => {
            let ph = params.push_text(format!("%{}%", escape_like_pattern(&filter.value)));
            format!("{} LIKE {}{}", col, ph, escape)
        }
        FilterOperator::DoesNotContain => {
            let ph = params.push_text(format!("%{}%", escape_like_pattern(&filter.value)));
            format!("{} NOT LIKE {}{}", col, ph, escape)
        }
    }
}

/// Escape SQL LIKE metacharacters (%, _, \) in user input
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sql::SqlValue;
    use crate::data::types::EventType;
    use chrono::{TimeZone, Utc};

    const SITE: &str = "7f9a3c2e-0b7e-4a49-9d5a-5d3c1f0e2b11";

    fn filters() -> QueryFilters {
        QueryFilters::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn base_params_in_template_order() {
        let f = filters().with_event_type(EventType::PageView);
        let parsed = parse_filters(Driver::Postgres, ColumnLayout::Relational, SITE, &f).unwrap();

        assert_eq!(parsed.website_id, "$1::uuid");
        assert_eq!(parsed.start_date, "$2");
        assert_eq!(parsed.end_date, "$3");
        assert_eq!(parsed.event_type, "$4");
        assert!(parsed.filter_query.is_empty());
        assert!(parsed.join_session.is_empty());
        assert_eq!(parsed.params.values[0], SqlValue::Text(SITE.to_string()));
        assert_eq!(parsed.params.values[3], SqlValue::Int(1));
    }

    #[test]
    fn event_column_relational() {
        let f = filters().with_filter(FilterColumn::Url, FilterValue::eq("/pricing"));
        let parsed = parse_filters(Driver::Sqlite, ColumnLayout::Relational, SITE, &f).unwrap();

        assert_eq!(parsed.filter_query, "AND website_event.url_path = ?5");
        assert!(parsed.join_session.is_empty());
        assert_eq!(
            parsed.params.values[4],
            SqlValue::Text("/pricing".to_string())
        );
    }

    #[test]
    fn session_column_adds_join() {
        let f = filters().with_filter(FilterColumn::Browser, FilterValue::eq("chrome"));
        let parsed = parse_filters(Driver::Postgres, ColumnLayout::Relational, SITE, &f).unwrap();

        assert_eq!(parsed.filter_query, "AND session.browser = $5");
        assert!(parsed.join_session.starts_with("INNER JOIN session"));
    }

    #[test]
    fn columnar_layout_never_joins() {
        let f = filters()
            .with_filter(FilterColumn::Country, FilterValue::eq("DE"))
            .with_filter(
                FilterColumn::Referrer,
                FilterValue::new(FilterOperator::Contains, "100%_off"),
            );
        let parsed = parse_filters(Driver::Clickhouse, ColumnLayout::Columnar, SITE, &f).unwrap();

        assert!(parsed.join_session.is_empty());
        // BTreeMap order: event columns before session columns
        assert_eq!(
            parsed.filter_query,
            "AND referrer_domain LIKE ?\nAND country = ?"
        );
        assert_eq!(
            parsed.params.values[4],
            SqlValue::Text("%100\\%\\_off%".to_string())
        );
        assert_eq!(parsed.params.len(), 6);
    }

    #[test]
    fn sqlite_like_uses_escape_clause() {
        let f = filters().with_filter(
            FilterColumn::Title,
            FilterValue::new(FilterOperator::DoesNotContain, "draft"),
        );
        let parsed = parse_filters(Driver::Sqlite, ColumnLayout::Relational, SITE, &f).unwrap();
        assert_eq!(
            parsed.filter_query,
            r"AND website_event.page_title NOT LIKE ?5 ESCAPE '\'"
        );
    }

    #[test]
    fn missing_event_type_defaults_to_pageview() {
        let parsed =
            parse_filters(Driver::Sqlite, ColumnLayout::Relational, SITE, &filters()).unwrap();
        assert_eq!(parsed.params.values[3], SqlValue::Int(1));
    }

    #[test]
    fn rejects_bad_site_id() {
        let err =
            parse_filters(Driver::Sqlite, ColumnLayout::Relational, "site-1", &filters()).unwrap_err();
        assert!(matches!(err, DataError::InvalidFilter(_)));
    }

    #[test]
    fn rejects_inverted_range() {
        let mut f = filters();
        std::mem::swap(&mut f.start_date, &mut f.end_date);
        assert!(parse_filters(Driver::Sqlite, ColumnLayout::Relational, SITE, &f).is_err());
    }

    #[test]
    fn escape_like_pattern_cases() {
        assert_eq!(escape_like_pattern("hello"), "hello");
        assert_eq!(escape_like_pattern("100%_\\test"), "100\\%\\_\\\\test");
        assert_eq!(escape_like_pattern(""), "");
    }
}
