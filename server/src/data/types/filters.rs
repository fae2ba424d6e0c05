//! Stats query filters

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{EventType, FilterColumn, FilterOperator};

/// A single dimension filter: operator plus value
///
/// Deserializes from either a bare string (equality) or
/// `{"op": "c", "value": "/blog"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFilterValue")]
pub struct FilterValue {
    pub op: FilterOperator,
    pub value: String,
}

impl FilterValue {
    pub fn new(op: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            op,
            value: value.into(),
        }
    }

    pub fn eq(value: impl Into<String>) -> Self {
        Self::new(FilterOperator::Eq, value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFilterValue {
    Bare(String),
    Full {
        #[serde(default)]
        op: FilterOperator,
        value: String,
    },
}

impl From<RawFilterValue> for FilterValue {
    fn from(raw: RawFilterValue) -> Self {
        match raw {
            RawFilterValue::Bare(value) => Self::eq(value),
            RawFilterValue::Full { op, value } => Self { op, value },
        }
    }
}

/// Filters for a single stats query
///
/// The date range is inclusive on both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFilters {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub event_type: Option<EventType>,
    pub dimensions: BTreeMap<FilterColumn, FilterValue>,
}

impl QueryFilters {
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            start_date,
            end_date,
            event_type: None,
            dimensions: BTreeMap::new(),
        }
    }

    pub fn with_filter(mut self, column: FilterColumn, value: FilterValue) -> Self {
        self.dimensions.insert(column, value);
        self
    }

    /// Replace the event type, discarding whatever the caller supplied
    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    /// True when any filter key only exists on raw event rows
    pub fn has_event_columns(&self) -> bool {
        self.dimensions.keys().any(FilterColumn::is_event_column)
    }

    /// True when any filter key lives on the session table
    pub fn has_session_columns(&self) -> bool {
        self.dimensions.keys().any(|c| !c.is_event_column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn range() -> QueryFilters {
        QueryFilters::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
        )
    }

    #[test]
    fn test_filter_value_bare_string() {
        let v: FilterValue = serde_json::from_str(r#""/pricing""#).unwrap();
        assert_eq!(v, FilterValue::eq("/pricing"));
    }

    #[test]
    fn test_filter_value_object() {
        let v: FilterValue = serde_json::from_str(r#"{"op": "c", "value": "blog"}"#).unwrap();
        assert_eq!(v.op, FilterOperator::Contains);
        assert_eq!(v.value, "blog");

        let v: FilterValue = serde_json::from_str(r#"{"value": "x"}"#).unwrap();
        assert_eq!(v.op, FilterOperator::Eq);
    }

    #[test]
    fn test_with_event_type_overrides() {
        let filters = range()
            .with_event_type(EventType::CustomEvent)
            .with_event_type(EventType::PageView);
        assert_eq!(filters.event_type, Some(EventType::PageView));
    }

    #[test]
    fn test_column_classification() {
        let none = range();
        assert!(!none.has_event_columns());
        assert!(!none.has_session_columns());

        let session_only = range().with_filter(FilterColumn::Country, FilterValue::eq("DE"));
        assert!(!session_only.has_event_columns());
        assert!(session_only.has_session_columns());

        let mixed = session_only.with_filter(FilterColumn::Url, FilterValue::eq("/"));
        assert!(mixed.has_event_columns());
    }
}
