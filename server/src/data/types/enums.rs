//! Classification enums for website event data
//!
//! These enums are shared by every backend so filter keys and event types
//! resolve to the same columns and codes everywhere.

use serde::{Deserialize, Serialize};

// ============================================================================
// EVENT TYPE
// ============================================================================

/// Event type codes as stored in `website_event.event_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    #[default]
    PageView,
    CustomEvent,
}

impl EventType {
    pub fn code(&self) -> i64 {
        match self {
            Self::PageView => 1,
            Self::CustomEvent => 2,
        }
    }
}

// ============================================================================
// FILTER COLUMNS
// ============================================================================

/// Filter keys accepted in a stats query
///
/// Event columns only exist on raw `website_event` rows; session columns are
/// on `session` in the relational schema and denormalized onto events (and the
/// hourly rollup) in the columnar schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterColumn {
    // Event columns
    Url,
    Referrer,
    Title,
    Query,
    Event,
    Tag,
    Host,
    // Session columns
    Browser,
    Os,
    Device,
    Screen,
    Language,
    Country,
    Region,
    City,
}

impl FilterColumn {
    /// Keys that force the columnar backend onto raw event rows
    pub const EVENT_COLUMNS: &'static [FilterColumn] = &[
        Self::Url,
        Self::Referrer,
        Self::Title,
        Self::Query,
        Self::Event,
        Self::Tag,
        Self::Host,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Referrer => "referrer",
            Self::Title => "title",
            Self::Query => "query",
            Self::Event => "event",
            Self::Tag => "tag",
            Self::Host => "host",
            Self::Browser => "browser",
            Self::Os => "os",
            Self::Device => "device",
            Self::Screen => "screen",
            Self::Language => "language",
            Self::Country => "country",
            Self::Region => "region",
            Self::City => "city",
        }
    }

    /// Physical column name in the event/session tables
    pub fn db_column(&self) -> &'static str {
        match self {
            Self::Url => "url_path",
            Self::Referrer => "referrer_domain",
            Self::Title => "page_title",
            Self::Query => "url_query",
            Self::Event => "event_name",
            Self::Tag => "tag",
            Self::Host => "hostname",
            Self::Browser => "browser",
            Self::Os => "os",
            Self::Device => "device",
            Self::Screen => "screen",
            Self::Language => "language",
            Self::Country => "country",
            Self::Region => "region",
            Self::City => "city",
        }
    }

    pub fn is_event_column(&self) -> bool {
        Self::EVENT_COLUMNS.contains(self)
    }
}

// ============================================================================
// FILTER OPERATORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FilterOperator {
    #[default]
    #[serde(rename = "eq")]
    Eq,
    #[serde(rename = "neq")]
    Neq,
    #[serde(rename = "c")]
    Contains,
    #[serde(rename = "dnc")]
    DoesNotContain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_codes() {
        assert_eq!(EventType::PageView.code(), 1);
        assert_eq!(EventType::CustomEvent.code(), 2);
        assert_eq!(EventType::default(), EventType::PageView);
    }

    #[test]
    fn test_event_type_serde() {
        let t: EventType = serde_json::from_str(r#""customEvent""#).unwrap();
        assert_eq!(t, EventType::CustomEvent);
    }

    #[test]
    fn test_filter_column_partition() {
        assert!(FilterColumn::Url.is_event_column());
        assert!(FilterColumn::Event.is_event_column());
        assert!(!FilterColumn::Browser.is_event_column());
        assert!(!FilterColumn::City.is_event_column());
    }

    #[test]
    fn test_filter_column_names() {
        let c: FilterColumn = serde_json::from_str(r#""referrer""#).unwrap();
        assert_eq!(c, FilterColumn::Referrer);
        assert_eq!(c.as_str(), "referrer");
        assert_eq!(c.db_column(), "referrer_domain");
    }

    #[test]
    fn test_filter_operator_serde() {
        let op: FilterOperator = serde_json::from_str(r#""dnc""#).unwrap();
        assert_eq!(op, FilterOperator::DoesNotContain);
        assert!(serde_json::from_str::<FilterOperator>(r#""like""#).is_err());
    }
}
