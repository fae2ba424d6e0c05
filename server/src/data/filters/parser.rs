//! Filter parsing
//!
//! Parses a JSON filter object into `QueryFilters` with validation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::core::constants::MAX_FILTER_JSON_SIZE;
use crate::data::error::DataError;
use crate::data::types::{EventType, FilterColumn, FilterValue, QueryFilters};

/// Key carrying an explicit event type in the filter object
const EVENT_TYPE_KEY: &str = "eventType";

/// Parse dimension filters from a JSON object
///
/// Keys must be known filter columns (`url`, `referrer`, `browser`, ...).
/// Values are either a bare string (equality) or `{"op": ..., "value": ...}`.
/// An `eventType` key is accepted and kept, although the stats query
/// replaces it. Empty input means no dimension filters.
pub fn parse_query_filters(
    json_str: &str,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<QueryFilters, DataError> {
    let mut filters = QueryFilters::new(start_date, end_date);

    if json_str.trim().is_empty() {
        return Ok(filters);
    }

    if json_str.len() > MAX_FILTER_JSON_SIZE {
        return Err(DataError::invalid_filter(format!(
            "Filter JSON exceeds maximum size of {} bytes",
            MAX_FILTER_JSON_SIZE
        )));
    }

    let mut object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json_str)
        .map_err(|e| DataError::invalid_filter(format!("Invalid filter JSON: {}", e)))?;

    if let Some(raw) = object.remove(EVENT_TYPE_KEY) {
        let event_type: EventType = serde_json::from_value(raw)
            .map_err(|e| DataError::invalid_filter(format!("Invalid eventType: {}", e)))?;
        filters.event_type = Some(event_type);
    }

    let dimensions: BTreeMap<FilterColumn, FilterValue> =
        serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|e| DataError::invalid_filter(e.to_string()))?;

    tracing::trace!(count = dimensions.len(), "Parsed dimension filters");
    filters.dimensions = dimensions;
    Ok(filters)
}
