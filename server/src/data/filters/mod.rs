//! Stats filter system
//!
//! Turns a `QueryFilters` value into the pieces a stats statement needs: an
//! `AND ...` fragment, an optional session join, and bound parameters.
//! There is one column layout per backend.
//!
//! ## Usage
//!
//! ```no_run
//! use chrono::Utc;
//! use sitestats_server::data::filters::{ColumnLayout, parse_filters, parse_query_filters};
//! use sitestats_server::data::sql::Driver;
//!
//! let now = Utc::now();
//! let filters = parse_query_filters(r#"{"url": "/pricing"}"#, now, now).unwrap();
//! let parsed = parse_filters(
//!     Driver::Sqlite,
//!     ColumnLayout::Relational,
//!     "7f9a3c2e-0b7e-4a49-9d5a-5d3c1f0e2b11",
//!     &filters,
//! )
//! .unwrap();
//! assert!(parsed.filter_query.contains("url_path"));
//! ```

mod builder;
mod parser;

pub use builder::{ColumnLayout, ParsedFilters, escape_like_pattern, parse_filters};
pub use parser::parse_query_filters;
