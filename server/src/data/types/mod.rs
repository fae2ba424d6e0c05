//! Shared data types for all database backends
//!
//! This module contains types that are used across the relational and columnar
//! backends to ensure consistent filter and result models.

mod enums;
mod filters;
mod stats;

// Re-export enum types
pub use enums::{EventType, FilterColumn, FilterOperator};

// Re-export filter types (query input)
pub use filters::{FilterValue, QueryFilters};

// Re-export stats types (query output)
pub use stats::StatsResult;
