//! ClickHouse repository modules

pub mod stats;
