//! PostgreSQL repository modules

pub mod stats;
