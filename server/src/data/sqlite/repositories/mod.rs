//! SQLite repository modules

pub mod stats;
