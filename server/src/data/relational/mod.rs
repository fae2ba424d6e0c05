//! Statement building shared by the relational backends (SQLite, PostgreSQL)

pub mod stats;
