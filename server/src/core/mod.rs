//! Core application infrastructure

pub mod cli;
pub mod config;
pub mod constants;

pub use crate::app::CoreApp;
pub use cli::{CliConfig, Commands};
pub use config::{AnalyticsBackend, AppConfig, DatabaseConfig};

// Re-export the service enum from data layer
pub use crate::data::AnalyticsService;
