use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::AnalyticsBackend;
use super::constants::{ENV_BACKEND, ENV_CLICKHOUSE_URL, ENV_CONFIG, ENV_DATABASE_URL};

#[derive(Parser)]
#[command(name = "sitestats")]
#[command(version, about = "Website statistics over relational or columnar event stores", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    // Database options
    /// Statistics backend (relational or columnar)
    #[arg(long, global = true, env = ENV_BACKEND, value_parser = parse_analytics_backend)]
    pub backend: Option<AnalyticsBackend>,

    /// Relational database URL (sqlite:... or postgres://...)
    #[arg(long, global = true, env = ENV_DATABASE_URL)]
    pub database_url: Option<String>,

    /// ClickHouse connection URL (when using the columnar backend)
    #[arg(long, global = true, env = ENV_CLICKHOUSE_URL)]
    pub clickhouse_url: Option<String>,
}

fn parse_analytics_backend(s: &str) -> Result<AnalyticsBackend, String> {
    match s.to_lowercase().as_str() {
        "relational" | "postgres" | "postgresql" | "sqlite" => Ok(AnalyticsBackend::Relational),
        "columnar" | "clickhouse" => Ok(AnalyticsBackend::Columnar),
        _ => Err(format!(
            "Invalid backend '{}'. Valid options: relational, columnar",
            s
        )),
    }
}

/// Parse an RFC 3339 timestamp, or a bare date taken as midnight UTC
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| {
            format!(
                "Invalid date '{}'. Use RFC 3339 (2024-01-31T23:59:59Z) or YYYY-MM-DD",
                s
            )
        })
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Print aggregate stats for a website as JSON
    Stats {
        /// Website id (UUID)
        #[arg(long)]
        site_id: String,

        /// Start of the range (inclusive)
        #[arg(long, value_parser = parse_datetime)]
        start_date: DateTime<Utc>,

        /// End of the range (inclusive)
        #[arg(long, value_parser = parse_datetime)]
        end_date: DateTime<Utc>,

        /// Filter object, e.g. '{"url": "/pricing", "browser": {"op": "neq", "value": "safari"}}'
        #[arg(long)]
        filters: Option<String>,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub backend: Option<AnalyticsBackend>,
    pub database_url: Option<String>,
    pub clickhouse_url: Option<String>,
}

pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    let config = CliConfig {
        config: cli.config,
        backend: cli.backend,
        database_url: cli.database_url,
        clickhouse_url: cli.clickhouse_url,
    };
    (config, cli.command)
}
