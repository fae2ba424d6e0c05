use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::sql::Driver;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CLICKHOUSE_DEFAULT_DATABASE, CONFIG_FILE_NAME,
    POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS, POSTGRES_DEFAULT_MAX_CONNECTIONS,
    POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS,
};

// =============================================================================
// Analytics Backend Enum
// =============================================================================

/// Which store answers stats queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsBackend {
    /// SQLite or PostgreSQL, chosen by URL scheme
    #[default]
    Relational,
    /// ClickHouse
    Columnar,
}

impl fmt::Display for AnalyticsBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsBackend::Relational => write!(f, "relational"),
            AnalyticsBackend::Columnar => write!(f, "columnar"),
        }
    }
}

// =============================================================================
// File Configuration (JSON)
// =============================================================================

/// Relational database section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RelationalFileConfig {
    /// `sqlite:path.db` or `postgres://...` (or use SITESTATS_DATABASE_URL env var)
    pub url: Option<String>,
    /// Maximum number of connections in the pool (PostgreSQL, default: 10)
    pub max_connections: Option<u32>,
    /// Connection acquire timeout in seconds (PostgreSQL, default: 30)
    pub acquire_timeout_secs: Option<u64>,
    /// Statement timeout in seconds, 0 to disable (PostgreSQL, default: 60)
    pub statement_timeout_secs: Option<u64>,
}

/// ClickHouse configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ClickhouseFileConfig {
    /// ClickHouse connection URL (or use SITESTATS_CLICKHOUSE_URL env var)
    pub url: Option<String>,
    /// Database name (default: "umami")
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Query timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Enable LZ4 compression (default: true)
    pub compression: Option<bool>,
}

/// Database configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// Stats backend: relational (default) or columnar
    pub backend: Option<AnalyticsBackend>,
    pub relational: Option<RelationalFileConfig>,
    pub clickhouse: Option<ClickhouseFileConfig>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub database: Option<DatabaseFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Unknown top-level keys, usually typos
    fn unknown_fields(&self) -> Vec<String> {
        match &self.extra {
            serde_json::Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn warn_unknown_fields(&self) {
        let unknown = self.unknown_fields();
        if !unknown.is_empty() {
            tracing::warn!(
                fields = %unknown.join(", "),
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        let Some(database) = other.database else {
            return;
        };
        let current = self.database.get_or_insert_with(DatabaseFileConfig::default);

        if database.backend.is_some() {
            tracing::trace!(backend = ?database.backend, "Merging database.backend");
            current.backend = database.backend;
        }

        if let Some(rel) = database.relational {
            let cur = current
                .relational
                .get_or_insert_with(RelationalFileConfig::default);
            if rel.url.is_some() {
                tracing::trace!("Merging database.relational.url");
                cur.url = rel.url;
            }
            if rel.max_connections.is_some() {
                cur.max_connections = rel.max_connections;
            }
            if rel.acquire_timeout_secs.is_some() {
                cur.acquire_timeout_secs = rel.acquire_timeout_secs;
            }
            if rel.statement_timeout_secs.is_some() {
                cur.statement_timeout_secs = rel.statement_timeout_secs;
            }
        }

        if let Some(ch) = database.clickhouse {
            let cur = current
                .clickhouse
                .get_or_insert_with(ClickhouseFileConfig::default);
            if ch.url.is_some() {
                tracing::trace!("Merging database.clickhouse.url");
                cur.url = ch.url;
            }
            if ch.database.is_some() {
                cur.database = ch.database;
            }
            if ch.user.is_some() {
                cur.user = ch.user;
            }
            if ch.password.is_some() {
                cur.password = ch.password;
            }
            if ch.timeout_secs.is_some() {
                cur.timeout_secs = ch.timeout_secs;
            }
            if ch.compression.is_some() {
                cur.compression = ch.compression;
            }
        }
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Relational database configuration (SQLite or PostgreSQL)
#[derive(Debug, Clone, Default)]
pub struct RelationalConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub statement_timeout_secs: u64,
}

impl RelationalConfig {
    /// Driver implied by the URL scheme
    pub fn driver(&self) -> Option<Driver> {
        let url = self.url.as_str();
        if url.starts_with("sqlite:") {
            Some(Driver::Sqlite)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Driver::Postgres)
        } else {
            None
        }
    }
}

/// ClickHouse configuration
#[derive(Debug, Clone, Default)]
pub struct ClickhouseConfig {
    pub url: String,
    pub database: String,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Query timeout in seconds
    pub timeout_secs: u64,
    /// Enable LZ4 compression for requests/responses
    pub compression: bool,
}

/// Database configuration (final/runtime)
///
/// Only the section for the selected backend is populated.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub backend: AnalyticsBackend,
    pub relational: Option<RelationalConfig>,
    pub clickhouse: Option<ClickhouseConfig>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.sitestats/sitestats.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_home(path);
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let config = Self::from_layers(cli, file_config);
        config.validate()?;
        Ok(config)
    }

    /// Layer CLI/env values over file values over defaults
    fn from_layers(cli: &CliConfig, file_config: FileConfig) -> Self {
        let file_database = file_config.database.unwrap_or_default();
        let backend = cli.backend.or(file_database.backend).unwrap_or_default();

        let relational = if backend == AnalyticsBackend::Relational {
            let file_rel = file_database.relational.unwrap_or_default();
            Some(RelationalConfig {
                url: cli.database_url.clone().or(file_rel.url).unwrap_or_default(),
                max_connections: file_rel
                    .max_connections
                    .unwrap_or(POSTGRES_DEFAULT_MAX_CONNECTIONS),
                acquire_timeout_secs: file_rel
                    .acquire_timeout_secs
                    .unwrap_or(POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS),
                statement_timeout_secs: file_rel
                    .statement_timeout_secs
                    .unwrap_or(POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS),
            })
        } else {
            None
        };

        let clickhouse = if backend == AnalyticsBackend::Columnar {
            let file_ch = file_database.clickhouse.unwrap_or_default();
            Some(ClickhouseConfig {
                url: cli.clickhouse_url.clone().or(file_ch.url).unwrap_or_default(),
                database: file_ch
                    .database
                    .unwrap_or_else(|| CLICKHOUSE_DEFAULT_DATABASE.to_string()),
                user: file_ch.user,
                password: file_ch.password,
                timeout_secs: file_ch.timeout_secs.unwrap_or(30),
                compression: file_ch.compression.unwrap_or(true),
            })
        } else {
            None
        };

        Self {
            database: DatabaseConfig {
                backend,
                relational,
                clickhouse,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        match self.database.backend {
            AnalyticsBackend::Relational => {
                let rel = self.database.relational.as_ref();
                if rel.is_none_or(|r| r.url.is_empty()) {
                    anyhow::bail!(
                        "Configuration error: database.relational.url is required when database.backend is 'relational'"
                    );
                }
                if let Some(rel) = rel
                    && rel.driver().is_none()
                {
                    anyhow::bail!(
                        "Configuration error: database.relational.url must start with 'sqlite:' or 'postgres://'"
                    );
                }
            }
            AnalyticsBackend::Columnar => {
                if self
                    .database
                    .clickhouse
                    .as_ref()
                    .is_none_or(|c| c.url.is_empty())
                {
                    anyhow::bail!(
                        "Configuration error: database.clickhouse.url is required when database.backend is 'columnar'"
                    );
                }
            }
        }
        Ok(())
    }
}

/// Get the profile config path (~/.sitestats/sitestats.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
