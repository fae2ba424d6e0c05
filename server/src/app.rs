//! Core application

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::core::cli::{self, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME, APP_NAME_LOWER, ENV_LOG};
use crate::data::AnalyticsService;
use crate::data::filters::parse_query_filters;

pub struct CoreApp {
    pub config: AppConfig,
    pub analytics: AnalyticsService,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("{} starting", APP_NAME);

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let config = AppConfig::load(&cli_config)?;
        let analytics = AnalyticsService::init(&config.database)
            .await
            .with_context(|| format!("Failed to initialize {} backend", config.database.backend))?;
        let app = Self { config, analytics };

        let result = match command {
            Commands::Stats {
                site_id,
                start_date,
                end_date,
                filters,
            } => {
                app.print_stats(&site_id, start_date, end_date, filters.as_deref())
                    .await
            }
        };

        app.analytics.close().await;
        result
    }

    async fn print_stats(
        &self,
        site_id: &str,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        filters_json: Option<&str>,
    ) -> Result<()> {
        let filters = parse_query_filters(filters_json.unwrap_or_default(), start_date, end_date)?;
        let stats = match self.analytics.get_website_stats(site_id, &filters).await {
            Ok(stats) => stats,
            Err(e) => {
                if e.is_transient() {
                    tracing::warn!(
                        backend = e.backend(),
                        "Stats backend unavailable, retry may succeed"
                    );
                }
                return Err(anyhow::Error::from(e)
                    .context(format!("Failed to query stats for site {}", site_id)));
            }
        };

        println!("{}", serde_json::to_string_pretty(&stats)?);
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}
