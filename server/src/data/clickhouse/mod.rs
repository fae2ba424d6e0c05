//! ClickHouse analytics service
//!
//! Columnar backend for high-volume deployments. Reads raw `website_event`
//! rows or the hourly rollup, depending on the filters.

pub mod error;
pub mod repositories;
mod repository_impl;

pub use error::ClickhouseError;

use clickhouse::Client;

use crate::core::config::ClickhouseConfig;

/// ClickHouse analytics service
///
/// The clickhouse crate's Client pools HTTP connections internally, so one
/// service is shared for the life of the process.
pub struct ClickhouseService {
    client: Client,
    config: ClickhouseConfig,
}

impl ClickhouseService {
    /// Build the client and verify the server answers
    pub async fn init(config: &ClickhouseConfig) -> Result<Self, ClickhouseError> {
        let mut client = Client::default()
            .with_url(&config.url)
            .with_database(&config.database);

        if let Some(ref user) = config.user {
            client = client.with_user(user);
        }
        if let Some(ref password) = config.password {
            client = client.with_password(password);
        }

        if config.compression {
            client = client.with_compression(clickhouse::Compression::Lz4);
        }

        if config.timeout_secs > 0 {
            client = client.with_option("max_execution_time", config.timeout_secs.to_string());
        }

        let service = Self {
            client,
            config: config.clone(),
        };

        service.health_check().await.map_err(|e| {
            ClickhouseError::Connection(format!(
                "Failed to reach ClickHouse at {}: {}. Verify ClickHouse is running and accessible.",
                service.config.url, e
            ))
        })?;

        tracing::debug!(
            url = %config.url,
            database = %config.database,
            compression = %config.compression,
            "ClickhouseService initialized"
        );

        Ok(service)
    }

    /// Get the ClickHouse client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Health check - verify connection to ClickHouse
    pub async fn health_check(&self) -> Result<(), ClickhouseError> {
        self.client
            .query("SELECT 1")
            .execute()
            .await
            .map_err(ClickhouseError::from)
    }

    /// Close the service (HTTP connections are dropped with the client)
    pub async fn close(&self) {
        tracing::debug!("ClickHouse connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_unreachable_server() {
        let config = ClickhouseConfig {
            url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let err = ClickhouseService::init(&config).await.err().unwrap();
        assert!(matches!(err, ClickhouseError::Connection(_)));
    }
}
