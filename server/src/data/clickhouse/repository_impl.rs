//! StatsRepository trait implementation for ClickHouse

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::traits::StatsRepository;
use crate::data::types::{QueryFilters, StatsResult};

use super::ClickhouseService;
use super::repositories::stats;

#[async_trait]
impl StatsRepository for Arc<ClickhouseService> {
    async fn get_website_stats(
        &self,
        site_id: &str,
        filters: &QueryFilters,
    ) -> Result<Vec<StatsResult>, DataError> {
        let query = stats::build_stats_query(site_id, filters)?;
        let row = stats::get_website_stats(self.client(), &query).await?;
        Ok(vec![row])
    }
}
