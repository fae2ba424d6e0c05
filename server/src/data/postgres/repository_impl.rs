//! StatsRepository trait implementation for PostgreSQL

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::relational::stats::build_stats_query;
use crate::data::sql::Driver;
use crate::data::traits::StatsRepository;
use crate::data::types::{QueryFilters, StatsResult};

use super::PostgresService;
use super::repositories::stats;

#[async_trait]
impl StatsRepository for Arc<PostgresService> {
    async fn get_website_stats(
        &self,
        site_id: &str,
        filters: &QueryFilters,
    ) -> Result<Vec<StatsResult>, DataError> {
        let query = build_stats_query(Driver::Postgres, site_id, filters)?;
        let row = stats::fetch_website_stats(self.pool(), &query).await?;
        Ok(vec![row])
    }
}
