use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::airtable::RecordSource;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::mapping::{map_sales, SalesRecord};

use super::fetched_at;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPayload {
    pub records: Vec<SalesRecord>,
    pub last_fetched: String,
}

/// Loads the per-employee sales feed from a single Airtable table.
pub struct SalesService<'a> {
    config: &'a AppConfig,
    source: &'a dyn RecordSource,
}

impl<'a> SalesService<'a> {
    pub fn new(config: &'a AppConfig, source: &'a dyn RecordSource) -> Self {
        Self { config, source }
    }

    /// Fetch every page of the sales table and map it.
    ///
    /// Upstream HTTP failures keep their status code.
    pub async fn load(&self) -> Result<SalesPayload, ApiError> {
        let Some(token) = self.config.airtable.token() else {
            warn!("sales feed requested without AIRTABLE_TOKEN");
            return Err(ApiError::missing_token());
        };

        let raw = self
            .source
            .list_records(token, &self.config.tables.sales)
            .await
            .map_err(ApiError::from_upstream)?;

        let records = map_sales(&raw);
        info!(fetched = raw.len(), kept = records.len(), "mapped sales feed");

        Ok(SalesPayload {
            records,
            last_fetched: fetched_at(),
        })
    }
}
