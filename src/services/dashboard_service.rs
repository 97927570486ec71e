use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::airtable::RecordSource;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::mapping::fields::field_names;
use crate::mapping::{
    map_conversions, map_invoiced, map_overview, ConversionRecord, InvoicedRecord, OverviewRecord,
};

use super::fetched_at;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub overview: Vec<OverviewRecord>,
    pub invoiced: Vec<InvoicedRecord>,
    pub conversions: Vec<ConversionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_fields: Option<DebugFields>,
    pub last_fetched: String,
}

/// Field labels seen on the first record of each table, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugFields {
    pub overview: Vec<String>,
    pub invoiced: Vec<String>,
    pub conversions: Vec<String>,
}

/// Loads the monthly sales dashboard: three tables fetched side by side.
pub struct DashboardService<'a> {
    config: &'a AppConfig,
    source: &'a dyn RecordSource,
}

impl<'a> DashboardService<'a> {
    pub fn new(config: &'a AppConfig, source: &'a dyn RecordSource) -> Self {
        Self { config, source }
    }

    /// Fetch overview, invoiced and conversions concurrently and map them.
    ///
    /// The first failing table aborts the load and the other fetches are
    /// dropped; there is no partial payload. Upstream failures are reported
    /// as 500.
    pub async fn load(&self) -> Result<DashboardPayload, ApiError> {
        let Some(token) = self.config.airtable.token() else {
            warn!("sales dashboard requested without AIRTABLE_TOKEN");
            return Err(ApiError::missing_token());
        };

        let tables = &self.config.tables;
        let (overview_raw, invoiced_raw, conversions_raw) = tokio::try_join!(
            self.source.list_records(token, &tables.overview),
            self.source.list_records(token, &tables.invoiced),
            self.source.list_records(token, &tables.conversions),
        )
        .map_err(ApiError::from_upstream_as_internal)?;

        let debug_fields = self.config.api.include_debug_fields.then(|| DebugFields {
            overview: field_names(overview_raw.first().map(|r| &r.fields)),
            invoiced: field_names(invoiced_raw.first().map(|r| &r.fields)),
            conversions: field_names(conversions_raw.first().map(|r| &r.fields)),
        });

        let payload = DashboardPayload {
            overview: map_overview(&overview_raw),
            invoiced: map_invoiced(&invoiced_raw),
            conversions: map_conversions(&conversions_raw),
            debug_fields,
            last_fetched: fetched_at(),
        };

        info!(
            overview = payload.overview.len(),
            invoiced = payload.invoiced.len(),
            conversions = payload.conversions.len(),
            "mapped sales dashboard"
        );

        Ok(payload)
    }
}
