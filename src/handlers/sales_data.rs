// handlers/sales_data.rs - GET /sales-data handler

use axum::extract::State;

use crate::error::ApiError;
use crate::middleware::response::DashboardResponse;
use crate::services::{DashboardPayload, DashboardService};
use crate::state::AppState;

/// GET /sales-data - monthly overview, invoiced sales and conversions
///
/// Success: `{ "overview": [...], "invoiced": [...], "conversions": [...],
/// "lastFetched": "..." }`, readable from any origin. Any Airtable failure
/// answers 500.
pub async fn sales_data_get(
    State(state): State<AppState>,
) -> Result<DashboardResponse<DashboardPayload>, ApiError> {
    let payload = DashboardService::new(&state.config, state.source.as_ref()).load().await?;
    Ok(DashboardResponse::cached(payload, state.config.api.cache_max_age_secs).with_any_origin())
}
