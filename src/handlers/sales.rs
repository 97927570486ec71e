// handlers/sales.rs - GET /airtable handler

use axum::extract::State;

use crate::error::ApiError;
use crate::middleware::response::DashboardResponse;
use crate::services::{SalesPayload, SalesService};
use crate::state::AppState;

/// GET /airtable - per-employee sales feed
///
/// Success: `{ "records": [...], "lastFetched": "<ISO timestamp>" }`.
/// An Airtable failure answers with Airtable's own status code.
pub async fn sales_get(State(state): State<AppState>) -> Result<DashboardResponse<SalesPayload>, ApiError> {
    let payload = SalesService::new(&state.config, state.source.as_ref()).load().await?;
    Ok(DashboardResponse::cached(payload, state.config.api.cache_max_age_secs))
}
