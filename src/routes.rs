use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::config::MISSING_TOKEN_MESSAGE;
use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;

/// Build the service router.
pub fn app(state: AppState) -> Router {
    let request_logging = state.config.api.enable_request_logging;

    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Dashboard feeds
        .route("/airtable", get(handlers::sales_get))
        .route("/sales-data", get(handlers::sales_data_get))
        .fallback(not_found)
        .with_state(state);

    if request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Dashboard Proxy",
            "version": version,
            "description": "Airtable backend-for-frontend for the sales dashboards",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "sales": "/airtable (per-employee sales feed)",
                "sales_data": "/sales-data (monthly overview, invoiced, conversions)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    if state.config.airtable.token().is_some() {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "airtable_token": "configured"
                }
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": MISSING_TOKEN_MESSAGE,
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "airtable_token": "missing"
                }
            })),
        )
    }
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("Not found: {}", uri.path()))
}
