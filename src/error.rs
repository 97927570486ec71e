// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::airtable::AirtableError;
use crate::config::MISSING_TOKEN_MESSAGE;

/// HTTP API error. Every variant renders as `{ "error": <message> }`.
#[derive(Debug)]
pub enum ApiError {
    // 404 Not Found
    NotFound(String),

    // 500, raised before any outbound call
    Configuration(String),

    // Status mirrors the upstream response
    Upstream { status: u16, message: String },

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::Configuration(_) => 500,
            ApiError::Upstream { status, .. } => *status,
            ApiError::InternalServerError(_) => 500,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg) => msg,
            ApiError::Configuration(msg) => msg,
            ApiError::Upstream { message, .. } => message,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn missing_token() -> Self {
        ApiError::Configuration(MISSING_TOKEN_MESSAGE.to_string())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    /// Upstream failure with the upstream status passed through to the client.
    /// Non-HTTP failures (network, decoding) still map to 500.
    pub fn from_upstream(err: AirtableError) -> Self {
        match err {
            AirtableError::Upstream { status, body, .. } => {
                tracing::error!(status, "Airtable API error: {}", body);
                ApiError::Upstream {
                    status,
                    message: format!("Airtable API error: {}", body),
                }
            }
            other => Self::from_upstream_as_internal(other),
        }
    }

    /// Upstream failure reported as a plain 500 whatever the upstream said.
    pub fn from_upstream_as_internal(err: AirtableError) -> Self {
        tracing::error!("{}", err);
        ApiError::internal_server_error(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
