use axum::{
    http::{
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Successful dashboard payload: JSON body plus shared-cache headers.
#[derive(Debug)]
pub struct DashboardResponse<T: Serialize> {
    pub data: T,
    pub max_age_secs: u64,
    pub allow_any_origin: bool,
}

impl<T: Serialize> DashboardResponse<T> {
    /// 200 OK, cacheable by shared caches for `max_age_secs`.
    pub fn cached(data: T, max_age_secs: u64) -> Self {
        Self {
            data,
            max_age_secs,
            allow_any_origin: false,
        }
    }

    /// Add `Access-Control-Allow-Origin: *`.
    pub fn with_any_origin(mut self) -> Self {
        self.allow_any_origin = true;
        self
    }
}

impl<T: Serialize> IntoResponse for DashboardResponse<T> {
    fn into_response(self) -> Response {
        let body = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to serialize response data" })),
                )
                    .into_response();
            }
        };

        let mut response = (StatusCode::OK, Json(body)).into_response();
        let headers = response.headers_mut();
        if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", self.max_age_secs)) {
            headers.insert(CACHE_CONTROL, value);
        }
        if self.allow_any_origin {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        }
        response
    }
}
