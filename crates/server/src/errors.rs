use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use tracing::error;

/// JSON error response: `{"error": "...", "detail": "..."}`.
/// `detail` is omitted when there is nothing to add.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub detail: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, error: error.into(), detail }
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error, None)
    }

    pub fn bad_request(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, Some(detail.into()))
    }

    /// Storage and other unexpected failures.
    pub fn internal(err: &ServiceError) -> Self {
        error!(error = %err, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(err.to_string()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: &self.error, detail: self.detail.as_deref() };
        (self.status, Json(body)).into_response()
    }
}
