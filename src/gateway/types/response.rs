//! API error and result plumbing.
//!
//! Failures go out as a JSON body `{"detail": "..."}` with the matching
//! status code; success payloads are returned unwrapped. Store error text
//! never reaches the client, it only goes to the log.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Success helper, mirrors [`ApiError::into_err`] on the failure side.
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }

    /// Log the underlying store failure and surface a generic 500.
    pub fn db_error(err: impl std::fmt::Display) -> Self {
        tracing::error!("store error: {err}");
        Self::internal("Internal server error")
    }

    /// Convenience for handler match arms.
    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Body of a successful `DELETE /delete_order`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
