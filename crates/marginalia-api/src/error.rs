//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// API-level error, mapped to an HTTP status and a `{"error": msg}` body.
#[derive(Debug)]
pub enum ApiError {
    Internal(marginalia_core::Error),
    NotFound(String),
    BadRequest(String),
    UpstreamFailed(String),
}

impl From<marginalia_core::Error> for ApiError {
    fn from(err: marginalia_core::Error) -> Self {
        match &err {
            marginalia_core::Error::Validation(msg) => ApiError::BadRequest(msg.clone()),
            marginalia_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            marginalia_core::Error::AnnotationNotFound(id) => {
                ApiError::NotFound(format!("Annotation {} not found", id))
            }
            marginalia_core::Error::AnchorNotFound(msg) => ApiError::NotFound(msg.clone()),
            marginalia_core::Error::Upstream(msg) => ApiError::UpstreamFailed(msg.clone()),
            _ => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::UpstreamFailed(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
