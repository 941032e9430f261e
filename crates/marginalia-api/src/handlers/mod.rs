//! Request handlers.

pub mod annotations;
pub mod translate;

use axum::response::{IntoResponse, Json};

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
