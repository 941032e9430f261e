//! Translation passthrough handler.

use axum::extract::State;
use axum::response::Json;
use tracing::debug;

use marginalia_core::{TranslationRequest, TranslationResponse};

use crate::error::ApiError;
use crate::AppState;

/// POST /api/translate
///
/// Validates the request locally, forwards it to the configured provider,
/// and relays the result unchanged.
pub async fn translate(
    State(state): State<AppState>,
    Json(req): Json<TranslationRequest>,
) -> Result<Json<TranslationResponse>, ApiError> {
    req.validate()?;

    let response = state.translator.translate(&req).await?;
    debug!(
        subsystem = "api",
        op = "translate",
        text_len = req.text.len(),
        target = %req.target,
        "Translation relayed"
    );
    Ok(Json(response))
}
