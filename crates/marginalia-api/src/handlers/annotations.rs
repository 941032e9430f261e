//! Annotation CRUD handlers.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json};
use serde::Deserialize;
use tracing::{debug, info};

use marginalia_core::{CreateAnnotationRequest, Error};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListAnnotationsParams {
    pub locator: Option<String>,
}

/// GET /api/annotations?locator=...
///
/// Returns annotations for the locator, newest first, wrapped in a
/// `{"data": [...]}` envelope.
pub async fn list_annotations(
    State(state): State<AppState>,
    Query(params): Query<ListAnnotationsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let locator = params
        .locator
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("locator query parameter is required".to_string()))?;

    let annotations = state.annotations.list(&locator).await?;
    debug!(
        subsystem = "api",
        op = "list_annotations",
        locator = %locator,
        annotation_count = annotations.len(),
        "Listed annotations"
    );
    Ok(Json(serde_json::json!({ "data": annotations })))
}

/// POST /api/annotations
///
/// Persists a new annotation and returns `{"success": true, "id": n}`.
pub async fn create_annotation(
    State(state): State<AppState>,
    Json(req): Json<CreateAnnotationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let id = state
        .annotations
        .create(&req.locator, &req.quote, &req.comment)
        .await?;
    info!(
        subsystem = "api",
        op = "create_annotation",
        annotation_id = id,
        locator = %req.locator,
        "Annotation created"
    );
    Ok(Json(serde_json::json!({ "success": true, "id": id })))
}

/// DELETE /api/annotations/:id
///
/// Deleting an id that is already gone is success-equivalent, so retried
/// deletes and double-clicks do not surface errors to the client.
pub async fn delete_annotation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    match state.annotations.delete(id).await {
        Ok(()) => {
            info!(
                subsystem = "api",
                op = "delete_annotation",
                annotation_id = id,
                "Annotation deleted"
            );
        }
        Err(Error::AnnotationNotFound(_)) => {
            debug!(
                subsystem = "api",
                op = "delete_annotation",
                annotation_id = id,
                "Annotation already absent"
            );
        }
        Err(err) => return Err(err.into()),
    }
    Ok(Json(serde_json::json!({ "success": true })))
}
