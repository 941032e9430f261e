//! # marginalia-api
//!
//! HTTP API server for marginalia: annotation CRUD, the translation
//! passthrough, and static serving of the reader pages.
//!
//! The router is built against trait objects so tests can wire in the
//! in-memory repository and the mock translation backend.

use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use marginalia_core::{AnnotationRepository, TranslationProvider};

pub mod error;
pub mod handlers;

pub use error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub annotations: Arc<dyn AnnotationRepository>,
    pub translator: Arc<dyn TranslationProvider>,
}

impl AppState {
    pub fn new(
        annotations: Arc<dyn AnnotationRepository>,
        translator: Arc<dyn TranslationProvider>,
    ) -> Self {
        Self {
            annotations,
            translator,
        }
    }
}

/// Build the API router.
///
/// CORS is deliberately open: the annotation script is embedded on pages
/// served from arbitrary origins, and the API carries no credentials.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/annotations",
            get(handlers::annotations::list_annotations)
                .post(handlers::annotations::create_annotation),
        )
        .route(
            "/api/annotations/:id",
            axum::routing::delete(handlers::annotations::delete_annotation),
        )
        .route("/api/translate", post(handlers::translate::translate))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .with_state(state)
}
