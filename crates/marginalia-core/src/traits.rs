//! Core traits for marginalia abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Annotation, TranslationRequest, TranslationResponse};

// =============================================================================
// ANNOTATION STORE GATEWAY
// =============================================================================

/// Store gateway for annotation records, keyed by page locator.
///
/// The store owns the authoritative annotation list; any in-memory cache
/// on the rendering side is a read-through, append-on-write mirror.
#[async_trait]
pub trait AnnotationRepository: Send + Sync {
    /// List annotations for a locator, newest first, capped at
    /// [`crate::ANNOTATION_LIST_LIMIT`].
    async fn list(&self, locator: &str) -> Result<Vec<Annotation>>;

    /// Persist a new annotation and return its store-assigned id.
    ///
    /// Fails with [`crate::Error::Validation`] if quote, comment, or
    /// locator is empty.
    async fn create(&self, locator: &str, quote: &str, comment: &str) -> Result<i64>;

    /// Delete an annotation by id.
    ///
    /// Fails with [`crate::Error::AnnotationNotFound`] if the id does not
    /// exist. Callers that want idempotent semantics treat that error as
    /// success-equivalent.
    async fn delete(&self, id: i64) -> Result<()>;
}

// =============================================================================
// TRANSLATION PROVIDER
// =============================================================================

/// Upstream translation provider behind the passthrough endpoint.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate the request text. Upstream failures surface as
    /// [`crate::Error::Upstream`] with the provider's message attached.
    async fn translate(&self, req: &TranslationRequest) -> Result<TranslationResponse>;
}

// =============================================================================
// SELECTION/POPUP CONTROLLER (contract only)
// =============================================================================

/// UI-side controller contract. Implementations live outside the core:
/// they capture user text selections and display comment popups/tooltips.
pub trait SelectionController {
    /// Called when a user finalizes a comment for a selected quote.
    fn on_annotation_requested(&mut self, quote: &str, comment: &str);

    /// Called when the annotation list for the current page changes, so
    /// the controller can trigger a re-render.
    fn on_annotations_changed(&mut self, annotations: &[Annotation]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[derive(Default)]
    struct RecordingController {
        requested: Vec<(String, String)>,
        change_count: usize,
    }

    impl SelectionController for RecordingController {
        fn on_annotation_requested(&mut self, quote: &str, comment: &str) {
            self.requested.push((quote.to_string(), comment.to_string()));
        }

        fn on_annotations_changed(&mut self, annotations: &[Annotation]) {
            self.change_count = annotations.len();
        }
    }

    #[test]
    fn test_selection_controller_callbacks() {
        let mut controller = RecordingController::default();
        controller.on_annotation_requested("quick brown", "a fast fox");
        controller.on_annotations_changed(&[Annotation {
            id: 1,
            quote: "quick brown".to_string(),
            comment: "a fast fox".to_string(),
            locator: "/fox".to_string(),
            created_at: Utc::now(),
        }]);

        assert_eq!(controller.requested.len(), 1);
        assert_eq!(controller.requested[0].0, "quick brown");
        assert_eq!(controller.change_count, 1);
    }
}
