//! Core data models for marginalia.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of annotations returned for a single locator.
pub const ANNOTATION_LIST_LIMIT: i64 = 100;

/// Maximum length (in characters) accepted by the translation passthrough.
pub const TRANSLATION_MAX_CHARS: usize = 2000;

/// A persisted annotation: a quote captured from page text plus the
/// visitor's comment.
///
/// Annotations are append-only from the client's perspective: they are
/// created and deleted, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Annotation {
    /// Store-assigned identifier, immutable and unique.
    pub id: i64,
    /// Exact text captured at selection time. Not normalized.
    pub quote: String,
    /// Free-text note attached to the quote. Non-empty at creation.
    pub comment: String,
    /// Logical page address (e.g. URL path) partitioning annotations.
    pub locator: String,
    /// Creation timestamp; retrieval is newest-first.
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a new annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnnotationRequest {
    pub quote: String,
    pub comment: String,
    pub locator: String,
}

impl CreateAnnotationRequest {
    /// Validate the request fields per the store contract: quote, comment,
    /// and locator must all be non-empty (after trimming).
    pub fn validate(&self) -> crate::Result<()> {
        if self.quote.trim().is_empty() {
            return Err(crate::Error::Validation(
                "quote must not be empty".to_string(),
            ));
        }
        if self.comment.trim().is_empty() {
            return Err(crate::Error::Validation(
                "comment must not be empty".to_string(),
            ));
        }
        if self.locator.trim().is_empty() {
            return Err(crate::Error::Validation(
                "locator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_source() -> String {
    "auto".to_string()
}

fn default_target() -> String {
    "zh".to_string()
}

/// Request body for the translation passthrough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate, at most [`TRANSLATION_MAX_CHARS`] characters.
    pub text: String,
    /// Source language code; "auto" lets the provider detect it.
    #[serde(default = "default_source")]
    pub source: String,
    /// Target language code.
    #[serde(default = "default_target")]
    pub target: String,
}

impl TranslationRequest {
    /// Validate the request: text must be non-empty and within the
    /// character limit.
    pub fn validate(&self) -> crate::Result<()> {
        if self.text.is_empty() {
            return Err(crate::Error::Validation("Text is required".to_string()));
        }
        if self.text.chars().count() > TRANSLATION_MAX_CHARS {
            return Err(crate::Error::Validation(format!(
                "Text exceeds {} character limit",
                TRANSLATION_MAX_CHARS
            )));
        }
        Ok(())
    }
}

/// Response from the translation passthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translation: String,
    pub source: String,
    pub target: String,
}

/// One text node's contribution to the concatenated document text.
///
/// Ephemeral: rebuilt on every render pass, never patched incrementally.
/// Offsets are byte positions into the virtual concatenation of all
/// in-scope text content at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    /// The text content of this segment.
    pub content: String,
    /// Start offset (inclusive) in the concatenated text.
    pub start: usize,
    /// End offset (exclusive) in the concatenated text.
    pub end: usize,
}

impl TextSegment {
    /// Whether this segment overlaps the half-open range `[start, end)`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && self.end > start
    }
}

/// A located quote's byte range in the *original* (non-whitespace-
/// normalized) concatenated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRange {
    /// Start offset, inclusive.
    pub start: usize,
    /// End offset, exclusive.
    pub end: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}
