//! Per-page annotation session.
//!
//! Owns the document and the annotation list for a single page view and
//! runs the render pipeline: clear existing highlights, rebuild the text
//! index, locate each stored quote, and materialize the matches. Every
//! mutation of the annotation list triggers a full re-render, so the
//! document never holds stale highlights.

use tracing::{debug, info, trace};

use marginalia_core::{Annotation, Error};

use crate::dom::Document;
use crate::highlight::{apply_highlight, clear_highlights};
use crate::index::{build_index, find_content_root};
use crate::locate::locate;

/// Outcome of a render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Annotations whose quote was found and highlighted.
    pub applied: usize,
    /// Ids of annotations whose quote could not be located.
    pub missing: Vec<i64>,
}

/// A document plus the annotations anchored into it.
#[derive(Debug)]
pub struct AnnotationSession {
    document: Document,
    annotations: Vec<Annotation>,
    last_render: RenderReport,
}

impl AnnotationSession {
    /// Start a session over a document with no annotations yet.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            annotations: Vec::new(),
            last_render: RenderReport::default(),
        }
    }

    /// Replace the annotation list and re-render.
    pub fn load(&mut self, annotations: Vec<Annotation>) -> &RenderReport {
        self.annotations = annotations;
        self.render()
    }

    /// Append a newly created annotation and re-render.
    pub fn insert_annotation(&mut self, annotation: Annotation) -> &RenderReport {
        self.annotations.push(annotation);
        self.render()
    }

    /// Drop an annotation by id and re-render. Returns `false` when no
    /// annotation with that id was loaded.
    pub fn remove_annotation(&mut self, id: i64) -> bool {
        let before = self.annotations.len();
        self.annotations.retain(|a| a.id != id);
        let removed = self.annotations.len() != before;
        if removed {
            self.render();
        }
        removed
    }

    /// Clear all highlights and re-anchor every loaded annotation.
    ///
    /// The text index is rebuilt before each annotation is located, so a
    /// quote wrapped by an earlier annotation in the same pass is no
    /// longer visible to later ones. Annotations are processed in list
    /// order (creation order as stored).
    pub fn render(&mut self) -> &RenderReport {
        let cleared = clear_highlights(&mut self.document);
        trace!(
            subsystem = "anchor",
            component = "session",
            op = "render",
            cleared,
            "Cleared previous highlights"
        );

        let root = find_content_root(&self.document);
        let mut report = RenderReport::default();
        for annotation in &self.annotations {
            let index = build_index(&self.document, root);
            let anchored = locate(&index.text, &annotation.quote)
                .map(|range| {
                    apply_highlight(
                        &mut self.document,
                        &index,
                        &range,
                        annotation.id,
                        &annotation.comment,
                    )
                })
                .unwrap_or(false);
            if anchored {
                report.applied += 1;
            } else {
                let err = Error::AnchorNotFound(annotation.quote.clone());
                debug!(
                    subsystem = "anchor",
                    component = "session",
                    op = "render",
                    annotation_id = annotation.id,
                    error = %err,
                    "Quote could not be anchored"
                );
                report.missing.push(annotation.id);
            }
        }

        info!(
            subsystem = "anchor",
            component = "session",
            op = "render",
            annotation_count = self.annotations.len(),
            applied = report.applied,
            missing = report.missing.len(),
            "Render pass complete"
        );
        self.last_render = report;
        &self.last_render
    }

    /// The annotations currently loaded, in creation order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The document in its current (highlighted) state.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Outcome of the most recent render pass.
    pub fn last_render(&self) -> &RenderReport {
        &self.last_render
    }
}
