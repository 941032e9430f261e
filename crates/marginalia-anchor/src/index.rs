//! Text index builder.
//!
//! Walks the visible text of a document once per render pass, producing an
//! ordered, addressable concatenation of text segments with byte offsets.
//! The index is always rebuilt from scratch; page-sized content makes
//! incremental patching not worth its complexity.

use tracing::debug;

use marginalia_core::TextSegment;

use crate::dom::{Document, NodeId};
use crate::highlight::HIGHLIGHT_CLASS;

/// Class marking the primary content region, preferred as index root.
pub const CONTENT_CLASS: &str = "container";

/// Class carried by injected comment popups, excluded from indexing.
pub const POPUP_CLASS: &str = "annotation-popup";

/// Class carried by injected hover tooltips, excluded from indexing.
pub const TOOLTIP_CLASS: &str = "annotation-tooltip";

/// One text node in the index, with its byte range in the concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedSegment {
    /// The text node this segment came from.
    pub node: NodeId,
    /// Segment content (a copy of the node's text at index time).
    pub content: String,
    /// Start offset (inclusive) in the concatenated text.
    pub start: usize,
    /// End offset (exclusive) in the concatenated text.
    pub end: usize,
}

impl IndexedSegment {
    /// Whether this segment overlaps the half-open range `[start, end)`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && self.end > start
    }

    /// The DOM-agnostic view of this segment.
    pub fn as_segment(&self) -> TextSegment {
        TextSegment {
            content: self.content.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

/// The ordered text segments of a document plus their concatenation.
#[derive(Debug, Clone, Default)]
pub struct TextIndex {
    pub segments: Vec<IndexedSegment>,
    pub text: String,
}

/// Elements whose text is never rendered.
fn is_non_rendering(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "noscript")
}

/// Elements injected by the annotation system itself; their text must not
/// be re-indexed on subsequent passes.
fn is_annotation_artifact(doc: &Document, id: NodeId) -> bool {
    doc.has_class(id, HIGHLIGHT_CLASS)
        || doc.has_class(id, POPUP_CLASS)
        || doc.has_class(id, TOOLTIP_CLASS)
}

/// Pick the content container to index: the first element carrying the
/// primary-content class, else a `main` or `article` landmark, else the
/// document root.
pub fn find_content_root(doc: &Document) -> NodeId {
    let all = doc.descendants(doc.root());
    for preference in [
        None, // class-based match first
        Some("main"),
        Some("article"),
    ] {
        for &id in &all {
            match preference {
                None if doc.has_class(id, CONTENT_CLASS) => return id,
                Some(tag) if doc.tag(id) == Some(tag) => return id,
                _ => {}
            }
        }
    }
    doc.root()
}

/// Build the text index for the subtree rooted at `root`.
///
/// Traversal is strict document (depth-first, pre-order) order, visiting
/// text-bearing leaf nodes only. Non-rendering elements and previously
/// injected annotation artifacts are pruned, subtree and all.
pub fn build_index(doc: &Document, root: NodeId) -> TextIndex {
    let mut index = TextIndex::default();
    collect(doc, root, &mut index);
    debug!(
        subsystem = "anchor",
        component = "index",
        segment_count = index.segments.len(),
        text_len = index.text.len(),
        "Text index built"
    );
    index
}

fn collect(doc: &Document, id: NodeId, index: &mut TextIndex) {
    if let Some(content) = doc.text(id) {
        if !content.is_empty() {
            let start = index.text.len();
            index.text.push_str(content);
            index.segments.push(IndexedSegment {
                node: id,
                content: content.to_string(),
                start,
                end: index.text.len(),
            });
        }
        return;
    }

    if let Some(tag) = doc.tag(id) {
        if is_non_rendering(tag) || is_annotation_artifact(doc, id) {
            return;
        }
    }
    for &child in doc.children(id) {
        collect(doc, child, index);
    }
}
