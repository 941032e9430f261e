//! Range materializer.
//!
//! Turns a located byte range into highlight containers wrapped around
//! the covered text, one container per overlapped text node, and undoes
//! the whole thing on the next render pass. Wrapping splits text nodes
//! at the range edges; clearing splices the wrapped text back and
//! re-merges adjacent text nodes.

use tracing::warn;

use marginalia_core::{Error, MatchRange, Result};

use crate::dom::{Document, NodeId};
use crate::index::TextIndex;

/// Class carried by every highlight container.
pub const HIGHLIGHT_CLASS: &str = "annotation-highlight";

/// Attribute holding the owning annotation's id.
pub const ANNOTATION_ID_ATTR: &str = "data-annotation-id";

/// Attribute holding the annotation's comment, for hover tooltips.
pub const COMMENT_ATTR: &str = "data-comment";

/// Wrap the text covered by `range` in highlight containers.
///
/// Each text node the range overlaps gets its covered portion isolated
/// (splitting the node at the range edges where needed) and wrapped in a
/// `span` carrying [`HIGHLIGHT_CLASS`] and the annotation's id and
/// comment as data attributes.
///
/// Segments are processed in reverse document order so splits never
/// disturb the offsets of segments still waiting their turn. Returns
/// `false` without mutating the document when the range is empty or
/// overlaps no segment.
pub fn apply_highlight(
    doc: &mut Document,
    index: &TextIndex,
    range: &MatchRange,
    annotation_id: i64,
    comment: &str,
) -> bool {
    if range.is_empty() {
        return false;
    }
    let overlapping: Vec<_> = index
        .segments
        .iter()
        .filter(|seg| seg.overlaps(range.start, range.end))
        .collect();
    if overlapping.is_empty() {
        return false;
    }

    for seg in overlapping.iter().rev() {
        let local_start = range.start.saturating_sub(seg.start);
        let local_end = range.end.min(seg.end) - seg.start;
        if local_start >= local_end {
            continue;
        }
        if let Err(err) = wrap_range(doc, seg.node, local_start, local_end, annotation_id, comment)
        {
            warn!(
                subsystem = "anchor",
                component = "materializer",
                annotation_id,
                error = %err,
                "Split-based wrap failed, extracting node into container"
            );
            if let Err(err) = wrap_by_extraction(doc, seg.node, annotation_id, comment) {
                warn!(
                    subsystem = "anchor",
                    component = "materializer",
                    annotation_id,
                    error = %err,
                    "Failed to wrap text segment"
                );
                return false;
            }
        }
    }
    true
}

/// Isolate `[start, end)` of a text node and wrap it in a container.
fn wrap_range(
    doc: &mut Document,
    node: NodeId,
    start: usize,
    end: usize,
    annotation_id: i64,
    comment: &str,
) -> Result<()> {
    let len = doc
        .text(node)
        .map(str::len)
        .ok_or_else(|| Error::Internal("highlight target is not a text node".to_string()))?;
    if end < len {
        doc.split_text(node, end)?;
    }
    let target = if start > 0 {
        doc.split_text(node, start)?
    } else {
        node
    };
    let parent = doc
        .parent(target)
        .ok_or_else(|| Error::Internal("highlight target has no parent".to_string()))?;
    let position = doc
        .child_index(parent, target)
        .ok_or_else(|| Error::Internal("highlight target missing from parent".to_string()))?;

    let container = doc.create_element("span");
    doc.add_class(container, HIGHLIGHT_CLASS);
    doc.set_attr(container, ANNOTATION_ID_ATTR, &annotation_id.to_string());
    doc.set_attr(container, COMMENT_ATTR, comment);
    doc.insert_child_at(parent, position, container);
    doc.append_child(container, target);
    Ok(())
}

/// Fallback when a sub-range cannot be isolated by splitting: extract the
/// whole node into a fresh container at its former position, preserving
/// its content. The covered text ends up highlighted at node granularity
/// rather than sub-range granularity.
fn wrap_by_extraction(
    doc: &mut Document,
    node: NodeId,
    annotation_id: i64,
    comment: &str,
) -> Result<()> {
    let parent = doc
        .parent(node)
        .ok_or_else(|| Error::Internal("highlight target has no parent".to_string()))?;
    let position = doc
        .child_index(parent, node)
        .ok_or_else(|| Error::Internal("highlight target missing from parent".to_string()))?;

    let container = doc.create_element("span");
    doc.add_class(container, HIGHLIGHT_CLASS);
    doc.set_attr(container, ANNOTATION_ID_ATTR, &annotation_id.to_string());
    doc.set_attr(container, COMMENT_ATTR, comment);
    doc.insert_child_at(parent, position, container);
    doc.append_child(container, node);
    Ok(())
}

/// Remove every highlight container from the document, splicing the
/// wrapped text back into its parent, then merge adjacent text nodes so
/// repeated render passes see the same tree shape. Returns the number of
/// containers removed.
pub fn clear_highlights(doc: &mut Document) -> usize {
    let containers: Vec<NodeId> = doc
        .descendants(doc.root())
        .into_iter()
        .filter(|&id| doc.has_class(id, HIGHLIGHT_CLASS))
        .collect();

    for &container in &containers {
        let parent = match doc.parent(container) {
            Some(parent) => parent,
            None => continue,
        };
        let mut position = match doc.child_index(parent, container) {
            Some(position) => position,
            None => continue,
        };
        let children: Vec<NodeId> = doc.children(container).to_vec();
        doc.detach(container);
        for child in children {
            doc.insert_child_at(parent, position, child);
            position += 1;
        }
    }

    let root = doc.root();
    doc.normalize(root);
    containers.len()
}
