//! Arena-backed document tree.
//!
//! A minimal stand-in for the browser DOM: element and text nodes stored
//! in a flat arena addressed by stable [`NodeId`]s. Mutation (splitting
//! text nodes, splicing children) never invalidates ids of untouched
//! nodes, which is what lets the range materializer process segments in
//! reverse document order safely.

use std::collections::BTreeMap;

use marginalia_core::{Error, Result};

/// Stable handle to a node in a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        classes: Vec<String>,
        attrs: BTreeMap<String, String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A document tree with a single root element.
///
/// Detached nodes stay in the arena (their ids remain valid) but are no
/// longer reachable from the root and are skipped by traversal.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Create a document whose root is a `body` element.
    pub fn new() -> Self {
        Self::with_root("body")
    }

    /// Create a document with a root element of the given tag.
    pub fn with_root(tag: &str) -> Self {
        let root_node = Node {
            kind: NodeKind::Element {
                tag: tag.to_string(),
                classes: Vec::new(),
                attrs: BTreeMap::new(),
            },
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
        }
    }

    /// The root element id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Create a new detached element node.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node {
            kind: NodeKind::Element {
                tag: tag.to_string(),
                classes: Vec::new(),
                attrs: BTreeMap::new(),
            },
            parent: None,
            children: Vec::new(),
        })
    }

    /// Create a new detached text node.
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node {
            kind: NodeKind::Text(content.to_string()),
            parent: None,
            children: Vec::new(),
        })
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Create a text node and append it to `parent`.
    pub fn append_text(&mut self, parent: NodeId, content: &str) -> NodeId {
        let id = self.create_text(content);
        self.append_child(parent, id);
        id
    }

    /// Append an existing (detached) node to `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert an existing node into `parent`'s children at `index`.
    pub fn insert_child_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        let index = index.min(self.nodes[parent.0].children.len());
        self.nodes[parent.0].children.insert(index, child);
    }

    /// Remove a node from its parent's child list. The node stays in the
    /// arena; its id remains valid but it is no longer reachable.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// The parent of a node, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// The children of a node, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Position of `child` within `parent`'s child list.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.nodes[parent.0].children.iter().position(|&c| c == child)
    }

    /// Element tag, or `None` for text nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    /// Whether the node is a text node.
    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Text(_))
    }

    /// Text content of a text node, or `None` for elements.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Text(content) => Some(content),
            NodeKind::Element { .. } => None,
        }
    }

    /// Replace the content of a text node.
    pub fn set_text(&mut self, id: NodeId, content: &str) -> Result<()> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Text(existing) => {
                *existing = content.to_string();
                Ok(())
            }
            NodeKind::Element { .. } => Err(Error::Internal(
                "set_text called on an element node".to_string(),
            )),
        }
    }

    /// Add a class to an element (no-op on duplicates).
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let NodeKind::Element { classes, .. } = &mut self.nodes[id.0].kind {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        }
    }

    /// Whether an element carries the given class.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        match &self.nodes[id.0].kind {
            NodeKind::Element { classes, .. } => classes.iter().any(|c| c == class),
            NodeKind::Text(_) => false,
        }
    }

    /// Set an attribute on an element.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[id.0].kind {
            attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Read an attribute from an element.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attrs, .. } => attrs.get(name).map(|s| s.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// Split a text node at a byte offset, keeping `[0, at)` in place and
    /// returning a new text node holding `[at, len)` inserted immediately
    /// after it.
    ///
    /// Fails if the node is not a text node, the offset is out of range,
    /// or the offset is not on a char boundary.
    pub fn split_text(&mut self, id: NodeId, at: usize) -> Result<NodeId> {
        let content = match &self.nodes[id.0].kind {
            NodeKind::Text(content) => content.clone(),
            NodeKind::Element { .. } => {
                return Err(Error::Internal(
                    "split_text called on an element node".to_string(),
                ))
            }
        };
        if at > content.len() || !content.is_char_boundary(at) {
            return Err(Error::Internal(format!(
                "split offset {} invalid for text node of length {}",
                at,
                content.len()
            )));
        }
        let parent = self.nodes[id.0].parent.ok_or_else(|| {
            Error::Internal("split_text called on a detached text node".to_string())
        })?;

        let tail = content[at..].to_string();
        self.set_text(id, &content[..at])?;
        let tail_id = self.create_text(&tail);
        let index = self
            .child_index(parent, id)
            .ok_or_else(|| Error::Internal("text node missing from parent".to_string()))?;
        self.insert_child_at(parent, index + 1, tail_id);
        Ok(tail_id)
    }

    /// Pre-order (document order) traversal of the subtree rooted at `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            for &child in self.nodes[node.0].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Concatenated text of every text node under `id`, document order,
    /// with no exclusions. Equivalent to the DOM's `textContent`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(text) = self.text(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// Merge adjacent text-node siblings throughout the subtree at `id`,
    /// dropping empty text nodes. Equivalent to the DOM's `normalize()`.
    pub fn normalize(&mut self, id: NodeId) {
        let children = self.nodes[id.0].children.clone();

        let mut merged: Vec<NodeId> = Vec::with_capacity(children.len());
        for child in children {
            if let Some(text) = self.text(child).map(|t| t.to_string()) {
                if text.is_empty() {
                    self.nodes[child.0].parent = None;
                    continue;
                }
                if let Some(&prev) = merged.last() {
                    if self.is_text(prev) {
                        let combined = format!("{}{}", self.text(prev).unwrap_or(""), text);
                        // set_text on a known text node cannot fail
                        let _ = self.set_text(prev, &combined);
                        self.nodes[child.0].parent = None;
                        continue;
                    }
                }
            }
            merged.push(child);
        }
        self.nodes[id.0].children = merged;

        let remaining = self.nodes[id.0].children.clone();
        for child in remaining {
            if !self.is_text(child) {
                self.normalize(child);
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
