//! # marginalia-anchor
//!
//! The fuzzy text-anchoring engine for marginalia.
//!
//! This crate provides:
//! - An arena-backed document tree standing in for the browser DOM
//! - A text index builder over the visible content of a document
//! - A fuzzy locator that relocates stored quotes despite whitespace drift
//! - A range materializer that paints and clears highlight containers
//! - An [`AnnotationSession`] tying the pipeline together per page view
//!
//! Everything here is pure and I/O-free: the locator and materializer
//! operate on explicit tree/offset structures, so they are fully portable
//! and independently testable outside a browser.
//!
//! ## Example
//!
//! ```
//! use marginalia_anchor::{AnnotationSession, Document};
//! use marginalia_core::Annotation;
//! use chrono::Utc;
//!
//! let mut doc = Document::new();
//! let body = doc.root();
//! let p = doc.append_element(body, "p");
//! doc.append_text(p, "The quick brown fox");
//!
//! let mut session = AnnotationSession::new(doc);
//! session.load(vec![Annotation {
//!     id: 1,
//!     quote: "quick brown".to_string(),
//!     comment: "a fast fox".to_string(),
//!     locator: "/fox".to_string(),
//!     created_at: Utc::now(),
//! }]);
//! assert_eq!(session.last_render().applied, 1);
//! ```

pub mod dom;
pub mod highlight;
pub mod index;
pub mod locate;
pub mod session;

// Re-export core types
pub use marginalia_core::{MatchRange, TextSegment};

// Re-export engine types
pub use dom::{Document, NodeId};
pub use highlight::{apply_highlight, clear_highlights, HIGHLIGHT_CLASS};
pub use index::{build_index, find_content_root, IndexedSegment, TextIndex};
pub use locate::locate;
pub use session::{AnnotationSession, RenderReport};
