//! End-to-end anchoring pipeline tests: index, locate, materialize, and
//! re-render over a realistic page tree.

use chrono::Utc;

use marginalia_anchor::{
    build_index, find_content_root, locate, AnnotationSession, Document, HIGHLIGHT_CLASS,
};
use marginalia_core::Annotation;

fn annotation(id: i64, quote: &str, comment: &str) -> Annotation {
    Annotation {
        id,
        quote: quote.to_string(),
        comment: comment.to_string(),
        locator: "/essays/foxes".to_string(),
        created_at: Utc::now(),
    }
}

/// A page shaped like real article markup: nested inline elements, a
/// script tag, and a content container.
fn article_page() -> Document {
    let mut doc = Document::new();
    let body = doc.root();

    let script = doc.append_element(body, "script");
    doc.append_text(script, "window.analytics = {};");

    let container = doc.append_element(body, "div");
    doc.add_class(container, "container");

    let h1 = doc.append_element(container, "h1");
    doc.append_text(h1, "On Foxes");

    let p1 = doc.append_element(container, "p");
    doc.append_text(p1, "The quick ");
    let em = doc.append_element(p1, "em");
    doc.append_text(em, "brown");
    doc.append_text(p1, " fox jumps over the lazy dog.");

    let p2 = doc.append_element(container, "p");
    doc.append_text(p2, "Foxes are  famously  quick animals.");

    doc
}

#[test]
fn test_quote_spanning_inline_elements_is_highlighted() {
    let mut session = AnnotationSession::new(article_page());
    let report = session.load(vec![annotation(1, "quick brown fox", "spans the em")]);

    assert_eq!(report.applied, 1);
    assert!(report.missing.is_empty());

    let doc = session.document();
    let wrapped: String = doc
        .descendants(doc.root())
        .into_iter()
        .filter(|&id| doc.has_class(id, HIGHLIGHT_CLASS))
        .map(|id| doc.text_content(id))
        .collect();
    assert_eq!(wrapped, "quick brown fox");
}

#[test]
fn test_whitespace_drifted_quote_covers_original_spelling() {
    let doc = article_page();
    let root = find_content_root(&doc);
    let index = build_index(&doc, root);

    // Stored quote has single spaces; the page renders doubles.
    let range = locate(&index.text, "are famously quick").unwrap();
    assert_eq!(&index.text[range.start..range.end], "are  famously  quick");
}

#[test]
fn test_script_text_is_never_anchorable() {
    let mut session = AnnotationSession::new(article_page());
    let report = session.load(vec![annotation(1, "window.analytics", "from a script tag")]);
    assert_eq!(report.applied, 0);
    assert_eq!(report.missing, vec![1]);
}

#[test]
fn test_full_lifecycle_create_render_delete() {
    let mut session = AnnotationSession::new(article_page());
    session.load(vec![
        annotation(1, "On Foxes", "the title"),
        annotation(2, "lazy dog", "poor dog"),
    ]);
    assert_eq!(session.last_render().applied, 2);

    session.insert_annotation(annotation(3, "famously quick", "drifted"));
    assert_eq!(session.last_render().applied, 3);

    assert!(session.remove_annotation(2));
    assert_eq!(session.last_render().applied, 2);

    assert!(session.remove_annotation(1));
    assert!(session.remove_annotation(3));

    // With everything removed the tree carries no highlight containers
    // and the text reads as authored.
    let doc = session.document();
    let leftover = doc
        .descendants(doc.root())
        .into_iter()
        .filter(|&id| doc.has_class(id, HIGHLIGHT_CLASS))
        .count();
    assert_eq!(leftover, 0);
    assert!(doc
        .text_content(doc.root())
        .contains("The quick brown fox jumps over the lazy dog."));
}

#[test]
fn test_render_is_stable_across_repeated_passes() {
    let mut session = AnnotationSession::new(article_page());
    session.load(vec![
        annotation(1, "quick brown fox", "c1"),
        annotation(2, "famously  quick", "c2"),
    ]);
    let first = session.last_render().clone();

    for _ in 0..5 {
        session.render();
        assert_eq!(session.last_render(), &first);
    }
}
