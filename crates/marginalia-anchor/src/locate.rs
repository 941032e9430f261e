//! Fuzzy quote locator.
//!
//! Relocates a stored quote inside a document's concatenated text. Exact
//! byte search runs first; when the page has drifted in whitespace only
//! (reflow, template changes, minified markup), a whitespace-insensitive
//! pass matches against a collapsed form of both strings and translates
//! the hit back to exact offsets in the original text.

use tracing::{debug, trace};

use marginalia_core::MatchRange;

/// Find `quote` in `text`, returning its byte range in `text`.
///
/// Matching runs in two passes:
///
/// 1. Exact substring search. First occurrence wins.
/// 2. Whitespace-normalized search: every whitespace run in both strings
///    collapses to a single space (the quote is also trimmed), and a hit
///    in the collapsed text is walked back to original byte offsets in
///    lockstep, one collapsed character per step, with a whitespace run
///    consumed whole as a single step.
///
/// The returned range always slices `text` on char boundaries and covers
/// the original spelling of the quote, drifted whitespace included.
/// Returns `None` when the quote is empty, whitespace-only, or absent
/// under both passes.
pub fn locate(text: &str, quote: &str) -> Option<MatchRange> {
    if quote.trim().is_empty() {
        return None;
    }

    if let Some(pos) = text.find(quote) {
        trace!(
            subsystem = "anchor",
            component = "locator",
            start = pos,
            end = pos + quote.len(),
            "Exact match"
        );
        return Some(MatchRange::new(pos, pos + quote.len()));
    }

    let norm_text = collapse_whitespace(text);
    let norm_quote = collapse_whitespace(quote.trim());
    let pos = match norm_text.find(&norm_quote) {
        Some(pos) => pos,
        None => {
            debug!(
                subsystem = "anchor",
                component = "locator",
                quote_len = quote.len(),
                "Quote not found in document text"
            );
            return None;
        }
    };

    // One collapsed character corresponds to one step in the original:
    // a non-whitespace char, or an entire whitespace run.
    let steps_before = norm_text[..pos].chars().count();
    let steps_inside = norm_quote.chars().count();
    let start = advance(text, 0, steps_before)?;
    let end = advance(text, start, steps_inside)?;

    trace!(
        subsystem = "anchor",
        component = "locator",
        start,
        end,
        "Normalized match"
    );
    Some(MatchRange::new(start, end))
}

/// Collapse every whitespace run to a single ASCII space.
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Advance `steps` collapsed-character steps through `text` starting at
/// byte offset `from`, returning the resulting byte offset.
fn advance(text: &str, from: usize, steps: usize) -> Option<usize> {
    let mut pos = from;
    for _ in 0..steps {
        let rest = &text[pos..];
        let first = rest.chars().next()?;
        if first.is_whitespace() {
            pos += rest
                .chars()
                .take_while(|c| c.is_whitespace())
                .map(char::len_utf8)
                .sum::<usize>();
        } else {
            pos += first.len_utf8();
        }
    }
    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let text = "The quick brown fox jumps over the lazy dog";
        let range = locate(text, "brown fox").unwrap();
        assert_eq!(&text[range.start..range.end], "brown fox");
    }

    #[test]
    fn test_exact_match_first_occurrence_wins() {
        let text = "abc abc abc";
        let range = locate(text, "abc").unwrap();
        assert_eq!((range.start, range.end), (0, 3));
    }

    #[test]
    fn test_absent_quote_returns_none() {
        assert!(locate("The quick brown fox", "purple elephant").is_none());
    }

    #[test]
    fn test_empty_and_whitespace_quotes_return_none() {
        assert!(locate("some text", "").is_none());
        assert!(locate("some text", "   \n\t ").is_none());
    }

    #[test]
    fn test_whitespace_drift_double_space() {
        // Stored quote has one space, page now renders two.
        let text = "The quick  brown fox";
        let range = locate(text, "quick brown").unwrap();
        assert_eq!((range.start, range.end), (4, 16));
        assert_eq!(&text[range.start..range.end], "quick  brown");
    }

    #[test]
    fn test_whitespace_drift_newlines_and_tabs() {
        let text = "line one\n\t  line two";
        let range = locate(text, "one line").unwrap();
        assert_eq!(&text[range.start..range.end], "one\n\t  line");
    }

    #[test]
    fn test_quote_with_surrounding_whitespace_is_trimmed() {
        let text = "The quick brown fox";
        let range = locate(text, "  quick brown \n").unwrap();
        assert_eq!(&text[range.start..range.end], "quick brown");
    }

    #[test]
    fn test_quote_whitespace_collapsed_too() {
        // The stored quote itself drifted: runs on either side.
        let text = "alpha beta gamma";
        let range = locate(text, "alpha   beta").unwrap();
        assert_eq!(&text[range.start..range.end], "alpha beta");
    }

    #[test]
    fn test_match_at_text_start_after_leading_whitespace() {
        let text = "   hello world";
        let range = locate(text, "hello").unwrap();
        assert_eq!((range.start, range.end), (3, 8));
    }

    #[test]
    fn test_unicode_text_and_quote() {
        let text = "naïve  café culture";
        let range = locate(text, "naïve café").unwrap();
        assert_eq!(&text[range.start..range.end], "naïve  café");
    }

    #[test]
    fn test_range_excludes_trailing_whitespace_run() {
        let text = "word   tail";
        let range = locate(text, "word").unwrap();
        assert_eq!(&text[range.start..range.end], "word");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  b\n\tc"), "a b c");
        assert_eq!(collapse_whitespace("  x  "), " x ");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_advance_counts_whitespace_run_as_one_step() {
        let text = "ab  \ncd";
        // a, b, run, c
        assert_eq!(advance(text, 0, 4), Some(6));
    }

    #[test]
    fn test_advance_past_end_returns_none() {
        assert_eq!(advance("ab", 0, 3), None);
    }
}
