//! Inline span formatting
//!
//! Recursive-descent parsing of inline markdown spans into text leaves
//! carrying marks. Precedence is fixed: inline code, then link, then
//! bold, then italic. The first match at a tier splits the input into
//! `before | matched | after`; `before` and `after` are reprocessed
//! independently and the matched interior is never re-entered for a
//! different mark, so marks do not nest inside one match. Unterminated
//! markers simply fail their tier and fall through to the next one,
//! degrading to literal text.
//!
//! The re-scan of both halves on every match is worst-case quadratic for
//! pathological inputs. Ticket text is tens of kilobytes at most and the
//! match order is observable in the output node sequence, so the
//! strategy stays as-is.

use crate::doc::{Mark, Node};
use once_cell::sync::Lazy;
use regex::Regex;

static CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());
static LINK_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]\n]*)\]\(([^)\n]*)\)").unwrap());
static BOLD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^\n]+?)\*\*").unwrap());
static ITALIC_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+?)\*").unwrap());

static STARTS_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*\*[^\n]+?\*\*").unwrap());
static STARTS_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*[^*\n]+?\*").unwrap());

/// Result of inline parsing: either the literal string (no formatting
/// found) or an ordered text-node sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Nodes(Vec<Node>),
}

impl Inline {
    /// Unwrap into a node sequence. A bare string becomes a single
    /// unmarked text leaf; an empty string becomes no nodes at all.
    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            Inline::Text(text) if text.is_empty() => Vec::new(),
            Inline::Text(text) => vec![Node::text(text)],
            Inline::Nodes(nodes) => nodes,
        }
    }
}

/// Parse one line of text (no embedded break) into inline content.
pub fn parse_inline(text: &str) -> Inline {
    if let Some(caps) = CODE_SPAN.captures(text) {
        let whole = caps.get(0).expect("match 0 always present");
        let node = Node::styled_text(&caps[1], vec![Mark::Code]);
        return split_around(text, whole.start(), whole.end(), node);
    }
    if let Some(caps) = LINK_SPAN.captures(text) {
        let whole = caps.get(0).expect("match 0 always present");
        let node = Node::styled_text(&caps[1], vec![Mark::link(&caps[2])]);
        return split_around(text, whole.start(), whole.end(), node);
    }
    if let Some(caps) = BOLD_SPAN.captures(text) {
        let whole = caps.get(0).expect("match 0 always present");
        let node = Node::styled_text(&caps[1], vec![Mark::Strong]);
        return split_around(text, whole.start(), whole.end(), node);
    }
    if let Some(caps) = ITALIC_SPAN.captures(text) {
        let whole = caps.get(0).expect("match 0 always present");
        let node = Node::styled_text(&caps[1], vec![Mark::Em]);
        return split_around(text, whole.start(), whole.end(), node);
    }

    Inline::Text(text.to_string())
}

/// Convenience wrapper: parse a line directly to its node sequence.
pub fn parse_inline_nodes(text: &str) -> Vec<Node> {
    parse_inline(text).into_nodes()
}

/// Does the line open with a bold or italic span? Such lines must become
/// their own paragraph so no text leaf ends up holding a line break.
pub fn starts_with_emphasis(line: &str) -> bool {
    STARTS_BOLD.is_match(line) || STARTS_ITALIC.is_match(line)
}

fn split_around(text: &str, start: usize, end: usize, matched: Node) -> Inline {
    let mut nodes = parse_inline(&text[..start]).into_nodes();
    nodes.push(matched);
    nodes.extend(parse_inline(&text[end..]).into_nodes());
    Inline::Nodes(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong(text: &str) -> Node {
        Node::styled_text(text, vec![Mark::Strong])
    }

    #[test]
    fn test_plain_text_stays_literal() {
        assert_eq!(
            parse_inline("nothing fancy here"),
            Inline::Text("nothing fancy here".to_string())
        );
    }

    #[test]
    fn test_bold_span_splits_three_ways() {
        assert_eq!(
            parse_inline_nodes("a**b**c"),
            vec![Node::text("a"), strong("b"), Node::text("c")]
        );
    }

    #[test]
    fn test_code_beats_bold() {
        // The bold markers sit inside the code span; code wins the tier.
        let nodes = parse_inline_nodes("run `cargo **test**` now");
        assert_eq!(
            nodes,
            vec![
                Node::text("run "),
                Node::styled_text("cargo **test**", vec![Mark::Code]),
                Node::text(" now"),
            ]
        );
    }

    #[test]
    fn test_link_span() {
        let nodes = parse_inline_nodes("see [docs](https://example.com) for more");
        assert_eq!(
            nodes,
            vec![
                Node::text("see "),
                Node::styled_text("docs", vec![Mark::link("https://example.com")]),
                Node::text(" for more"),
            ]
        );
    }

    #[test]
    fn test_italic_span() {
        assert_eq!(
            parse_inline_nodes("an *emphasized* word"),
            vec![
                Node::text("an "),
                Node::styled_text("emphasized", vec![Mark::Em]),
                Node::text(" word"),
            ]
        );
    }

    #[test]
    fn test_stray_double_asterisk_degrades_to_literal() {
        assert_eq!(
            parse_inline("broken ** marker"),
            Inline::Text("broken ** marker".to_string())
        );
    }

    #[test]
    fn test_sides_are_reprocessed_independently() {
        let nodes = parse_inline_nodes("*a* then **b**");
        assert_eq!(
            nodes,
            vec![
                Node::styled_text("a", vec![Mark::Em]),
                Node::text(" then "),
                strong("b"),
            ]
        );
    }

    #[test]
    fn test_matched_interior_is_not_reentered() {
        // The bold interior keeps its asterisk content literal.
        let nodes = parse_inline_nodes("**a *b* c**");
        assert_eq!(nodes, vec![strong("a *b* c")]);
    }

    #[test]
    fn test_starts_with_emphasis() {
        assert!(starts_with_emphasis("**Purpose:** x"));
        assert!(starts_with_emphasis("*note* y"));
        assert!(!starts_with_emphasis("plain line"));
        assert!(!starts_with_emphasis("** not closed"));
    }
}
