//! Block-level markdown parsing
//!
//! Line-oriented state machine producing the top-level node sequence:
//! paragraphs, headings, bullet and ordered lists, and fenced code
//! blocks. Inline spans are delegated to [`super::inline`].
//!
//! The parser keeps three pieces of state: the open paragraph buffer,
//! the open code fence (language plus accumulated lines), and the
//! currently open list. A list stays open only while its items are
//! contiguous; as soon as any other node is emitted, a later marker line
//! starts a fresh list.

use super::inline::{parse_inline_nodes, starts_with_emphasis};
use crate::doc::Node;
use once_cell::sync::Lazy;
use regex::Regex;

/// Opening delimiter of a fenced code block.
const FENCE: &str = "```";

static HEADING_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6}) (.+)$").unwrap());

/// Bullet marker, a space, then content. The mandatory space means a
/// doubled marker (the `**` opening a bold span) can never match.
static BULLET_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+] (.+)$").unwrap());

static NUMBER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\. (.+)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Ordered,
}

#[derive(Debug)]
struct OpenFence {
    language: Option<String>,
    lines: Vec<String>,
}

#[derive(Debug, Default)]
struct BlockParser {
    nodes: Vec<Node>,
    paragraph: Vec<String>,
    open_list: Option<ListKind>,
    fence: Option<OpenFence>,
}

/// Parse normalized multi-line text into a top-level node sequence.
pub fn parse_blocks(text: &str) -> Vec<Node> {
    let mut parser = BlockParser::default();
    for line in text.lines() {
        parser.feed(line);
    }
    parser.finish()
}

impl BlockParser {
    fn feed(&mut self, line: &str) {
        if self.fence.is_some() {
            if line.starts_with(FENCE) {
                let fence = self.fence.take().expect("fence is open");
                self.emit(Node::code_block(fence.language, fence.lines.join("\n")));
            } else if let Some(fence) = self.fence.as_mut() {
                fence.lines.push(line.to_string());
            }
            return;
        }

        if let Some(info) = line.strip_prefix(FENCE) {
            self.flush_paragraph();
            let info = info.trim();
            self.fence = Some(OpenFence {
                language: (!info.is_empty()).then(|| info.to_string()),
                lines: Vec::new(),
            });
            return;
        }

        if let Some(caps) = HEADING_LINE.captures(line) {
            self.flush_paragraph();
            let level = caps[1].len() as u8;
            self.emit(Node::heading(level, parse_inline_nodes(&caps[2])));
            return;
        }

        if let Some(caps) = BULLET_LINE.captures(line) {
            self.push_list_item(ListKind::Bullet, &caps[1]);
            return;
        }

        if let Some(caps) = NUMBER_LINE.captures(line) {
            self.push_list_item(ListKind::Ordered, &caps[1]);
            return;
        }

        if line.trim().is_empty() {
            self.flush_paragraph();
            return;
        }

        // A line opening with a bold or italic span becomes its own
        // paragraph. Buffered lines would otherwise be joined into one
        // text leaf, and the remote renderer cannot take a break inside
        // a leaf.
        if starts_with_emphasis(line.trim_start()) {
            self.flush_paragraph();
            self.paragraph.push(line.trim().to_string());
            self.flush_paragraph();
            return;
        }

        self.paragraph.push(line.trim().to_string());
    }

    fn finish(mut self) -> Vec<Node> {
        // Input ended mid-fence: flush the open code block as-is.
        if let Some(fence) = self.fence.take() {
            self.emit(Node::code_block(fence.language, fence.lines.join("\n")));
        }
        self.flush_paragraph();
        self.nodes
    }

    /// Join the buffered lines with a single space (never a break) and
    /// emit them as one paragraph.
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.join(" ");
        self.paragraph.clear();
        self.emit(Node::paragraph(parse_inline_nodes(&text)));
    }

    /// Emit a non-list node; any open list is no longer extendable.
    fn emit(&mut self, node: Node) {
        self.open_list = None;
        self.nodes.push(node);
    }

    fn push_list_item(&mut self, kind: ListKind, text: &str) {
        self.flush_paragraph();
        let item = Node::list_item(vec![Node::paragraph(parse_inline_nodes(text))]);

        if self.open_list == Some(kind) {
            if let Some(Node::BulletList { content } | Node::OrderedList { content }) =
                self.nodes.last_mut()
            {
                content.push(item);
                return;
            }
        }

        let list = match kind {
            ListKind::Bullet => Node::bullet_list(vec![item]),
            ListKind::Ordered => Node::ordered_list(vec![item]),
        };
        self.nodes.push(list);
        self.open_list = Some(kind);
    }
}
