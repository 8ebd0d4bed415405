//! Document tree definitions for ticket rich-text content
//!
//! The remote ticket tracker renders descriptions from a hierarchical
//! document model: a `doc` root owning an ordered sequence of typed block
//! nodes, with `text` leaves carrying inline style marks. This module
//! defines that tree together with its exact wire shape (serde field and
//! tag names match what the remote renderer consumes).
//!
//! Invariant: a `text` leaf that lives inside inline content (paragraphs,
//! headings, list items) never contains a line break. The remote renderer
//! treats the break as a block separator and produces corrupted output if
//! one leaks into a leaf. The normalizer and block parser uphold this by
//! forcing paragraph breaks around lines that open with a bold or italic
//! span. Code block literals are exempt: their text is a verbatim body
//! and may span lines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker value for a checked task item.
pub const TASK_STATE_DONE: &str = "DONE";

/// Link mark attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
}

/// An inline style annotation attached to a text leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Mark {
    Strong,
    Em,
    Code,
    Link {
        // Trees fetched from the remote occasionally omit the attrs;
        // rendering then falls back to a "#" href.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attrs: Option<LinkAttrs>,
    },
}

impl Mark {
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link {
            attrs: Some(LinkAttrs { href: href.into() }),
        }
    }
}

/// Heading attributes; `level` is clamped to 1..=6 at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

/// Code block attributes. The language tag is optional and omitted from
/// the wire format when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl CodeBlockAttrs {
    pub fn is_empty(&self) -> bool {
        self.language.is_none()
    }
}

/// Panel attributes. `panel_type` is an opaque label for the remote
/// renderer ("info", "success", "note", ...); it has no parsing effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelAttrs {
    #[serde(rename = "panelType")]
    pub panel_type: String,
}

/// Task item attributes; `state` is compared against [`TASK_STATE_DONE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItemAttrs {
    pub state: String,
}

/// A node in the document tree.
///
/// Container variants own an ordered child sequence (empty allowed);
/// `Text` is always a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Paragraph {
        #[serde(default)]
        content: Vec<Node>,
    },
    Heading {
        attrs: HeadingAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },
    BulletList {
        #[serde(default)]
        content: Vec<Node>,
    },
    OrderedList {
        #[serde(default)]
        content: Vec<Node>,
    },
    ListItem {
        #[serde(default)]
        content: Vec<Node>,
    },
    TaskList {
        #[serde(default)]
        content: Vec<Node>,
    },
    TaskItem {
        attrs: TaskItemAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },
    CodeBlock {
        #[serde(default, skip_serializing_if = "CodeBlockAttrs::is_empty")]
        attrs: CodeBlockAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },
    Panel {
        attrs: PanelAttrs,
        #[serde(default)]
        content: Vec<Node>,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
}

impl Node {
    /// A plain text leaf with no marks.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// A text leaf carrying the given marks.
    pub fn styled_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    pub fn paragraph(content: Vec<Node>) -> Self {
        Node::Paragraph { content }
    }

    /// A paragraph holding a single bold text leaf. Used for story and
    /// panel titles.
    pub fn bold_paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph {
            content: vec![Node::styled_text(text, vec![Mark::Strong])],
        }
    }

    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        Node::Heading {
            attrs: HeadingAttrs {
                level: level.clamp(1, 6),
            },
            content,
        }
    }

    pub fn bullet_list(items: Vec<Node>) -> Self {
        Node::BulletList { content: items }
    }

    pub fn ordered_list(items: Vec<Node>) -> Self {
        Node::OrderedList { content: items }
    }

    pub fn list_item(content: Vec<Node>) -> Self {
        Node::ListItem { content }
    }

    /// A code block holding one verbatim text leaf.
    pub fn code_block(language: Option<String>, body: impl Into<String>) -> Self {
        Node::CodeBlock {
            attrs: CodeBlockAttrs { language },
            content: vec![Node::text(body)],
        }
    }

    pub fn panel(panel_type: impl Into<String>, content: Vec<Node>) -> Self {
        Node::Panel {
            attrs: PanelAttrs {
                panel_type: panel_type.into(),
            },
            content,
        }
    }

    pub fn is_panel(&self) -> bool {
        matches!(self, Node::Panel { .. })
    }

    /// Child sequence of a container node; empty for text leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content }
            | Node::ListItem { content }
            | Node::TaskList { content }
            | Node::TaskItem { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Panel { content, .. } => content,
            Node::Text { .. } => &[],
        }
    }

    /// Concatenated text of every leaf under this node, marks ignored.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text { text, .. } => text.clone(),
            _ => self
                .children()
                .iter()
                .map(Node::plain_text)
                .collect::<Vec<_>>()
                .concat(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::BulletList { .. } => "bulletList",
            Node::OrderedList { .. } => "orderedList",
            Node::ListItem { .. } => "listItem",
            Node::TaskList { .. } => "taskList",
            Node::TaskItem { .. } => "taskItem",
            Node::CodeBlock { .. } => "codeBlock",
            Node::Panel { .. } => "panel",
            Node::Text { .. } => "text",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Text { text, marks } => write!(f, "text('{}', {} marks)", text, marks.len()),
            other => write!(f, "{}({} children)", other.kind(), other.children().len()),
        }
    }
}

/// The document root: the exact shape consumed by the remote ticket
/// tracker's content field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTree {
    pub version: u32,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub content: Vec<Node>,
}

impl DocumentTree {
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            version: 1,
            doc_type: "doc".to_string(),
            content,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for DocumentTree {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Display for DocumentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentTree(v{}, {} items)", self.version, self.content.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_node_wire_shape() {
        let node = Node::styled_text("done", vec![Mark::Strong]);
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({"type": "text", "text": "done", "marks": [{"type": "strong"}]})
        );
    }

    #[test]
    fn test_plain_text_omits_marks_field() {
        let value = serde_json::to_value(Node::text("plain")).unwrap();
        assert_eq!(value, json!({"type": "text", "text": "plain"}));
    }

    #[test]
    fn test_link_mark_carries_href() {
        let value = serde_json::to_value(Mark::link("https://example.com")).unwrap();
        assert_eq!(
            value,
            json!({"type": "link", "attrs": {"href": "https://example.com"}})
        );
    }

    #[test]
    fn test_code_block_without_language_omits_attrs() {
        let value = serde_json::to_value(Node::code_block(None, "let x = 1;")).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "codeBlock",
                "content": [{"type": "text", "text": "let x = 1;"}]
            })
        );
    }

    #[test]
    fn test_panel_wire_shape() {
        let panel = Node::panel("info", vec![Node::bold_paragraph("Implementation Details")]);
        let value = serde_json::to_value(&panel).unwrap();
        assert_eq!(value["type"], "panel");
        assert_eq!(value["attrs"]["panelType"], "info");
        assert_eq!(value["content"][0]["type"], "paragraph");
    }

    #[test]
    fn test_document_tree_roundtrip() {
        let tree = DocumentTree::new(vec![Node::paragraph(vec![Node::text("hello")])]);
        let json = tree.to_json().unwrap();
        assert!(json.contains("\"version\":1"));
        assert!(json.contains("\"type\":\"doc\""));
        assert_eq!(DocumentTree::from_json(&json).unwrap(), tree);
    }

    #[test]
    fn test_heading_level_clamped() {
        match Node::heading(9, vec![]) {
            Node::Heading { attrs, .. } => assert_eq!(attrs.level, 6),
            other => panic!("expected heading, got {}", other),
        }
    }

    #[test]
    fn test_plain_text_recurses_containers() {
        let node = Node::paragraph(vec![
            Node::text("a"),
            Node::styled_text("b", vec![Mark::Strong]),
            Node::text("c"),
        ]);
        assert_eq!(node.plain_text(), "abc");
    }
}
