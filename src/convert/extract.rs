//! Reverse extraction: document tree → markdown
//!
//! Walks a tree fetched from the remote tracker back into markdown
//! strings, independently re-deriving which panel belongs to which
//! ticket section. Like the forward path this is total: any tree yields
//! some well-formed markdown.

use super::panel::Section;
use crate::doc::{DocumentTree, Mark, Node, TASK_STATE_DONE};
use once_cell::sync::Lazy;
use regex::Regex;

/// A rendered part that opens like a list item joins its neighbors with
/// a single break instead of a blank line.
static LIST_ITEM_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(- |\d+\. )").unwrap());

/// Render a node sequence to markdown text.
pub fn extract_text_from_nodes(nodes: &[Node]) -> String {
    render_nodes(nodes, false)
}

fn render_nodes(nodes: &[Node], inline: bool) -> String {
    let parts: Vec<String> = nodes
        .iter()
        .map(|node| render_node(node, inline))
        .filter(|part| !part.is_empty())
        .collect();

    if inline {
        return parts.concat();
    }

    let mut out = String::new();
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            let prev = &parts[index - 1];
            let sep = if LIST_ITEM_START.is_match(prev) || LIST_ITEM_START.is_match(part) {
                "\n"
            } else {
                "\n\n"
            };
            out.push_str(sep);
        }
        out.push_str(part);
    }
    out.trim().to_string()
}

fn render_node(node: &Node, inline: bool) -> String {
    match node {
        Node::Text { text, marks } => render_text(text, marks),
        Node::Paragraph { content } => render_nodes(content, true),
        Node::Heading { attrs, content } => {
            format!(
                "{} {}",
                "#".repeat(attrs.level as usize),
                render_nodes(content, true)
            )
        }
        Node::BulletList { content } => render_items(content, |_| "- ".to_string()),
        Node::OrderedList { content } => render_items(content, |i| format!("{}. ", i + 1)),
        Node::TaskList { content } => content
            .iter()
            .map(|item| {
                let marker = match item {
                    Node::TaskItem { attrs, .. } if attrs.state == TASK_STATE_DONE => "- [x] ",
                    _ => "- [ ] ",
                };
                format!("{}{}", marker, render_nodes(item.children(), true))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Node::CodeBlock { attrs, content } => {
            let language = attrs.language.as_deref().unwrap_or_default();
            format!("```{}\n{}\n```", language, render_nodes(content, true))
        }
        // Anything else (list items, task items, panels met mid-walk):
        // recurse into children.
        other => render_nodes(other.children(), inline),
    }
}

/// Wrap marks around the literal text in fixed order.
fn render_text(text: &str, marks: &[Mark]) -> String {
    let mut out = text.to_string();
    if marks.iter().any(|m| matches!(m, Mark::Strong)) {
        out = format!("**{}**", out);
    }
    if marks.iter().any(|m| matches!(m, Mark::Em)) {
        out = format!("*{}*", out);
    }
    if marks.iter().any(|m| matches!(m, Mark::Code)) {
        out = format!("`{}`", out);
    }
    if let Some(attrs) = marks.iter().find_map(|m| match m {
        Mark::Link { attrs } => Some(attrs),
        _ => None,
    }) {
        let href = match attrs {
            Some(link) if !link.href.is_empty() => link.href.as_str(),
            _ => "#",
        };
        out = format!("[{}]({})", out, href);
    }
    out
}

/// Render each list item's single paragraph inline behind its marker.
fn render_items(items: &[Node], marker: impl Fn(usize) -> String) -> String {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| format!("{}{}", marker(index), render_nodes(item.children(), true)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The per-section markdown recovered from a fetched document tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedSections {
    pub details: String,
    pub acceptance_criteria: String,
    pub test_strategy: String,
    pub main_description: String,
}

impl ExtractedSections {
    fn field_mut(&mut self, section: Section) -> &mut String {
        match section {
            Section::Details => &mut self.details,
            Section::AcceptanceCriteria => &mut self.acceptance_criteria,
            Section::TestStrategy => &mut self.test_strategy,
        }
    }
}

/// Partition a document's top-level content into the ticket sections.
///
/// Each panel is categorized by keyword match against its bold title
/// first; the conventional panel-type labels are only a fallback and
/// apply first-match-wins per field. A panel matching nothing folds into
/// the main description, title included, in source order.
pub fn extract_panels_from_description(tree: &DocumentTree) -> ExtractedSections {
    let mut sections = ExtractedSections::default();
    let mut main_nodes: Vec<Node> = Vec::new();

    for node in &tree.content {
        let (panel_type, children) = match node {
            Node::Panel { attrs, content } => (attrs.panel_type.as_str(), content.as_slice()),
            other => {
                main_nodes.push(other.clone());
                continue;
            }
        };

        let (title, content) = split_panel_title(children);
        let rendered = render_nodes(content, false);

        if let Some(section) = Section::from_title(&title) {
            let field = sections.field_mut(section);
            if field.is_empty() {
                *field = rendered;
            } else {
                // A second panel for an occupied section appends; nothing
                // is dropped.
                field.push_str("\n\n");
                field.push_str(&rendered);
            }
            continue;
        }

        if let Some(section) = Section::from_panel_type(panel_type) {
            let field = sections.field_mut(section);
            if field.is_empty() {
                *field = rendered;
                continue;
            }
        }

        main_nodes.extend(children.iter().cloned());
    }

    sections.main_description = render_nodes(&main_nodes, false);
    sections
}

/// A panel's title is the bold text of its first child paragraph, when
/// present; the remaining children are its content.
fn split_panel_title(children: &[Node]) -> (String, &[Node]) {
    if let Some(first @ Node::Paragraph { content }) = children.first() {
        if let Some(Node::Text { marks, .. }) = content.first() {
            if marks.contains(&Mark::Strong) {
                return (first.plain_text(), &children[1..]);
            }
        }
    }
    (String::new(), children)
}
