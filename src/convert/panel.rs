//! Panel construction
//!
//! A panel is a titled container block grouping one named ticket section
//! (implementation details, acceptance criteria, test strategy). The
//! panel type is an opaque label for the remote renderer; it has no
//! parsing effect.

use super::blocks::parse_blocks;
use super::normalize::normalize;
use crate::doc::Node;

/// The named ticket sections that travel as panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Details,
    AcceptanceCriteria,
    TestStrategy,
}

impl Section {
    /// Fixed assembly order on the forward path.
    pub const ALL: [Section; 3] = [
        Section::Details,
        Section::AcceptanceCriteria,
        Section::TestStrategy,
    ];

    /// Panel type label used when emitting this section.
    pub fn panel_type(self) -> &'static str {
        match self {
            Section::Details => "info",
            Section::AcceptanceCriteria => "success",
            Section::TestStrategy => "note",
        }
    }

    /// Panel title used when emitting this section.
    pub fn title(self) -> &'static str {
        match self {
            Section::Details => "Implementation Details",
            Section::AcceptanceCriteria => "Acceptance Criteria",
            Section::TestStrategy => "Test Strategy (TDD)",
        }
    }

    /// Categorize a panel by case-insensitive keyword match against its
    /// title. Checked before the panel-type fallback; a title match wins.
    pub fn from_title(title: &str) -> Option<Section> {
        let lower = title.to_lowercase();
        if lower.contains("implementation") || lower.contains("detail") {
            Some(Section::Details)
        } else if lower.contains("acceptance") || lower.contains("criteria") {
            Some(Section::AcceptanceCriteria)
        } else if lower.contains("test") || lower.contains("tdd") {
            Some(Section::TestStrategy)
        } else {
            None
        }
    }

    /// Categorize by the conventional panel type labels.
    pub fn from_panel_type(panel_type: &str) -> Option<Section> {
        match panel_type {
            "info" => Some(Section::Details),
            "success" => Some(Section::AcceptanceCriteria),
            "note" => Some(Section::TestStrategy),
            _ => None,
        }
    }
}

/// Wrap markdown content into a titled panel node. An empty title emits
/// no title paragraph.
pub fn build_panel(panel_type: &str, title: &str, content: &str) -> Node {
    let mut children = Vec::new();
    if !title.is_empty() {
        children.push(Node::bold_paragraph(title));
    }
    children.extend(parse_blocks(&normalize(content)));
    Node::panel(panel_type, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Mark;

    #[test]
    fn test_panel_carries_type_and_title() {
        let panel = build_panel("info", "Implementation Details", "- step one\n- step two");
        match &panel {
            Node::Panel { attrs, content } => {
                assert_eq!(attrs.panel_type, "info");
                assert_eq!(content.len(), 2);
                match &content[0] {
                    Node::Paragraph { content } => assert_eq!(
                        content[0],
                        Node::styled_text("Implementation Details", vec![Mark::Strong])
                    ),
                    other => panic!("expected title paragraph, got {}", other),
                }
                assert!(matches!(content[1], Node::BulletList { .. }));
            }
            other => panic!("expected panel, got {}", other),
        }
    }

    #[test]
    fn test_empty_title_emits_no_title_paragraph() {
        let panel = build_panel("note", "", "body");
        assert_eq!(panel.children().len(), 1);
    }

    #[test]
    fn test_body_is_normalized_before_parsing() {
        let panel = build_panel("success", "Acceptance Criteria", "-   works\r\n\r\n\r\n-  fast");
        match &panel.children()[1] {
            Node::BulletList { content } => assert_eq!(content.len(), 2),
            other => panic!("expected bullet list, got {}", other),
        }
    }

    #[test]
    fn test_section_title_match_beats_panel_type() {
        assert_eq!(
            Section::from_title("Acceptance Criteria"),
            Some(Section::AcceptanceCriteria)
        );
        assert_eq!(Section::from_panel_type("info"), Some(Section::Details));
        assert_eq!(Section::from_title("Release Notes"), None);
        assert_eq!(Section::from_panel_type("warning"), None);
    }
}
