//! Forward document assembly
//!
//! Orchestrates the full markdown → document tree pipeline: the story
//! pre-pass lifts user-story fences out of the description, the
//! remainder is normalized and block-parsed, and the named ticket
//! sections are appended as titled panels in fixed order.
//!
//! Conversion is stateless and pure; every call rebuilds the tree from
//! the current field values.

use super::blocks::parse_blocks;
use super::normalize::normalize;
use super::panel::{build_panel, Section};
use super::story::extract_user_stories;
use crate::doc::DocumentTree;
use serde::{Deserialize, Serialize};

/// The independent markdown fields of a ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TicketFields {
    pub description: String,
    pub details: String,
    pub acceptance_criteria: String,
    pub test_strategy: String,
}

impl TicketFields {
    /// Build fields with the cleanup every constructor needs: each field
    /// is trimmed exactly once here instead of ad hoc at call sites.
    pub fn new(
        description: impl Into<String>,
        details: impl Into<String>,
        acceptance_criteria: impl Into<String>,
        test_strategy: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into().trim().to_string(),
            details: details.into().trim().to_string(),
            acceptance_criteria: acceptance_criteria.into().trim().to_string(),
            test_strategy: test_strategy.into().trim().to_string(),
        }
    }

    fn section_text(&self, section: Section) -> &str {
        match section {
            Section::Details => &self.details,
            Section::AcceptanceCriteria => &self.acceptance_criteria,
            Section::TestStrategy => &self.test_strategy,
        }
    }
}

/// Convert ticket fields to the document tree consumed by the remote
/// tracker's content field.
pub fn to_document(fields: &TicketFields) -> DocumentTree {
    // Step 1: lift user-story fences out of the raw description.
    let extraction = extract_user_stories(&fields.description);
    let mut content = extraction.nodes;

    // Step 2: normalize and block-parse what is left of the description.
    content.extend(parse_blocks(&normalize(&extraction.remaining)));

    // Step 3: append one titled panel per non-empty section, fixed order.
    for section in Section::ALL {
        let body = fields.section_text(section);
        if !body.trim().is_empty() {
            content.push(build_panel(section.panel_type(), section.title(), body));
        }
    }

    DocumentTree::new(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Node;

    #[test]
    fn test_empty_fields_yield_empty_document() {
        let tree = to_document(&TicketFields::default());
        assert_eq!(tree.version, 1);
        assert_eq!(tree.doc_type, "doc");
        assert!(tree.content.is_empty());
    }

    #[test]
    fn test_story_nodes_come_first() {
        let fields = TicketFields::new(
            "Context paragraph.\n\n```user-story Checkout\nGiven a cart\n```",
            "",
            "",
            "",
        );
        let tree = to_document(&fields);
        assert!(matches!(tree.content[0], Node::Paragraph { .. }));
        assert_eq!(
            tree.content[0].plain_text(),
            "User story: Checkout"
        );
        assert!(matches!(tree.content[1], Node::CodeBlock { .. }));
        assert_eq!(tree.content[2].plain_text(), "Context paragraph.");
    }

    #[test]
    fn test_panels_appended_in_fixed_order() {
        let fields = TicketFields::new("desc", "how", "what", "tdd");
        let tree = to_document(&fields);
        let panels: Vec<_> = tree
            .content
            .iter()
            .filter_map(|node| match node {
                Node::Panel { attrs, .. } => Some(attrs.panel_type.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(panels, vec!["info", "success", "note"]);
    }

    #[test]
    fn test_empty_sections_emit_no_panel() {
        let fields = TicketFields::new("desc", "", "criteria", "   ");
        let tree = to_document(&fields);
        let panel_count = tree.content.iter().filter(|n| n.is_panel()).count();
        assert_eq!(panel_count, 1);
    }

    #[test]
    fn test_fields_trimmed_at_construction() {
        let fields = TicketFields::new("  desc  ", "\ndetails\n", "", "");
        assert_eq!(fields.description, "desc");
        assert_eq!(fields.details, "details");
    }
}
