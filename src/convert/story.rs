//! User story extraction
//!
//! Pre-pass over raw description text (before normalization) that lifts
//! fenced blocks holding user stories out of the prose and turns each
//! into a bold title paragraph followed by a code block. Fenced blocks
//! that do not look like stories are left in place and parsed later as
//! ordinary code blocks.
//!
//! A fenced block is a story when any of these holds:
//! - its info string carries the `user-story` tag,
//! - its body contains, case-insensitively, "As a", "I want" and
//!   "so that",
//! - one of its lines opens with a BDD keyword (Given/When/Then/And).

use crate::doc::Node;
use once_cell::sync::Lazy;
use regex::Regex;

/// A fenced block: info string on the fence line, lazy body up to the
/// closing fence.
static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```([^\n]*)\n(.*?)\n?```").unwrap());

/// Title clause: everything after "I want" up to the next sentence
/// delimiter. The capture keeps the leading "to" ("To generate titles
/// automatically"); the suite encodes that output, so it stays.
static I_WANT_CLAUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)I want ([^.,\n]+)").unwrap());

const STORY_TAG: &str = "user-story";
const BDD_KEYWORDS: [&str; 4] = ["Given", "When", "Then", "And"];

/// Result of the story pre-pass: the description with recognized fences
/// removed, plus the title/code node pairs in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryExtraction {
    pub remaining: String,
    pub nodes: Vec<Node>,
}

/// Scan the raw description for user-story fences and lift them out.
pub fn extract_user_stories(description: &str) -> StoryExtraction {
    let mut nodes = Vec::new();
    let mut remaining = String::new();
    let mut cursor = 0;
    let mut recognized = 0;

    for caps in FENCED_BLOCK.captures_iter(description) {
        let whole = caps.get(0).expect("match 0 always present");
        let info = caps[1].trim().to_string();
        let body = &caps[2];

        if !is_user_story(&info, body) {
            continue;
        }

        recognized += 1;
        let title = explicit_title(&info).or_else(|| derived_title(body));
        nodes.push(Node::bold_paragraph(title_paragraph(recognized, title)));
        nodes.push(Node::code_block(None, reflow_body(body)));

        remaining.push_str(&description[cursor..whole.start()]);
        cursor = whole.end();
    }
    remaining.push_str(&description[cursor..]);

    StoryExtraction {
        remaining: remaining.trim().to_string(),
        nodes,
    }
}

fn is_user_story(info: &str, body: &str) -> bool {
    if info.contains(STORY_TAG) {
        return true;
    }
    let lower = body.to_lowercase();
    if lower.contains("as a") && lower.contains("i want") && lower.contains("so that") {
        return true;
    }
    body.lines().any(|line| {
        line.split_whitespace()
            .next()
            .is_some_and(|first| BDD_KEYWORDS.contains(&first))
    })
}

/// Title text carried on the fence line after the `user-story` tag.
fn explicit_title(info: &str) -> Option<String> {
    let after = info.split_once(STORY_TAG)?.1.trim();
    (!after.is_empty()).then(|| after.to_string())
}

/// Title derived from an "I want ..." clause, first character
/// capitalized, the "I want " itself dropped.
fn derived_title(body: &str) -> Option<String> {
    let clause = I_WANT_CLAUSE.captures(body)?;
    let trimmed = clause[1].trim().to_string();
    (!trimmed.is_empty()).then(|| capitalize_first(&trimmed))
}

/// The bold paragraph text: ordinal prefix, then the title when one was
/// found. The first recognized story gets the bare "User story:" prefix,
/// the Nth gets "User story N:".
fn title_paragraph(ordinal: usize, title: Option<String>) -> String {
    let prefix = if ordinal == 1 {
        "User story:".to_string()
    } else {
        format!("User story {}:", ordinal)
    };
    match title {
        Some(title) => format!("{} {}", prefix, title),
        None => prefix,
    }
}

/// Put the "I want" / "so that" clauses of a one-line story onto their
/// own lines; everything else is kept verbatim.
fn reflow_body(body: &str) -> String {
    body.replace(", I want", "\nI want")
        .replace(", so that", "\nso that")
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
