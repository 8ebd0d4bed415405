//! Bidirectional markdown ⇄ document tree conversion
//!
//! Forward path (markdown → tree): [`story::extract_user_stories`] lifts
//! user-story fences out of the raw description, [`normalize::normalize`]
//! cleans the remainder, [`blocks::parse_blocks`] produces the block
//! node sequence (delegating inline spans to [`inline::parse_inline`]),
//! and [`assemble::to_document`] stitches everything together with the
//! section panels from [`panel::build_panel`].
//!
//! Reverse path (tree → markdown): [`extract::extract_text_from_nodes`]
//! renders node sequences back to markdown and
//! [`extract::extract_panels_from_description`] re-derives which panel
//! belongs to which ticket section.
//!
//! Both directions are total functions: malformed input degrades to
//! literal text, missing fields are treated as absent segments, and no
//! call ever fails.

pub mod assemble;
pub mod blocks;
pub mod extract;
pub mod inline;
pub mod normalize;
pub mod panel;
pub mod story;

pub use assemble::{to_document, TicketFields};
pub use blocks::parse_blocks;
pub use extract::{extract_panels_from_description, extract_text_from_nodes, ExtractedSections};
pub use inline::{parse_inline, Inline};
pub use normalize::normalize;
pub use panel::{build_panel, Section};
pub use story::{extract_user_stories, StoryExtraction};
