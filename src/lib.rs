//! # tickdoc
//!
//! A bidirectional converter between a markdown-like textual dialect and
//! the hierarchical rich-text document model used by ticket trackers.
//!
//! The forward path turns ticket fields (description, implementation
//! details, acceptance criteria, test strategy) into one document tree,
//! heuristically lifting fenced user-story blocks into titled code
//! blocks and wrapping the named sections into titled panels. The
//! reverse path walks a fetched tree back into per-section markdown.
//!
//! Only the markdown subset the ticket workflow actually produces and
//! consumes is supported: headings, bullet and ordered lists, fenced
//! code, bold/italic/code/link spans, panels, and task lists.
//!
//! ## Testing
//!
//! Unit tests sit next to each pipeline stage; integration and property
//! suites live under `tests/`.

pub mod convert;
pub mod doc;

pub use convert::{
    extract_panels_from_description, extract_text_from_nodes, normalize, to_document,
    ExtractedSections, TicketFields,
};
pub use doc::{DocumentTree, Mark, Node};
