//! Markdown normalization pass
//!
//! Cleans raw ticket text before block parsing: unifies line endings,
//! collapses runs of blank lines, tightens the spacing after heading and
//! list markers, and trims stray whitespace. The pass is total and
//! idempotent: `normalize(normalize(x)) == normalize(x)`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing spaces or tabs at the end of a line.
static TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

/// Heading markers followed by missing or excess spacing. The content
/// class excludes `#` so a run of seven or more hashes is left alone
/// rather than rewritten into a six-level heading.
static HEADING_SPACING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,6})[ \t]*([^#\s])").unwrap());

/// Bullet marker followed by excess spacing. The marker must be followed
/// by whitespace, so a doubled marker such as the `**` opening a bold
/// span can never match as a bullet.
static BULLET_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^([-*+])[ \t]+").unwrap());

/// Ordered list marker followed by excess spacing.
static NUMBER_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(\d+\.)[ \t]+").unwrap());

/// Three or more consecutive line breaks.
static EXCESS_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalize raw markdown-ish text. Never fails; empty input yields
/// empty output.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = TRAILING_WS.replace_all(&unified, "");
    let headings = HEADING_SPACING.replace_all(&stripped, "${1} ${2}");
    let bullets = BULLET_SPACING.replace_all(&headings, "${1} ");
    let numbers = NUMBER_SPACING.replace_all(&bullets, "${1} ");
    let collapsed = EXCESS_BREAKS.replace_all(&numbers, "\n\n");

    collapsed.trim_matches('\n').to_string()
}
