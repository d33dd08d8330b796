//! # Annotation Patterns Module
//!
//! This module contains the regex patterns used to strip comments, read
//! metadata lines and find ingredient, cookware and timer annotations.

use lazy_static::lazy_static;
use regex::Regex;

/// Line comment: `--` up to the end of the line
pub const LINE_COMMENT_PATTERN: &str = r"--.*";

/// Block comment confined to one line: `[- ... -]`
pub const BLOCK_COMMENT_PATTERN: &str = r"\[-.*?-\]";

/// Block comment allowed to cross line breaks
pub const MULTILINE_BLOCK_COMMENT_PATTERN: &str = r"(?s)\[-.*?-\]";

/// Metadata line: `>> key: value`
pub const METADATA_PATTERN: &str = r"^>>\s*(?P<key>[^:]*?)\s*:\s*(?P<value>.*?)\s*$";

// A braced name starts with a non-space character and never crosses another
// sigil or brace, so `@ foo` and `@salt and @pepper{}` stay unambiguous.
const BRACED_NAME: &str = r"[^\s@#~{}][^@#~{}]*?";

/// Every annotation family in one alternation. Braced forms come first so the
/// leftmost-first match prefers `@green onions{}` over `@green`.
pub fn annotation_pattern() -> String {
    [
        format!(r"@(?P<ingredient>{BRACED_NAME})\{{(?P<ingredient_quantity>[^}}]*)\}}"),
        r"@(?P<ingredient_word>\w+)".to_string(),
        format!(r"#(?P<cookware>{BRACED_NAME})\{{[^}}]*\}}"),
        r"#(?P<cookware_word>\w+)".to_string(),
        format!(r"~(?P<timer>(?:{BRACED_NAME})?)\{{(?P<timer_quantity>[^}}]*)\}}"),
        r"~(?P<timer_word>\w+)".to_string(),
    ]
    .join("|")
}

// Lazy static regexes to avoid recompilation
lazy_static! {
    pub static ref LINE_COMMENT_REGEX: Regex =
        Regex::new(LINE_COMMENT_PATTERN).expect("Line comment pattern should be valid");
    pub static ref BLOCK_COMMENT_REGEX: Regex =
        Regex::new(BLOCK_COMMENT_PATTERN).expect("Block comment pattern should be valid");
    pub static ref MULTILINE_BLOCK_COMMENT_REGEX: Regex = Regex::new(MULTILINE_BLOCK_COMMENT_PATTERN)
        .expect("Multiline block comment pattern should be valid");
    pub static ref METADATA_REGEX: Regex =
        Regex::new(METADATA_PATTERN).expect("Metadata pattern should be valid");
    pub static ref ANNOTATION_REGEX: Regex =
        Regex::new(&annotation_pattern()).expect("Annotation pattern should be valid");
}
