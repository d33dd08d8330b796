//! # Preprocessor Module
//!
//! Strips comments from raw recipe text and splits what remains into
//! metadata lines and step lines.

use crate::annotation_patterns::{
    BLOCK_COMMENT_REGEX, LINE_COMMENT_REGEX, MULTILINE_BLOCK_COMMENT_REGEX,
};
use crate::parser_config::BlockCommentScope;
use log::{debug, trace};

/// Prefix marking a metadata line
pub const METADATA_PREFIX: &str = ">>";

/// Recipe text split into its two kinds of lines, each in original order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessedText {
    /// Trimmed lines starting with `>>`
    pub metadata_lines: Vec<String>,
    /// Every other non-empty trimmed line; the position here is the step index
    pub step_lines: Vec<String>,
}

/// Remove block comments, then line comments
pub fn strip_comments(text: &str, scope: BlockCommentScope) -> String {
    let block_regex = match scope {
        BlockCommentScope::Line => &*BLOCK_COMMENT_REGEX,
        BlockCommentScope::Document => &*MULTILINE_BLOCK_COMMENT_REGEX,
    };

    let without_blocks = block_regex.replace_all(text, "");
    LINE_COMMENT_REGEX.replace_all(&without_blocks, "").into_owned()
}

/// Strip comments, drop blank lines and partition into metadata and steps
pub fn preprocess(text: &str, scope: BlockCommentScope) -> PreprocessedText {
    let stripped = strip_comments(text, scope);
    let mut result = PreprocessedText::default();

    for line in stripped.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with(METADATA_PREFIX) {
            trace!("Metadata line: '{}'", line);
            result.metadata_lines.push(line.to_string());
        } else {
            trace!("Step line {}: '{}'", result.step_lines.len(), line);
            result.step_lines.push(line.to_string());
        }
    }

    debug!(
        "Preprocessed text into {} metadata lines and {} step lines",
        result.metadata_lines.len(),
        result.step_lines.len()
    );
    result
}
