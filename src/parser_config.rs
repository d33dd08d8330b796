//! # Parser Configuration Module
//!
//! This module defines the knobs that change how recipe text is read.
//! The defaults reproduce the canonical behaviour; callers rarely need more.

use log::warn;
use std::env;

/// Environment variable selecting the block comment scope ("line" or "document")
pub const BLOCK_COMMENTS_ENV: &str = "COOKLANG_BLOCK_COMMENTS";
/// Environment variable enabling "<amount> <unit>" quantities ("true" or "false")
pub const SPACED_UNITS_ENV: &str = "COOKLANG_SPACED_UNITS";

/// How far a `[- ... -]` block comment may reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockCommentScope {
    /// A block comment must open and close on the same line
    #[default]
    Line,
    /// A block comment may span several lines
    Document,
}

/// Configuration structure for recipe parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Scope of block comment removal
    pub block_comments: BlockCommentScope,
    /// Whether a braced quantity without `%` may separate amount and unit
    /// with whitespace (e.g., `~{10 minutes}`); off by default, so such
    /// text is a malformed amount
    pub spaced_units: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            block_comments: BlockCommentScope::Line,
            spaced_units: false,
        }
    }
}

impl ParserConfig {
    /// Set the block comment scope
    pub fn with_block_comments(mut self, scope: BlockCommentScope) -> Self {
        self.block_comments = scope;
        self
    }

    /// Enable or disable whitespace-separated units
    pub fn with_spaced_units(mut self, enabled: bool) -> Self {
        self.spaced_units = enabled;
        self
    }

    /// Build a configuration from environment variables, falling back to defaults
    ///
    /// Unrecognised values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = env::var(BLOCK_COMMENTS_ENV) {
            match parse_block_comment_scope(&value) {
                Some(scope) => config.block_comments = scope,
                None => warn!("Ignoring {}={:?}: expected 'line' or 'document'", BLOCK_COMMENTS_ENV, value),
            }
        }

        if let Ok(value) = env::var(SPACED_UNITS_ENV) {
            match value.trim().parse::<bool>() {
                Ok(enabled) => config.spaced_units = enabled,
                Err(_) => warn!("Ignoring {}={:?}: expected 'true' or 'false'", SPACED_UNITS_ENV, value),
            }
        }

        config
    }
}

fn parse_block_comment_scope(value: &str) -> Option<BlockCommentScope> {
    match value.trim().to_lowercase().as_str() {
        "line" => Some(BlockCommentScope::Line),
        "document" => Some(BlockCommentScope::Document),
        _ => None,
    }
}
