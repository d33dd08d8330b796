//! # Recipe Error Types Module
//!
//! This module defines the error type returned by every fallible parsing
//! operation. A parse either succeeds completely or fails with one of these.

use thiserror::Error;

/// Errors that can occur while parsing recipe text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A quantity fragment whose amount is not a valid number
    #[error("Malformed quantity '{fragment}': {reason}")]
    MalformedQuantity { fragment: String, reason: String },

    /// Two quantities, ingredients or timers that cannot be summed
    #[error("Cannot add '{left}' and '{right}': {reason}")]
    IncompatibleAddition {
        left: String,
        right: String,
        reason: String,
    },

    /// The rendered step text does not contain an ingredient where it was placed
    #[error("Ingredient '{name}' could not be located in rendered step {step}")]
    InternalSpanResolution { step: usize, name: String },
}

impl ParseError {
    pub(crate) fn malformed(fragment: &str, reason: impl Into<String>) -> Self {
        ParseError::MalformedQuantity {
            fragment: fragment.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn incompatible(
        left: impl ToString,
        right: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ParseError::IncompatibleAddition {
            left: left.to_string(),
            right: right.to_string(),
            reason: reason.into(),
        }
    }
}
