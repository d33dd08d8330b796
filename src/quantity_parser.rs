//! # Quantity Parser
//!
//! Converts the text found between the braces of an annotation into a typed
//! [`Quantity`]. The fragment has the form `amount%unit`, where the unit is
//! optional:
//!
//! - `42%grams` is an integer amount with a unit
//! - `0.5%cup` is a decimal amount
//! - `1/2%cup` is an exact fraction
//! - `3` has no unit, and an empty fragment has no quantity at all
//!
//! ## Usage
//!
//! ```rust
//! use cooklang_parser::quantity_parser::parse_quantity;
//! use cooklang_parser::recipe_model::{Amount, Quantity};
//!
//! let quantity = parse_quantity("1/2%cup", true)?;
//! assert_eq!(quantity, Some(Quantity::new(Amount::rational(1, 2).unwrap(), Some("cup"))));
//! assert_eq!(parse_quantity("", true)?, None);
//! # Ok::<(), cooklang_parser::ParseError>(())
//! ```

use crate::recipe_errors::ParseError;
use crate::recipe_model::{Amount, Quantity};
use log::trace;

/// Separator between amount and unit
pub const UNIT_SEPARATOR: char = '%';

/// Parse a quantity fragment
///
/// With `spaced_units`, a fragment without `%` but with inner whitespace
/// (`10 minutes`) is split at the first whitespace into amount and unit.
/// Returns `Ok(None)` when the amount is empty.
pub fn parse_quantity(fragment: &str, spaced_units: bool) -> Result<Option<Quantity>, ParseError> {
    let (amount_text, unit_text) = split_fragment(fragment.trim(), spaced_units);

    let amount_text = amount_text.trim();
    if amount_text.is_empty() {
        trace!("Empty amount in fragment '{}'", fragment);
        return Ok(None);
    }

    let amount = parse_amount(amount_text).map_err(|reason| ParseError::malformed(fragment, reason))?;
    let unit = unit_text.map(str::trim).filter(|u| !u.is_empty());

    Ok(Some(Quantity::new(amount, unit)))
}

fn split_fragment(fragment: &str, spaced_units: bool) -> (&str, Option<&str>) {
    if let Some((amount, unit)) = fragment.split_once(UNIT_SEPARATOR) {
        return (amount, Some(unit));
    }

    if spaced_units {
        if let Some((amount, unit)) = fragment.split_once(char::is_whitespace) {
            return (amount, Some(unit));
        }
    }

    (fragment, None)
}

/// Parse the amount part; decimals contain `.`, fractions contain `/`
fn parse_amount(text: &str) -> Result<Amount, &'static str> {
    if text.contains('.') {
        return match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Amount::Decimal(value)),
            _ => Err("invalid decimal number"),
        };
    }

    if let Some((numerator, denominator)) = text.split_once('/') {
        let numerator: i64 = numerator.trim().parse().map_err(|_| "invalid fraction")?;
        let denominator: i64 = denominator.trim().parse().map_err(|_| "invalid fraction")?;
        if denominator == 0 {
            return Err("zero denominator in fraction");
        }
        return Amount::rational(numerator, denominator).ok_or("fraction out of range");
    }

    text.parse::<i64>()
        .map(Amount::Integer)
        .map_err(|_| "invalid integer")
}
