//! # Recipe Data Model
//!
//! This module defines the values produced by parsing a recipe: quantities,
//! ingredients, timers and the recipe itself. All of them are plain immutable
//! values; summing two of them yields a new value instead of mutating either.
//!
//! ## Core Concepts
//!
//! - **Amount**: an exact number, either an integer, a decimal or a rational
//! - **Quantity**: an amount with an optional unit
//! - **Ingredient**: a named food item, where it first appears, and how much
//! - **Timer**: an optionally named duration
//!
//! ## Usage
//!
//! ```rust
//! use cooklang_parser::recipe_model::{Amount, Quantity};
//!
//! let a = Quantity::new(Amount::Decimal(0.1), Some("grams"));
//! let b = Quantity::new(Amount::Decimal(0.2), Some("grams"));
//!
//! let total = a.add(&b)?;
//! assert_eq!(total, Quantity::new(Amount::Decimal(0.3), Some("grams")));
//! # Ok::<(), cooklang_parser::ParseError>(())
//! ```

use crate::recipe_errors::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of fractional digits kept after summing two decimals
pub const DECIMAL_SUM_PLACES: usize = 1;

/// An exact numeric amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Amount {
    /// Whole number (e.g., "42")
    Integer(i64),

    /// Decimal number (e.g., "0.5")
    Decimal(f64),

    /// Exact fraction (e.g., "1/2"), always stored reduced with a positive denominator
    Rational {
        /// Numerator of the fraction
        numerator: i64,
        /// Denominator of the fraction
        denominator: i64,
    },
}

/// A quantity measurement: an amount and an optional unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric amount
    pub amount: Amount,

    /// The unit, taken verbatim from the recipe text (e.g., "grams", "cup")
    pub unit: Option<String>,
}

/// Where an ingredient appears: a half-open character range in a rendered step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Index of the step in `Recipe::steps`
    pub step: usize,
    /// First character of the ingredient name
    pub start: usize,
    /// One past the last character of the ingredient name
    pub end: usize,
}

/// An ingredient referenced by the recipe steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// The name of the ingredient (e.g., "salt", "green onions")
    pub name: String,

    /// Location of the first mention
    pub location: Location,

    /// Total quantity across all mentions, if any mention carried one
    pub quantity: Option<Quantity>,
}

/// A timer mentioned in a step; anonymous timers have an empty name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    pub name: String,
    pub quantity: Option<Quantity>,
}

/// A fully parsed recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Key/value pairs declared with `>>` lines
    pub metadata: BTreeMap<String, String>,

    /// One entry per distinct ingredient name, in order of first appearance
    pub ingredients: Vec<Ingredient>,

    /// Rendered step text, one entry per step line
    pub steps: Vec<String>,

    /// Every cookware mention, duplicates included
    pub cookware: Vec<String>,

    /// Every timer mention, duplicates included
    pub timers: Vec<Timer>,
}

impl Amount {
    /// Create a reduced fraction
    ///
    /// Returns `None` when the denominator is zero or when the reduced
    /// fraction with a positive denominator does not fit in `i64`.
    pub fn rational(numerator: i64, denominator: i64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }

        let divisor = gcd(numerator, denominator)?;
        let mut numerator = numerator.checked_div(divisor)?;
        let mut denominator = denominator.checked_div(divisor)?;
        if denominator < 0 {
            numerator = numerator.checked_neg()?;
            denominator = denominator.checked_neg()?;
        }

        Some(Amount::Rational {
            numerator,
            denominator,
        })
    }

    /// Human-readable name of the representation, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Amount::Integer(_) => "integer",
            Amount::Decimal(_) => "decimal",
            Amount::Rational { .. } => "rational",
        }
    }

    /// Sum two amounts of the same representation
    ///
    /// Mixing representations is rejected rather than coerced. Decimal sums
    /// are rounded to [`DECIMAL_SUM_PLACES`] fractional digits.
    pub fn add(&self, other: &Amount) -> Result<Amount, ParseError> {
        let overflow = || ParseError::incompatible(self, other, "sum overflows");

        match (self, other) {
            (Amount::Integer(a), Amount::Integer(b)) => {
                a.checked_add(*b).map(Amount::Integer).ok_or_else(overflow)
            }
            (Amount::Decimal(a), Amount::Decimal(b)) => Ok(Amount::Decimal(round_decimal(a + b))),
            (
                Amount::Rational {
                    numerator: an,
                    denominator: ad,
                },
                Amount::Rational {
                    numerator: bn,
                    denominator: bd,
                },
            ) => {
                let numerator = an
                    .checked_mul(*bd)
                    .zip(bn.checked_mul(*ad))
                    .and_then(|(x, y)| x.checked_add(y))
                    .ok_or_else(overflow)?;
                let denominator = ad.checked_mul(*bd).ok_or_else(overflow)?;
                Amount::rational(numerator, denominator).ok_or_else(overflow)
            }
            _ => Err(ParseError::incompatible(
                self,
                other,
                format!("cannot add {} to {}", other.kind(), self.kind()),
            )),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Integer(value) => write!(f, "{value}"),
            // Always show a fractional digit so decimals never look like integers
            Amount::Decimal(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Amount::Decimal(value) => write!(f, "{value}"),
            Amount::Rational {
                numerator,
                denominator,
            } => write!(f, "{numerator}/{denominator}"),
        }
    }
}

impl Quantity {
    /// Create a quantity from an amount and an optional unit
    pub fn new(amount: Amount, unit: Option<&str>) -> Self {
        Self {
            amount,
            unit: unit.map(str::to_string),
        }
    }

    /// Sum two quantities; units must be identical (both absent counts as identical)
    pub fn add(&self, other: &Quantity) -> Result<Quantity, ParseError> {
        if self.unit != other.unit {
            return Err(ParseError::incompatible(self, other, "units differ"));
        }

        Ok(Quantity {
            amount: self.amount.add(&other.amount)?,
            unit: self.unit.clone(),
        })
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} {}", self.amount, unit),
            None => write!(f, "{}", self.amount),
        }
    }
}

impl Location {
    pub fn new(step: usize, start: usize, end: usize) -> Self {
        Self { step, start, end }
    }
}

impl Ingredient {
    /// Create an ingredient with no quantity
    pub fn new(name: &str, location: Location) -> Self {
        Self {
            name: name.to_string(),
            location,
            quantity: None,
        }
    }

    /// Attach a quantity to this ingredient
    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Merge another mention of the same ingredient into this one
    ///
    /// The location of `self` is kept, since it is the earlier mention.
    pub fn add(&self, other: &Ingredient) -> Result<Ingredient, ParseError> {
        if self.name != other.name {
            return Err(ParseError::incompatible(
                &self.name,
                &other.name,
                "ingredient names differ",
            ));
        }

        Ok(Ingredient {
            name: self.name.clone(),
            location: self.location,
            quantity: add_optional(self.quantity.as_ref(), other.quantity.as_ref())?,
        })
    }

}

impl Timer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: None,
        }
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sum two timers with the same name
    pub fn add(&self, other: &Timer) -> Result<Timer, ParseError> {
        if self.name != other.name {
            return Err(ParseError::incompatible(
                &self.name,
                &other.name,
                "timer names differ",
            ));
        }

        Ok(Timer {
            name: self.name.clone(),
            quantity: add_optional(self.quantity.as_ref(), other.quantity.as_ref())?,
        })
    }

    /// The text a timer is rendered as inside a step
    pub fn display_text(&self) -> String {
        self.quantity
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

impl Recipe {
    /// Find an ingredient by exact name
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.name == name)
    }
}

/// Sum two optional quantities; a missing side contributes nothing
pub fn add_optional(
    left: Option<&Quantity>,
    right: Option<&Quantity>,
) -> Result<Option<Quantity>, ParseError> {
    match (left, right) {
        (Some(a), Some(b)) => a.add(b).map(Some),
        (Some(q), None) | (None, Some(q)) => Ok(Some(q.clone())),
        (None, None) => Ok(None),
    }
}

/// Round half away from zero on the shortest decimal text of `value`
///
/// Working on the decimal digits rather than the binary value means a sum
/// that reads as `0.25` rounds to `0.3` whichever neighbouring float it is.
fn round_decimal(value: f64) -> f64 {
    let text = value.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    if fraction.len() <= DECIMAL_SUM_PLACES {
        return value;
    }

    // Too large to hold as digits; no fractional precision is left anyway
    let Ok(mut digits) = format!("{whole}{}", &fraction[..DECIMAL_SUM_PLACES]).parse::<u128>() else {
        return value;
    };
    if fraction.as_bytes()[DECIMAL_SUM_PLACES] >= b'5' {
        digits += 1;
    }

    let scale = 10u128.pow(DECIMAL_SUM_PLACES as u32);
    let rounded = format!(
        "{}.{:0width$}",
        digits / scale,
        digits % scale,
        width = DECIMAL_SUM_PLACES
    )
    .parse::<f64>()
    .unwrap_or(value.abs());

    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

/// Greatest common divisor, `None` when it is 2^63 and does not fit in `i64`
fn gcd(a: i64, b: i64) -> Option<i64> {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    i64::try_from(a).ok()
}
