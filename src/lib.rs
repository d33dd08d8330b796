//! # Cooklang Parser
//!
//! Parses Cooklang-style recipe markup into a structured [`Recipe`]: metadata,
//! rendered steps, ingredients with their positions, cookware and timers.
//!
//! ```rust
//! let recipe = cooklang_parser::parse("Cook the @pasta for ~{10%minutes}")?;
//! assert_eq!(recipe.steps, vec!["Cook the pasta for 10 minutes"]);
//! # Ok::<(), cooklang_parser::ParseError>(())
//! ```

pub mod annotation_patterns;
pub mod parser_config;
pub mod preprocessor;
pub mod quantity_parser;
pub mod recipe_errors;
pub mod recipe_model;
pub mod recipe_parser;
pub mod text_processing;

pub use parser_config::{BlockCommentScope, ParserConfig};
pub use recipe_errors::ParseError;
pub use recipe_model::{Amount, Ingredient, Location, Quantity, Recipe, Timer};
pub use recipe_parser::{parse, RecipeParser};
