//! # Recipe Parser
//!
//! This module ties the stages together: preprocessing, per-step extraction
//! and rendering, ingredient merging and metadata assembly.
//!
//! ## Usage
//!
//! ```rust
//! use cooklang_parser::recipe_model::{Amount, Quantity};
//!
//! let recipe = cooklang_parser::parse(">> time: 15 mins\nAdd @salt{1%pinch} and @salt{2%pinch}")?;
//!
//! assert_eq!(recipe.metadata["time"], "15 mins");
//! assert_eq!(recipe.steps, vec!["Add salt and salt"]);
//! assert_eq!(recipe.ingredients.len(), 1);
//! assert_eq!(
//!     recipe.ingredients[0].quantity,
//!     Some(Quantity::new(Amount::Integer(3), Some("pinch")))
//! );
//! # Ok::<(), cooklang_parser::ParseError>(())
//! ```

use crate::annotation_patterns::METADATA_REGEX;
use crate::parser_config::ParserConfig;
use crate::preprocessor::preprocess;
use crate::recipe_errors::ParseError;
use crate::recipe_model::{Ingredient, Recipe};
use crate::text_processing::{IngredientMention, StepProcessor};
use log::{debug, info, trace};
use std::collections::{BTreeMap, HashMap};

/// Parses recipe text into a [`Recipe`]
pub struct RecipeParser {
    config: ParserConfig,
    steps: StepProcessor,
}

impl RecipeParser {
    /// Create a parser with the default configuration
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            steps: StepProcessor::with_config(config.clone()),
            config,
        }
    }

    /// Parse a complete recipe
    ///
    /// # Errors
    ///
    /// - [`ParseError::MalformedQuantity`] when a quantity amount is not a number
    /// - [`ParseError::IncompatibleAddition`] when two mentions of one ingredient
    ///   use different units or number representations
    /// - [`ParseError::InternalSpanResolution`] if rendering lost track of an ingredient
    pub fn parse(&self, text: &str) -> Result<Recipe, ParseError> {
        let lines = preprocess(text, self.config.block_comments);
        let processed = self.steps.process_steps(&lines.step_lines)?;

        let mut recipe = Recipe {
            metadata: parse_metadata(&lines.metadata_lines),
            ..Recipe::default()
        };

        let mut mentions = Vec::new();
        for step in processed {
            recipe.steps.push(step.rendered);
            recipe.cookware.extend(step.cookware);
            recipe.timers.extend(step.timers);
            mentions.extend(step.ingredients);
        }
        recipe.ingredients = merge_ingredients(mentions)?;

        info!(
            "Parsed recipe: {} steps, {} ingredients, {} cookware, {} timers, {} metadata entries",
            recipe.steps.len(),
            recipe.ingredients.len(),
            recipe.cookware.len(),
            recipe.timers.len(),
            recipe.metadata.len()
        );
        Ok(recipe)
    }
}

impl Default for RecipeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe {
    /// Parse recipe text with the default configuration
    pub fn parse(text: &str) -> Result<Recipe, ParseError> {
        RecipeParser::new().parse(text)
    }
}

/// Parse recipe text with the default configuration
pub fn parse(text: &str) -> Result<Recipe, ParseError> {
    Recipe::parse(text)
}

/// Merge ingredient mentions by name, keeping order of first appearance
///
/// Each later mention is summed into the entry created by the first one,
/// whose location is kept.
pub fn merge_ingredients(mentions: Vec<IngredientMention>) -> Result<Vec<Ingredient>, ParseError> {
    let mut ingredients: Vec<Ingredient> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for mention in mentions {
        let ingredient = Ingredient {
            name: mention.name,
            location: mention.location,
            quantity: mention.quantity,
        };

        match index_by_name.get(&ingredient.name) {
            Some(&index) => {
                let merged = ingredients[index].add(&ingredient)?;
                debug!("Merged ingredient '{}': {:?}", merged.name, merged.quantity);
                ingredients[index] = merged;
            }
            None => {
                index_by_name.insert(ingredient.name.clone(), ingredients.len());
                ingredients.push(ingredient);
            }
        }
    }

    Ok(ingredients)
}

/// Read `>> key: value` lines; later keys overwrite earlier ones and
/// lines of any other shape are dropped
pub fn parse_metadata(lines: &[String]) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();

    for line in lines {
        match METADATA_REGEX.captures(line) {
            Some(captures) if !captures["key"].is_empty() => {
                metadata.insert(captures["key"].to_string(), captures["value"].to_string());
            }
            _ => trace!("Dropping metadata line without key/value: '{}'", line),
        }
    }

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::{Amount, Location, Quantity};

    fn mention(name: &str, step: usize, quantity: Option<Quantity>) -> IngredientMention {
        IngredientMention {
            name: name.to_string(),
            quantity,
            location: Location::new(step, 0, name.chars().count()),
        }
    }

    #[test]
    fn test_merge_keeps_first_appearance_order() {
        let grams = |n| Some(Quantity::new(Amount::Integer(n), Some("grams")));
        let merged = merge_ingredients(vec![
            mention("salt", 0, grams(1)),
            mention("pepper", 0, None),
            mention("salt", 2, grams(2)),
        ])
        .unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "salt");
        assert_eq!(merged[0].location.step, 0);
        assert_eq!(merged[0].quantity, grams(3));
        assert_eq!(merged[1].name, "pepper");
    }

    #[test]
    fn test_merge_rejects_mismatched_units() {
        let result = merge_ingredients(vec![
            mention("salt", 0, Some(Quantity::new(Amount::Integer(1), Some("grams")))),
            mention("salt", 0, Some(Quantity::new(Amount::Integer(1), Some("cups")))),
        ]);
        assert!(matches!(result, Err(ParseError::IncompatibleAddition { .. })));
    }

    #[test]
    fn test_metadata_overwrite_and_drop() {
        let lines: Vec<String> = [">> time: 15 mins", ">> no colon here", ">>: empty key", ">>time: 20 mins"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let metadata = parse_metadata(&lines);
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata["time"], "20 mins");
    }

    #[test]
    fn test_value_may_contain_colons() {
        let metadata = parse_metadata(&[">> source: https://example.com/a".to_string()]);
        assert_eq!(metadata["source"], "https://example.com/a");
    }
}
