//! # Text Processing Module
//!
//! This module turns one raw step line into its rendered form while
//! extracting the annotations it contains.
//!
//! ## Features
//!
//! - Ingredient (`@`), cookware (`#`) and timer (`~`) annotations, each in a
//!   single-word form (`@salt`) and a braced form (`@green onions{10%grams}`)
//! - Rendering that replaces ingredients and cookware by their bare names and
//!   timers by their quantity text
//! - Ingredient spans recorded while rendering, so repeated names in one line
//!   each bind to their own occurrence
//! - Stray sigils that do not form an annotation are kept as plain text

use crate::annotation_patterns::ANNOTATION_REGEX;
use crate::parser_config::ParserConfig;
use crate::quantity_parser::parse_quantity;
use crate::recipe_errors::ParseError;
use crate::recipe_model::{Location, Quantity, Timer};
use log::{debug, trace};
use regex::{Captures, Regex};

/// One textual mention of an ingredient, before same-name mentions are merged
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientMention {
    /// The ingredient name as written
    pub name: String,
    /// The quantity written in braces, if any
    pub quantity: Option<Quantity>,
    /// Span of the name within the rendered step
    pub location: Location,
}

/// The outcome of processing a single step line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedStep {
    /// Step text with every annotation replaced by its display form
    pub rendered: String,
    /// Ingredient mentions, left to right
    pub ingredients: Vec<IngredientMention>,
    /// Cookware mentions, left to right
    pub cookware: Vec<String>,
    /// Timer mentions, left to right
    pub timers: Vec<Timer>,
}

/// Rendered text that keeps its length in characters alongside the string
struct RenderedLine {
    text: String,
    chars: usize,
}

impl RenderedLine {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            chars: 0,
        }
    }

    fn push(&mut self, fragment: &str) {
        self.text.push_str(fragment);
        self.chars += fragment.chars().count();
    }

    /// Push an ingredient name and return its character span
    fn push_span(&mut self, fragment: &str) -> (usize, usize) {
        let start = self.chars;
        self.push(fragment);
        (start, self.chars)
    }
}

/// Annotation extractor and step renderer
pub struct StepProcessor {
    /// Compiled alternation of every annotation form
    pattern: Regex,
    /// Configuration options
    config: ParserConfig,
}

impl StepProcessor {
    /// Create a step processor with the default configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cooklang_parser::text_processing::StepProcessor;
    ///
    /// let processor = StepProcessor::new();
    /// let step = processor.process_step(0, "Cook the @pasta for ~{10%minutes}")?;
    ///
    /// assert_eq!(step.rendered, "Cook the pasta for 10 minutes");
    /// assert_eq!(step.ingredients[0].name, "pasta");
    /// assert_eq!(step.timers[0].display_text(), "10 minutes");
    /// # Ok::<(), cooklang_parser::ParseError>(())
    /// ```
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a step processor with custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        debug!("Creating StepProcessor with config: {:?}", config);
        Self {
            pattern: ANNOTATION_REGEX.clone(),
            config,
        }
    }

    /// Process every step line, in order
    pub fn process_steps(&self, lines: &[String]) -> Result<Vec<ProcessedStep>, ParseError> {
        lines
            .iter()
            .enumerate()
            .map(|(index, line)| self.process_step(index, line))
            .collect()
    }

    /// Extract annotations from one step line and render it
    ///
    /// # Arguments
    ///
    /// * `step` - Index of the line among the step lines
    /// * `line` - The raw, comment-free step text
    ///
    /// # Errors
    ///
    /// Fails with [`ParseError::MalformedQuantity`] when a braced ingredient or
    /// timer quantity does not parse.
    pub fn process_step(&self, step: usize, line: &str) -> Result<ProcessedStep, ParseError> {
        trace!("Processing step {}: '{}'", step, line);

        let mut rendered = RenderedLine::with_capacity(line.len());
        let mut ingredients = Vec::new();
        let mut cookware = Vec::new();
        let mut timers = Vec::new();
        let mut last_end = 0;

        for captures in self.pattern.captures_iter(line) {
            let whole = captures.get_match();
            rendered.push(&line[last_end..whole.start()]);
            last_end = whole.end();

            if let Some(name) = either(&captures, "ingredient", "ingredient_word") {
                let quantity = self.quantity(&captures, "ingredient_quantity")?;
                let (start, end) = rendered.push_span(name);
                debug!(
                    "Found ingredient '{}' at step {} [{}, {}) with quantity {:?}",
                    name, step, start, end, quantity
                );
                ingredients.push(IngredientMention {
                    name: name.to_string(),
                    quantity,
                    location: Location::new(step, start, end),
                });
            } else if let Some(name) = either(&captures, "cookware", "cookware_word") {
                debug!("Found cookware '{}' at step {}", name, step);
                rendered.push(name);
                cookware.push(name.to_string());
            } else if let Some(name) = either(&captures, "timer", "timer_word") {
                let timer = Timer {
                    name: name.to_string(),
                    quantity: self.quantity(&captures, "timer_quantity")?,
                };
                debug!("Found timer '{}' at step {}: {:?}", name, step, timer.quantity);
                rendered.push(&timer.display_text());
                timers.push(timer);
            }
        }
        rendered.push(&line[last_end..]);

        for mention in &ingredients {
            verify_span(&rendered.text, mention)?;
        }

        Ok(ProcessedStep {
            rendered: rendered.text,
            ingredients,
            cookware,
            timers,
        })
    }

    fn quantity(&self, captures: &Captures<'_>, group: &str) -> Result<Option<Quantity>, ParseError> {
        match captures.name(group) {
            Some(fragment) => parse_quantity(fragment.as_str(), self.config.spaced_units),
            None => Ok(None),
        }
    }
}

impl Default for StepProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Name captured by the braced group or, failing that, the single-word group
fn either<'h>(captures: &Captures<'h>, braced: &str, word: &str) -> Option<&'h str> {
    captures
        .name(braced)
        .or_else(|| captures.name(word))
        .map(|m| m.as_str())
}

/// Check that the rendered text holds the ingredient name at its recorded span
fn verify_span(rendered: &str, mention: &IngredientMention) -> Result<(), ParseError> {
    let Location { step, start, end } = mention.location;
    let found: String = rendered.chars().skip(start).take(end - start).collect();

    if found == mention.name {
        Ok(())
    } else {
        Err(ParseError::InternalSpanResolution {
            step,
            name: mention.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::Amount;

    fn process(line: &str) -> ProcessedStep {
        StepProcessor::new().process_step(0, line).unwrap()
    }

    #[test]
    fn test_plain_line_is_unchanged() {
        let step = process("Hey this is a paragraph with no ingredients");
        assert_eq!(step.rendered, "Hey this is a paragraph with no ingredients");
        assert!(step.ingredients.is_empty());
        assert!(step.cookware.is_empty());
        assert!(step.timers.is_empty());
    }

    #[test]
    fn test_ingredient_forms() {
        let step = process("Place @sugar{42%grams} in the pan along with @green onions{10%grams}");
        assert_eq!(step.rendered, "Place sugar in the pan along with green onions");
        assert_eq!(step.ingredients.len(), 2);

        assert_eq!(step.ingredients[0].name, "sugar");
        assert_eq!(step.ingredients[0].location, Location::new(0, 6, 11));
        assert_eq!(
            step.ingredients[0].quantity,
            Some(Quantity::new(Amount::Integer(42), Some("grams")))
        );

        assert_eq!(step.ingredients[1].name, "green onions");
        assert_eq!(step.ingredients[1].location, Location::new(0, 34, 46));
    }

    #[test]
    fn test_repeated_names_get_distinct_spans() {
        let step = process("Add @salt{0.1%grams} and @salt{0.2%grams}. Add more @salt to taste");
        assert_eq!(step.rendered, "Add salt and salt. Add more salt to taste");

        let spans: Vec<_> = step.ingredients.iter().map(|i| i.location).collect();
        assert_eq!(
            spans,
            vec![
                Location::new(0, 4, 8),
                Location::new(0, 13, 17),
                Location::new(0, 28, 32),
            ]
        );
    }

    #[test]
    fn test_spans_count_characters_not_bytes() {
        let step = process("Get the @sauté vegetables{}. Then @salt");
        assert_eq!(step.rendered, "Get the sauté vegetables. Then salt");
        assert_eq!(step.ingredients[0].location, Location::new(0, 8, 24));
        assert_eq!(step.ingredients[1].location, Location::new(0, 31, 35));
    }

    #[test]
    fn test_cookware_contents_are_ignored() {
        let step = process("Put it in the #big bowl{whatever} then the #pan and the #pan");
        assert_eq!(step.rendered, "Put it in the big bowl then the pan and the pan");
        assert_eq!(step.cookware, vec!["big bowl", "pan", "pan"]);
    }

    #[test]
    fn test_timer_rendering() {
        let step = process("Cook the @pasta for ~{10%minutes}");
        assert_eq!(step.rendered, "Cook the pasta for 10 minutes");
        assert_eq!(step.ingredients[0].location, Location::new(0, 9, 14));
        assert_eq!(
            step.timers,
            vec![Timer::new("").with_quantity(Quantity::new(Amount::Integer(10), Some("minutes")))]
        );

        let step = process("Boil ~eggs{1/2%hour} then let ~rest");
        assert_eq!(step.rendered, "Boil 1/2 hour then let ");
        assert_eq!(step.timers[0].name, "eggs");
        assert_eq!(step.timers[1], Timer::new("rest"));
    }

    #[test]
    fn test_stray_sigils_pass_through() {
        for line in ["# For instance, a markdown header", "@ Or something else here", "~ Or this"] {
            let step = process(line);
            assert_eq!(step.rendered, line);
            assert!(step.ingredients.is_empty());
            assert!(step.cookware.is_empty());
            assert!(step.timers.is_empty());
        }
    }

    #[test]
    fn test_malformed_quantity_fails() {
        let result = StepProcessor::new().process_step(0, "Add @salt{a.b%grams}");
        assert!(matches!(result, Err(ParseError::MalformedQuantity { .. })));
    }

    #[test]
    fn test_process_steps_uses_step_index() {
        let lines = vec!["first".to_string(), "then @salt".to_string()];
        let steps = StepProcessor::new().process_steps(&lines).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].ingredients[0].location, Location::new(1, 5, 9));
    }

    #[test]
    fn test_verify_span_detects_mismatch() {
        let mention = IngredientMention {
            name: "salt".to_string(),
            quantity: None,
            location: Location::new(3, 0, 4),
        };
        assert!(verify_span("salt and pepper", &mention).is_ok());
        assert_eq!(
            verify_span("pepper and salt", &mention),
            Err(ParseError::InternalSpanResolution {
                step: 3,
                name: "salt".to_string()
            })
        );
    }
}
