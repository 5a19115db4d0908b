//! # Recipe Conversion Module
//!
//! [`Converter`] is the context object a host application builds once at
//! startup. It owns the configuration and the sentence tokenizer and exposes
//! the sentence, paragraph and recipe level operations.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::conversion_errors::{ConversionError, ConversionResult};
use crate::converter_config::ConverterConfig;
use crate::fractions::{
    replace_decimal_fractions, replace_vulgar_fractions, scale_number_word, scale_numbers,
};
use crate::measurement_types::System;
use crate::sentence_tokenizer::{SentenceTokenizer, UnicodeSentenceTokenizer};
use crate::text_processing::{
    convert_paragraph_with_precision, convert_sentence_with_precision, detect_system,
    normalize_quantities, scale_sentence_with_precision,
};

/// Tokenizer shared by every call of a converter
pub type SharedTokenizer = Arc<dyn SentenceTokenizer + Send + Sync>;

/// The text fields of a recipe that may hold measurements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeText {
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl RecipeText {
    /// Canonical casing of litre and temperature symbols in every field,
    /// e.g. "1l" becomes "1L"
    pub fn normalized(&self) -> RecipeText {
        RecipeText {
            description: normalize_quantities(&self.description),
            ingredients: self.ingredients.iter().map(|s| normalize_quantities(s)).collect(),
            instructions: self.instructions.iter().map(|s| normalize_quantities(s)).collect(),
        }
    }
}

/// Measurement converter bound to a configuration and a sentence tokenizer
#[derive(Clone)]
pub struct Converter {
    config: ConverterConfig,
    tokenizer: SharedTokenizer,
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            config: ConverterConfig::default(),
            tokenizer: Arc::new(UnicodeSentenceTokenizer),
        }
    }
}

impl Converter {
    /// Create a converter with the default UAX #29 sentence tokenizer
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_units::converter_config::ConverterConfig;
    /// use recipe_units::recipe_conversion::Converter;
    ///
    /// let converter = Converter::new(ConverterConfig::default())?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn new(config: ConverterConfig) -> Result<Self> {
        Self::with_tokenizer(config, Arc::new(UnicodeSentenceTokenizer))
    }

    /// Create a converter with a custom sentence tokenizer
    pub fn with_tokenizer(config: ConverterConfig, tokenizer: SharedTokenizer) -> Result<Self> {
        config.validate()?;
        info!("Creating Converter with config: {:?}", config);
        Ok(Self { config, tokenizer })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert the first measurement of a sentence
    pub fn convert_sentence(&self, input: &str, from: System, to: System) -> ConversionResult<String> {
        convert_sentence_with_precision(input, from, to, self.config.precision)
    }

    /// Convert every sentence of a paragraph, keeping unconvertible sentences as written
    pub fn convert_paragraph(&self, paragraph: &str, from: System, to: System) -> String {
        convert_paragraph_with_precision(
            self.tokenizer.as_ref(),
            paragraph,
            from,
            to,
            self.config.precision,
        )
    }

    /// Convert a whole recipe to another measurement system.
    ///
    /// The current system is the first one detected among the ingredients.
    /// Ingredient lines are converted one by one; instructions and the
    /// description are converted sentence by sentence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_units::measurement_types::System;
    /// use recipe_units::recipe_conversion::{Converter, RecipeText};
    ///
    /// let recipe = RecipeText {
    ///     description: String::new(),
    ///     ingredients: vec!["1 cup butter".to_string()],
    ///     instructions: vec!["Bake at 350°F.".to_string()],
    /// };
    ///
    /// let metric = Converter::default().convert_recipe(&recipe, System::Metric)?;
    /// assert_eq!(metric.ingredients, vec!["2.37 dl butter"]);
    /// assert_eq!(metric.instructions, vec!["Bake at 177 °C."]);
    /// # Ok::<(), recipe_units::conversion_errors::ConversionError>(())
    /// ```
    pub fn convert_recipe(&self, recipe: &RecipeText, to: System) -> ConversionResult<RecipeText> {
        let from = recipe
            .ingredients
            .iter()
            .map(|line| detect_system(&replace_vulgar_fractions(line)))
            .find(|system| *system != System::Invalid)
            .ok_or(ConversionError::UndetectableSystem)?;

        if from == to {
            return Err(ConversionError::UnchangedSystem { system: to });
        }

        info!(
            "Converting recipe with {} ingredients from {} to {}",
            recipe.ingredients.len(),
            from,
            to
        );

        let ingredients = recipe
            .ingredients
            .iter()
            .map(|line| match self.convert_sentence(line, from, to) {
                Ok(converted) => converted,
                Err(e) => {
                    debug!("Keeping ingredient '{}' as is: {}", line, e);
                    line.clone()
                }
            })
            .collect();

        let instructions = recipe
            .instructions
            .iter()
            .map(|paragraph| self.convert_paragraph(paragraph, from, to))
            .collect();

        Ok(RecipeText {
            description: self.convert_paragraph(&recipe.description, from, to),
            ingredients,
            instructions,
        })
    }

    /// Scale a single ingredient line by `multiplier`.
    ///
    /// Lines with a known unit are re-bucketed into the most readable unit.
    /// A line without one has a leading number word ("Two eggs") or else
    /// every number multiplied in place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_units::recipe_conversion::Converter;
    ///
    /// let converter = Converter::default();
    /// assert_eq!(converter.scale_ingredient("3/4 cup sugar", 2.0), "1 1/2 cups sugar");
    /// assert_eq!(converter.scale_ingredient("3 eggs", 2.0), "6 eggs");
    /// assert_eq!(converter.scale_ingredient("Two eggs", 2.0), "4 eggs");
    /// ```
    pub fn scale_ingredient(&self, line: &str, multiplier: f64) -> String {
        let normalized = replace_vulgar_fractions(line);
        let precision = self.config.precision;

        let scaled = match detect_system(&normalized) {
            System::Invalid => scale_number_word(&normalized, multiplier, precision)
                .unwrap_or_else(|| scale_numbers(&normalized, multiplier)),
            _ => match scale_sentence_with_precision(&normalized, multiplier, precision) {
                Ok(scaled) => scaled,
                Err(e) => {
                    debug!("Keeping ingredient '{}' as is: {}", line, e);
                    return line.to_string();
                }
            },
        };

        if self.config.fraction_output {
            replace_decimal_fractions(&scaled)
        } else {
            scaled
        }
    }

    /// Scale every ingredient line, in parallel for long lists. The output
    /// keeps the input order.
    pub fn scale_ingredients(&self, lines: &[String], multiplier: f64) -> Vec<String> {
        if lines.len() >= self.config.parallel_threshold {
            debug!("Scaling {} ingredients in parallel", lines.len());
            lines
                .par_iter()
                .map(|line| self.scale_ingredient(line, multiplier))
                .collect()
        } else {
            lines
                .iter()
                .map(|line| self.scale_ingredient(line, multiplier))
                .collect()
        }
    }

    /// Scale a recipe from one yield to another, then normalise the symbols
    /// of every field. A zero or negative source yield leaves the recipe
    /// unchanged.
    pub fn scale_recipe(&self, recipe: &RecipeText, from_yield: f64, to_yield: f64) -> RecipeText {
        if from_yield <= 0.0 {
            debug!("Not scaling recipe with a yield of {}", from_yield);
            return recipe.clone();
        }

        let multiplier = to_yield / from_yield;
        info!(
            "Scaling recipe from {} to {} servings (x{})",
            from_yield, to_yield, multiplier
        );

        RecipeText {
            ingredients: self.scale_ingredients(&recipe.ingredients, multiplier),
            ..recipe.clone()
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence_tokenizer::SentenceSpan;

    fn sample_recipe() -> RecipeText {
        RecipeText {
            description: "A quick loaf. Bake at 350°F.".to_string(),
            ingredients: vec![
                "1 cup butter".to_string(),
                "2 eggs".to_string(),
                "1/3 cup sugar".to_string(),
            ],
            instructions: vec!["Preheat the oven to 350°F. Mix well.".to_string()],
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ConverterConfig {
            parallel_threshold: 0,
            ..Default::default()
        };
        assert!(Converter::new(config).is_err());
    }

    #[test]
    fn test_convert_recipe() {
        let converted = Converter::default()
            .convert_recipe(&sample_recipe(), System::Metric)
            .unwrap();

        assert_eq!(converted.description, "A quick loaf. Bake at 177 °C.");
        assert_eq!(
            converted.ingredients,
            vec!["2.37 dl butter", "2 eggs", "78.86 ml sugar"]
        );
        assert_eq!(
            converted.instructions,
            vec!["Preheat the oven to 177 °C. Mix well."]
        );
    }

    #[test]
    fn test_convert_recipe_errors() {
        let converter = Converter::default();

        assert_eq!(
            converter.convert_recipe(&sample_recipe(), System::Imperial),
            Err(ConversionError::UnchangedSystem {
                system: System::Imperial
            })
        );

        let unitless = RecipeText {
            ingredients: vec!["2 eggs".to_string(), "salt".to_string()],
            ..Default::default()
        };
        assert_eq!(
            converter.convert_recipe(&unitless, System::Metric),
            Err(ConversionError::UndetectableSystem)
        );
    }

    #[test]
    fn test_scale_ingredient() {
        let converter = Converter::default();
        let cases = vec![
            ("1 cup flour", 2.0, "2 cups flour"),
            ("3/4 cup sugar", 2.0, "1 1/2 cups sugar"),
            ("½ tsp salt", 2.0, "1 tsp salt"),
            ("500 g butter", 2.0, "1 kg butter"),
            ("2 lb chicken", 0.25, "8 oz chicken"),
            ("4 3/4 cups of tea", 2.0, "9 1/2 cups of tea"),
            ("3 eggs", 2.0, "6 eggs"),
            ("1/2 watermelon", 2.0, "1 watermelon"),
            ("1/2 to 1 cup milk", 2.0, "1 to 2 cups milk"),
            ("1 1/2 to 2 cups flour", 2.0, "3 to 4 cups flour"),
            ("Two eggs", 2.0, "4 eggs"),
            ("A dozen eggs", 0.5, "6 eggs"),
            ("One lemon, zested", 0.5, "1/2 lemon, zested"),
            ("salt to taste", 2.0, "salt to taste"),
        ];

        for (line, multiplier, expected) in cases {
            assert_eq!(
                converter.scale_ingredient(line, multiplier),
                expected,
                "line '{line}' x{multiplier}"
            );
        }
    }

    #[test]
    fn test_scale_ingredient_without_fraction_output() {
        let config = ConverterConfig {
            fraction_output: false,
            ..Default::default()
        };
        let converter = Converter::new(config).unwrap();
        assert_eq!(converter.scale_ingredient("3/4 cup sugar", 2.0), "1.5 cups sugar");
    }

    #[test]
    fn test_scale_ingredients_parallel_keeps_order() {
        let config = ConverterConfig {
            parallel_threshold: 1,
            ..Default::default()
        };
        let converter = Converter::new(config).unwrap();
        let lines: Vec<String> = (1..=40).map(|n| format!("{n} eggs")).collect();

        let scaled = converter.scale_ingredients(&lines, 3.0);

        let expected: Vec<String> = (1..=40).map(|n| format!("{} eggs", n * 3)).collect();
        assert_eq!(scaled, expected);
    }

    #[test]
    fn test_scale_recipe() {
        let converter = Converter::default();
        let recipe = sample_recipe();

        let doubled = converter.scale_recipe(&recipe, 4.0, 8.0);
        assert_eq!(doubled.ingredients[0], "2 cups butter");
        assert_eq!(doubled.ingredients[1], "4 eggs");
        assert_eq!(doubled.instructions, recipe.instructions);
        assert_eq!(doubled.description, recipe.description);

        assert_eq!(converter.scale_recipe(&recipe, 0.0, 8.0), recipe);
        assert_eq!(converter.scale_recipe(&recipe, -2.0, 8.0), recipe);
    }

    #[test]
    fn test_scale_recipe_normalizes_symbols() {
        let recipe = RecipeText {
            description: "Bake at 180 °c.".to_string(),
            ingredients: vec!["Two eggs".to_string(), "1/2 watermelon".to_string()],
            instructions: vec!["Whisk in 15 ml water, then 1l stock.".to_string()],
        };

        let doubled = Converter::default().scale_recipe(&recipe, 2.0, 4.0);

        assert_eq!(doubled.description, "Bake at 180 °C.");
        assert_eq!(doubled.ingredients, vec!["4 eggs", "1 watermelon"]);
        assert_eq!(
            doubled.instructions,
            vec!["Whisk in 15 mL water, then 1L stock."]
        );
    }

    #[test]
    fn test_recipe_text_normalized() {
        let recipe = RecipeText {
            description: "Makes 2l.".to_string(),
            ingredients: vec!["250 ml milk".to_string()],
            instructions: vec!["Heat to 90 °c.".to_string()],
        };

        let normalized = recipe.normalized();
        assert_eq!(normalized.description, "Makes 2L.");
        assert_eq!(normalized.ingredients, vec!["250 mL milk"]);
        assert_eq!(normalized.instructions, vec!["Heat to 90 °C."]);
        assert_eq!(normalized.normalized(), normalized);
    }

    struct LineTokenizer;

    impl SentenceTokenizer for LineTokenizer {
        fn tokenize<'a>(&self, paragraph: &'a str) -> Vec<SentenceSpan<'a>> {
            let mut start = 0;
            paragraph
                .split_inclusive('\n')
                .map(|text| {
                    let span = SentenceSpan {
                        text,
                        start,
                        end: start + text.len(),
                    };
                    start = span.end;
                    span
                })
                .collect()
        }
    }

    #[test]
    fn test_custom_tokenizer() {
        let converter =
            Converter::with_tokenizer(ConverterConfig::default(), Arc::new(LineTokenizer)).unwrap();

        let converted =
            converter.convert_paragraph("1 cup milk\n2 tbsp oil", System::Imperial, System::Metric);
        assert_eq!(converted, "2.37 dl milk\n29.57 ml oil");
    }
}
