//! # Measurement Patterns Module
//!
//! This module contains the regex patterns shared by the unit parser, the
//! sentence converter and the system detector.

use lazy_static::lazy_static;
use regex::Regex;

// Quantity (plain, decimal, fraction, mixed, hyphenated or "x to y" range) in group 1,
// unit token in group 2
pub const UNIT_PATTERN: &str = r#"(?i)((?:(?:\d+\s+)?\d+/\d+\s*to\s*|\d*\.?\d+\s*to\s*)?(?:\d*\s*\d+/)?(?:\d+-\d*/?)?\d*\.?\d+)-?\s*(centimeters?|centimetres?|cm\b|cups?|deciliters?|decilitres?|dl\b|feet|foot|ft\.?\b|′|fluid\s*ounces?|fl\.?\s*oz\.*|fluid\s*oz\.?|gallons?|gals?\b|milliliters?|millilitres?|ml\b|cc\b|millimeters?|millimetres?|mm\b|grams?|grammes?|\d*g\b|inches|inch|in\b|["”]|kilograms?|kilogrammes?|kg|milligrams?|milligrammes?|mg\b|meters?|metres?|m\b|ounces?|oz\.?|pints?|fl\.?\s*pt\.?|pt\.?|pounds?|lbs?\.?\b|lb\.?\b|#|quarts?|fl\.?\s*qt\.?|qt\.?\b|liters?|litres?|l\b|tablespoons?|tbsp\.?\w*|tbs\b|tbl\b|tb\b|teaspoons?|tsp\.?\w*|yards?|degrees?\s*celsius|degrees?\s*c\b|celsius|°?c\b|degrees?\s*fahrenheit|degrees?\s*farenheit|degrees?\s*f\b|fahrenheit|°?f\b)"#;

// Imperial vocabulary; a unit only counts when it follows a number
pub const IMPERIAL_PATTERN: &str = r#"(?i)\d\s*-?\s*(?:cups?|feet|foot|ft\.?\b|′|fluid\s*ounces?|fl\.?\s*oz\.*|fluid\s*oz\.?|gallons?|gals?\b|inches|inch|in\b|["”]|ounces?|oz\.?|pints?|fl\.?\s*pt\.?|pt\.?\b|pounds?|lbs?\.?\b|lb\.?\b|#|quarts?|fl\.?\s*qt\.?|qt\.?\b|tablespoons?|tbsp\.?\w*|tbs\b|tbl\b|tb\b|teaspoons?|tsp\.?\w*|yards?|degrees?\s*fahrenheit|degrees?\s*farenheit|degrees?\s*f\b|fahrenheit|°?f\b)"#;

// Metric vocabulary; disjoint from the imperial one
pub const METRIC_PATTERN: &str = r#"(?i)\d\s*-?\s*(?:centimeters?|centimetres?|cm\b|deciliters?|decilitres?|dl\b|millimeters?|millimetres?|mm\b|grams?|grammes?|g\b|kilograms?|kilogrammes?|kg\b|milligrams?|milligrammes?|mg\b|meters?|metres?|m\b|milliliters?|millilitres?|ml\b|cc\b|liters?|litres?|l\b|degrees?\s*celsius|degrees?\s*c\b|celsius|°?c\b)"#;

// Mixed numbers ("4 3/4") or a single number/fraction ("1.5", "41/3")
pub const DIGIT_PATTERN: &str = r"(\b\d+\s+\d+/\d+\b)|(\d+\.?/?\d*)";

// Whole part in group 1 (may be empty), decimals in group 2
pub const DECIMAL_PATTERN: &str = r"(\d*)\.(\d+)\b";

// Litre and temperature symbols directly after a number, e.g. "1l", "15 ml", "180 °c"
pub const QUANTITY_PATTERN: &str = r"(?i)\d+\s*((ml|l\b)(°[cf])?|°[cf])";

// A word opening a line, optionally after "a" ("Two eggs", "A dozen eggs")
pub const LEADING_WORD_PATTERN: &str = r"(?i)^(?:a\s+)?([a-z]+)\b";

// Lazy static regexes to avoid recompilation
lazy_static! {
    pub static ref UNIT_REGEX: Regex =
        Regex::new(UNIT_PATTERN).expect("Unit pattern should be valid");
    pub static ref IMPERIAL_REGEX: Regex =
        Regex::new(IMPERIAL_PATTERN).expect("Imperial pattern should be valid");
    pub static ref METRIC_REGEX: Regex =
        Regex::new(METRIC_PATTERN).expect("Metric pattern should be valid");
    pub static ref DIGIT_REGEX: Regex =
        Regex::new(DIGIT_PATTERN).expect("Digit pattern should be valid");
    pub static ref DECIMAL_REGEX: Regex =
        Regex::new(DECIMAL_PATTERN).expect("Decimal pattern should be valid");
    pub static ref QUANTITY_REGEX: Regex =
        Regex::new(QUANTITY_PATTERN).expect("Quantity pattern should be valid");
    pub static ref LEADING_WORD_REGEX: Regex =
        Regex::new(LEADING_WORD_PATTERN).expect("Leading word pattern should be valid");
}
