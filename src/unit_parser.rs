//! # Unit Parser Module
//!
//! Maps free-text unit tokens (abbreviations, plurals, symbols) onto the
//! [`Unit`] catalog and builds measurements out of raw ingredient text.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::{debug, trace};

use crate::conversion_errors::{ConversionError, ConversionResult};
use crate::fractions::sum_quantities;
use crate::measurement_patterns::{DIGIT_REGEX, UNIT_REGEX};
use crate::measurement_types::{Measurement, Unit};

// Every accepted spelling, already lowercased and singular
const UNIT_SYNONYMS: &[(&str, Unit)] = &[
    ("°c", Unit::Celsius),
    ("c", Unit::Celsius),
    ("celsius", Unit::Celsius),
    ("degrees celsius", Unit::Celsius),
    ("degree celsius", Unit::Celsius),
    ("degrees c", Unit::Celsius),
    ("degree c", Unit::Celsius),
    ("cm", Unit::Centimeter),
    ("centimeter", Unit::Centimeter),
    ("centimetre", Unit::Centimeter),
    ("cup", Unit::Cup),
    ("dl", Unit::Decilitre),
    ("deciliter", Unit::Decilitre),
    ("decilitre", Unit::Decilitre),
    ("°f", Unit::Fahrenheit),
    ("f", Unit::Fahrenheit),
    ("fahrenheit", Unit::Fahrenheit),
    ("farenheit", Unit::Fahrenheit),
    ("degrees fahrenheit", Unit::Fahrenheit),
    ("degree fahrenheit", Unit::Fahrenheit),
    ("degrees farenheit", Unit::Fahrenheit),
    ("degree farenheit", Unit::Fahrenheit),
    ("degrees f", Unit::Fahrenheit),
    ("degree f", Unit::Fahrenheit),
    ("foot", Unit::Feet),
    ("feet", Unit::Feet),
    ("ft", Unit::Feet),
    ("′", Unit::Feet),
    ("fluid ounce", Unit::FlOz),
    ("fluid oz", Unit::FlOz),
    ("fl oz", Unit::FlOz),
    ("fl. oz", Unit::FlOz),
    ("fl.oz", Unit::FlOz),
    ("floz", Unit::FlOz),
    ("gallon", Unit::Gallon),
    ("gal", Unit::Gallon),
    ("g", Unit::Gram),
    ("gram", Unit::Gram),
    ("gramme", Unit::Gram),
    ("inch", Unit::Inch),
    ("inche", Unit::Inch),
    ("in", Unit::Inch),
    ("\"", Unit::Inch),
    ("”", Unit::Inch),
    ("kg", Unit::Kilogram),
    ("kilogram", Unit::Kilogram),
    ("kilogramme", Unit::Kilogram),
    ("l", Unit::Litre),
    ("litre", Unit::Litre),
    ("liter", Unit::Litre),
    ("m", Unit::Meter),
    ("meter", Unit::Meter),
    ("metre", Unit::Meter),
    ("mg", Unit::Milligram),
    ("milligram", Unit::Milligram),
    ("milligramme", Unit::Milligram),
    ("ml", Unit::Millilitre),
    ("milliliter", Unit::Millilitre),
    ("millilitre", Unit::Millilitre),
    ("cc", Unit::Millilitre),
    ("mm", Unit::Millimeter),
    ("millimeter", Unit::Millimeter),
    ("millimetre", Unit::Millimeter),
    ("ounce", Unit::Ounce),
    ("oz", Unit::Ounce),
    ("pint", Unit::Pint),
    ("pt", Unit::Pint),
    ("fl pt", Unit::Pint),
    ("fl. pt", Unit::Pint),
    ("fl.pt", Unit::Pint),
    ("lb", Unit::Pound),
    ("lbs", Unit::Pound),
    ("#", Unit::Pound),
    ("pound", Unit::Pound),
    ("quart", Unit::Quart),
    ("qt", Unit::Quart),
    ("fl qt", Unit::Quart),
    ("fl. qt", Unit::Quart),
    ("fl.qt", Unit::Quart),
    ("tablespoon", Unit::Tablespoon),
    ("tbl", Unit::Tablespoon),
    ("tbs", Unit::Tablespoon),
    ("tb", Unit::Tablespoon),
    ("tbsp", Unit::Tablespoon),
    ("teaspoon", Unit::Teaspoon),
    ("tsp", Unit::Teaspoon),
    ("yard", Unit::Yard),
];

lazy_static! {
    static ref SYNONYM_TABLE: HashMap<&'static str, Unit> =
        UNIT_SYNONYMS.iter().copied().collect();
}

/// Lowercase, collapse inner whitespace, drop leading digits and trailing periods
fn normalize_token(token: &str) -> String {
    let lowered = token.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_end_matches('.')
        .trim()
        .to_string()
}

fn singularize(token: &str) -> Option<&str> {
    if let Some(stem) = token.strip_suffix("ches") {
        return Some(&token[..stem.len() + 2]);
    }
    token.strip_suffix('s')
}

/// Parse a free-text unit token.
///
/// # Examples
///
/// ```rust
/// use recipe_units::measurement_types::Unit;
/// use recipe_units::unit_parser::parse_unit;
///
/// assert_eq!(parse_unit("Tablespoons").unwrap(), Unit::Tablespoon);
/// assert_eq!(parse_unit("fl. oz.").unwrap(), Unit::FlOz);
/// assert!(parse_unit("furlong").is_err());
/// ```
pub fn parse_unit(token: &str) -> ConversionResult<Unit> {
    let normalized = normalize_token(token);

    let unit = SYNONYM_TABLE.get(normalized.as_str()).copied().or_else(|| {
        singularize(&normalized).and_then(|singular| SYNONYM_TABLE.get(singular).copied())
    });

    match unit {
        Some(unit) => {
            trace!("Parsed unit token '{}' as {:?}", token, unit);
            Ok(unit)
        }
        None => {
            debug!("Unrecognized unit token '{}'", token);
            Err(ConversionError::UnrecognizedUnit {
                token: token.to_string(),
            })
        }
    }
}

/// Build a measurement from a piece of ingredient text such as "1 1/2 cups flour".
///
/// All numeric fragments are summed (so mixed numbers work) and the unit is
/// taken from the shared quantity+unit pattern. Text without any quantity
/// yields `Ok(None)`; a quantity without a recognizable unit is an error.
///
/// # Examples
///
/// ```rust
/// use recipe_units::measurement_types::{Measurement, Unit};
/// use recipe_units::unit_parser::parse_measurement_from_text;
///
/// assert_eq!(
///     parse_measurement_from_text("1cup flour").unwrap(),
///     Some(Measurement::new(1.0, Unit::Cup))
/// );
/// assert_eq!(parse_measurement_from_text("").unwrap(), None);
/// ```
pub fn parse_measurement_from_text(s: &str) -> ConversionResult<Option<Measurement>> {
    let spaced = DIGIT_REGEX.replace_all(s, "$0 ");

    let quantity = sum_quantities(&spaced);
    if quantity == 0.0 {
        trace!("No quantity in '{}'", s);
        return Ok(None);
    }

    let caps = UNIT_REGEX
        .captures(s)
        .ok_or(ConversionError::NoMeasurementFound)?;
    let unit = parse_unit(&caps[2])?;

    Ok(Some(Measurement::new(quantity, unit)))
}
