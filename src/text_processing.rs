//! # Text Processing Module
//!
//! This module converts measurements embedded in free-form recipe text
//! between the Imperial and Metric systems while leaving the surrounding
//! prose untouched.
//!
//! ## Features
//!
//! - Measurement detection with byte positions, line by line
//! - Sentence conversion, including irregular quantities such as ranges
//!   ("2 to 3 pounds"), mixed numbers ("5 1/3 tbsp") and hyphenated
//!   fractions ("1-3/4 cups")
//! - Sentence scaling with the same range handling
//! - Paragraph conversion through a pluggable [`SentenceTokenizer`]
//! - Measurement system detection and quantity symbol normalisation

use std::ops::Range;

use tracing::{debug, trace};

use crate::bucketing::convert_measurement;
use crate::conversion_errors::{ConversionError, ConversionResult};
use crate::fractions::{format_quantity, parse_fraction, replace_vulgar_fractions};
use crate::measurement_patterns::{IMPERIAL_REGEX, METRIC_REGEX, QUANTITY_REGEX, UNIT_REGEX};
use crate::measurement_types::{Measurement, System, Unit, DEFAULT_PRECISION};
use crate::sentence_tokenizer::SentenceTokenizer;
use crate::unit_parser::parse_unit;

/// Represents a detected measurement in text
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementMatch {
    /// The matched measurement text (e.g., "2 cups", "1-3/4 cups")
    pub text: String,
    /// The quantity part of the match (e.g., "2", "2 to 3")
    pub quantity: String,
    /// The parsed unit
    pub unit: Unit,
    /// The line number where the measurement was found
    pub line_number: usize,
    /// The starting byte position in the line
    pub start_pos: usize,
    /// The ending byte position in the line
    pub end_pos: usize,
}

/// Find every measurement with a recognized unit, line by line.
///
/// # Examples
///
/// ```rust
/// use recipe_units::measurement_types::Unit;
/// use recipe_units::text_processing::find_measurements;
///
/// let matches = find_measurements("Mix 2 cups flour\nwith 1 tbsp sugar");
///
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[0].text, "2 cups");
/// assert_eq!(matches[0].unit, Unit::Cup);
/// assert_eq!(matches[1].line_number, 1);
/// ```
pub fn find_measurements(text: &str) -> Vec<MeasurementMatch> {
    let mut matches = Vec::new();

    for (line_number, line) in text.lines().enumerate() {
        trace!("Processing line {}: '{}'", line_number, line);

        for caps in UNIT_REGEX.captures_iter(line) {
            let (Some(full), Some(quantity), Some(token)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            match parse_unit(token.as_str()) {
                Ok(unit) => matches.push(MeasurementMatch {
                    text: full.as_str().to_string(),
                    quantity: quantity.as_str().to_string(),
                    unit,
                    line_number,
                    start_pos: full.start(),
                    end_pos: full.end(),
                }),
                Err(e) => debug!("Skipping '{}' on line {}: {}", full.as_str(), line_number, e),
            }
        }
    }

    debug!("Found {} measurement matches in text", matches.len());
    matches
}

/// Check if the text contains at least one convertible measurement
pub fn has_measurements(text: &str) -> bool {
    !find_measurements(text).is_empty()
}

/// One fragment of an irregular quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityPart<'a> {
    /// A plain integer or decimal
    Number(f64),
    /// An `a/b` fraction, possibly folded with a preceding whole number
    Fraction(f64),
    /// Anything else, such as "to" in "2 to 3", kept as written
    Verbatim(&'a str),
}

impl QuantityPart<'_> {
    fn value(&self) -> Option<f64> {
        match self {
            QuantityPart::Number(value) | QuantityPart::Fraction(value) => Some(*value),
            QuantityPart::Verbatim(_) => None,
        }
    }
}

type PartStrategy = for<'a> fn(&'a str) -> Option<QuantityPart<'a>>;

fn number_part(fragment: &str) -> Option<QuantityPart<'_>> {
    fragment.parse::<f64>().ok().map(QuantityPart::Number)
}

fn fraction_part(fragment: &str) -> Option<QuantityPart<'_>> {
    if !fragment.contains('/') {
        return None;
    }
    parse_fraction(fragment).map(QuantityPart::Fraction)
}

// Tried in order; a fragment no strategy accepts is kept verbatim
const PART_STRATEGIES: [PartStrategy; 2] = [number_part, fraction_part];

/// Classify one fragment of an irregular quantity
pub fn classify_part(fragment: &str) -> QuantityPart<'_> {
    PART_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(fragment))
        .unwrap_or(QuantityPart::Verbatim(fragment))
}

/// A classified fragment and whether a hyphen joined it to the previous one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPart<'a> {
    pub part: QuantityPart<'a>,
    pub hyphen_before: bool,
}

/// Split an irregular quantity on whitespace and hyphens and classify each
/// fragment. A fraction directly after a whole number is folded into it, so
/// "1-3/4" and "5 1/3" become single mixed numbers.
///
/// # Examples
///
/// ```rust
/// use recipe_units::text_processing::{split_quantity, QuantityPart};
///
/// let parts: Vec<_> = split_quantity("2 to 3").into_iter().map(|p| p.part).collect();
/// assert_eq!(
///     parts,
///     vec![QuantityPart::Number(2.0), QuantityPart::Verbatim("to"), QuantityPart::Number(3.0)]
/// );
///
/// let parts: Vec<_> = split_quantity("1-3/4").into_iter().map(|p| p.part).collect();
/// assert_eq!(parts, vec![QuantityPart::Fraction(1.75)]);
/// ```
pub fn split_quantity(quantity: &str) -> Vec<SplitPart<'_>> {
    let mut parts: Vec<SplitPart> = Vec::new();

    for word in quantity.split_whitespace() {
        for (i, fragment) in word.split('-').enumerate() {
            if fragment.is_empty() {
                continue;
            }

            let mut current = SplitPart {
                part: classify_part(fragment),
                hyphen_before: i > 0,
            };

            if let QuantityPart::Fraction(fraction) = current.part {
                if let Some(SplitPart {
                    part: QuantityPart::Number(whole),
                    hyphen_before,
                }) = parts.last().copied()
                {
                    if whole.fract() == 0.0 {
                        parts.pop();
                        current = SplitPart {
                            part: QuantityPart::Fraction(whole + fraction),
                            hyphen_before,
                        };
                    }
                }
            }

            parts.push(current);
        }
    }

    parts
}

/// Render an irregular quantity. `resolve` maps a raw value onto the
/// measurement it becomes; every numeric part is expressed in the unit
/// resolved for the last one, and only the last carries the unit symbol.
fn render_irregular<F>(quantity: &str, precision: usize, resolve: F) -> ConversionResult<String>
where
    F: Fn(f64) -> Measurement,
{
    let parts = split_quantity(quantity);

    let last_numeric = parts
        .iter()
        .rposition(|p| p.part.value().is_some())
        .ok_or_else(|| ConversionError::UnparseableQuantity {
            quantity: quantity.to_string(),
        })?;

    let last_value = parts[last_numeric].part.value().unwrap_or_default();
    let target = resolve(last_value).unit;

    let mut output = String::new();
    for (i, split) in parts.iter().enumerate() {
        if i > 0 {
            output.push(if split.hyphen_before { '-' } else { ' ' });
        }

        match split.part {
            QuantityPart::Number(value) | QuantityPart::Fraction(value) => {
                let rendered = resolve(value).convert(target)?;
                if i == last_numeric {
                    output.push_str(&rendered.format_with_precision(precision));
                } else {
                    output.push_str(&format_quantity(rendered.quantity, precision));
                }
            }
            QuantityPart::Verbatim(text) => output.push_str(text),
        }
    }

    trace!("Rendered irregular quantity '{}' as '{}'", quantity, output);
    Ok(output)
}

// Byte span, quantity text and unit of the first quantity+unit match
fn first_measurement(sentence: &str) -> ConversionResult<(Range<usize>, &str, Unit)> {
    let caps = UNIT_REGEX
        .captures(sentence)
        .ok_or(ConversionError::NoMeasurementFound)?;
    let (Some(span), Some(quantity), Some(token)) = (caps.get(0), caps.get(1), caps.get(2)) else {
        return Err(ConversionError::NoMeasurementFound);
    };

    let unit = parse_unit(token.as_str())?;
    Ok((span.range(), quantity.as_str(), unit))
}

fn splice(sentence: &str, span: Range<usize>, replacement: &str) -> String {
    let mut output = String::with_capacity(sentence.len() + replacement.len());
    output.push_str(&sentence[..span.start]);
    output.push_str(replacement);
    output.push_str(&sentence[span.end..]);
    output
}

/// Convert the first measurement of a sentence from one system to another,
/// rendering quantities with two decimals.
///
/// # Examples
///
/// ```rust
/// use recipe_units::measurement_types::System;
/// use recipe_units::text_processing::convert_sentence;
///
/// let converted = convert_sentence("1 cup butter", System::Imperial, System::Metric).unwrap();
/// assert_eq!(converted, "2.37 dl butter");
///
/// assert!(convert_sentence("1 cup butter", System::Metric, System::Metric).is_err());
/// ```
pub fn convert_sentence(input: &str, from: System, to: System) -> ConversionResult<String> {
    convert_sentence_with_precision(input, from, to, DEFAULT_PRECISION)
}

/// Convert the first measurement of a sentence, rendering quantities with
/// `precision` decimals. Only the matched span changes; vulgar fraction
/// glyphs are spelled out as `a/b`.
///
/// A first match whose unit does not belong to `from` (such as "2 c." read
/// as Celsius in an Imperial sentence) is reported as
/// [`ConversionError::NoMeasurementFound`].
pub fn convert_sentence_with_precision(
    input: &str,
    from: System,
    to: System,
    precision: usize,
) -> ConversionResult<String> {
    if from == to {
        return Err(ConversionError::UnchangedSystem { system: to });
    }

    let sentence = replace_vulgar_fractions(input);
    let (span, quantity, unit) = first_measurement(&sentence)?;

    if unit.system() != from {
        debug!("Unit {:?} in '{}' is not a {} unit", unit, input, from);
        return Err(ConversionError::NoMeasurementFound);
    }

    let replacement = match quantity.parse::<f64>() {
        Ok(value) => {
            convert_measurement(&Measurement::new(value, unit), to).format_with_precision(precision)
        }
        Err(_) => render_irregular(quantity, precision, |value| {
            convert_measurement(&Measurement::new(value, unit), to)
        })?,
    };

    debug!(
        "Converting '{}' from {} to {}: '{}'",
        &sentence[span.clone()],
        from,
        to,
        replacement
    );

    Ok(splice(&sentence, span, &replacement))
}

/// Scale the first measurement of a sentence by `multiplier` and re-bucket
/// it into the most readable unit of its system.
///
/// Ranges and mixed numbers are scaled part by part and share the unit
/// chosen for the last part.
///
/// # Examples
///
/// ```rust
/// use recipe_units::text_processing::scale_sentence;
///
/// assert_eq!(scale_sentence("1 cup flour", 0.25).as_deref(), Ok("4 tbsp flour"));
/// assert_eq!(scale_sentence("1/2 to 1 cup milk", 2.0).as_deref(), Ok("1 to 2 cups milk"));
/// ```
pub fn scale_sentence(input: &str, multiplier: f64) -> ConversionResult<String> {
    scale_sentence_with_precision(input, multiplier, DEFAULT_PRECISION)
}

/// [`scale_sentence`] with a custom number of decimals
pub fn scale_sentence_with_precision(
    input: &str,
    multiplier: f64,
    precision: usize,
) -> ConversionResult<String> {
    let sentence = replace_vulgar_fractions(input);
    let (span, quantity, unit) = first_measurement(&sentence)?;

    let replacement = match quantity.parse::<f64>() {
        Ok(value) => Measurement::new(value, unit)
            .scale(multiplier)
            .format_with_precision(precision),
        Err(_) => render_irregular(quantity, precision, |value| {
            Measurement::new(value, unit).scale(multiplier)
        })?,
    };

    debug!(
        "Scaling '{}' x{}: '{}'",
        &sentence[span.clone()],
        multiplier,
        replacement
    );

    Ok(splice(&sentence, span, &replacement))
}

/// Convert every sentence of a paragraph. Sentences that cannot be converted
/// are kept exactly as written, so this never fails.
pub fn convert_paragraph<T>(tokenizer: &T, paragraph: &str, from: System, to: System) -> String
where
    T: SentenceTokenizer + ?Sized,
{
    convert_paragraph_with_precision(tokenizer, paragraph, from, to, DEFAULT_PRECISION)
}

/// [`convert_paragraph`] with a custom number of decimals
pub fn convert_paragraph_with_precision<T>(
    tokenizer: &T,
    paragraph: &str,
    from: System,
    to: System,
    precision: usize,
) -> String
where
    T: SentenceTokenizer + ?Sized,
{
    let spans = tokenizer.tokenize(paragraph);
    let mut output = String::with_capacity(paragraph.len());

    for span in &spans {
        match convert_sentence_with_precision(span.text, from, to, precision) {
            Ok(converted) => output.push_str(&converted),
            Err(e) => {
                debug!("Keeping sentence at {}..{} as is: {}", span.start, span.end, e);
                output.push_str(span.text);
            }
        }
    }

    debug!("Converted paragraph of {} sentences from {} to {}", spans.len(), from, to);
    output
}

/// Classify a sentence by the first unit it uses after a number.
///
/// # Examples
///
/// ```rust
/// use recipe_units::measurement_types::System;
/// use recipe_units::text_processing::detect_system;
///
/// assert_eq!(detect_system("2 cups flour"), System::Imperial);
/// assert_eq!(detect_system("500 g butter"), System::Metric);
/// assert_eq!(detect_system("3 eggs"), System::Invalid);
/// ```
pub fn detect_system(sentence: &str) -> System {
    let imperial = IMPERIAL_REGEX.find(sentence).map(|m| m.start());
    let metric = METRIC_REGEX.find(sentence).map(|m| m.start());

    let system = match (imperial, metric) {
        (Some(i), Some(m)) if m < i => System::Metric,
        (Some(_), _) => System::Imperial,
        (None, Some(_)) => System::Metric,
        (None, None) => System::Invalid,
    };

    trace!("Detected {} system in '{}'", system, sentence);
    system
}

/// Canonical casing for litre and temperature symbols after a number:
/// "1l" becomes "1L", "15 ml" becomes "15 mL", "180 °c" becomes "180 °C".
pub fn normalize_quantities(text: &str) -> String {
    QUANTITY_REGEX
        .replace_all(text, |caps: &regex::Captures| {
            caps[0]
                .chars()
                .map(|c| match c {
                    'l' => 'L',
                    'c' => 'C',
                    'f' => 'F',
                    other => other,
                })
                .collect::<String>()
        })
        .into_owned()
}
