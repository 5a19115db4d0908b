//! # Fractions Module
//!
//! Text-level helpers for quantities written by hand in recipes:
//!
//! - Unicode vulgar fractions (`½`, `⅓`, ...) to `a/b` text and back from decimals
//! - Fraction-aware summation of numeric fragments ("1 1/2" -> 1.5)
//! - In-place scaling of bare numbers in a line of text
//! - Scaling of a number word opening a line ("Two eggs")
//! - Rendering of quantities with trailing zeros stripped

use tracing::trace;

use crate::measurement_patterns::{DECIMAL_REGEX, DIGIT_REGEX, LEADING_WORD_REGEX};

/// Vulgar fraction glyphs and their `a/b` spelling
const VULGAR_FRACTIONS: [(char, &str); 18] = [
    ('½', "1/2"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅕', "1/5"),
    ('⅖', "2/5"),
    ('⅗', "3/5"),
    ('⅘', "4/5"),
    ('⅙', "1/6"),
    ('⅚', "5/6"),
    ('⅐', "1/7"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
    ('⅑', "1/9"),
    ('⅒', "1/10"),
];

/// Three-digit decimal parts recognised as common kitchen fractions
const DECIMAL_FRACTIONS: [(&str, &str); 19] = [
    ("500", "1/2"),
    ("330", "1/3"),
    ("333", "1/3"),
    ("666", "2/3"),
    ("250", "1/4"),
    ("750", "3/4"),
    ("200", "1/5"),
    ("400", "2/5"),
    ("600", "3/5"),
    ("800", "4/5"),
    ("160", "1/6"),
    ("830", "5/6"),
    ("140", "1/7"),
    ("125", "1/8"),
    ("375", "3/8"),
    ("625", "5/8"),
    ("875", "7/8"),
    ("110", "1/9"),
    ("100", "1/10"),
];

const NUMBER_WORDS: [(&str, f64); 13] = [
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("eleven", 11.0),
    ("twelve", 12.0),
    ("dozen", 12.0),
];

fn vulgar_fraction(c: char) -> Option<&'static str> {
    VULGAR_FRACTIONS
        .iter()
        .find(|(glyph, _)| *glyph == c)
        .map(|(_, fraction)| *fraction)
}

/// Replace every vulgar fraction glyph with its `a/b` form.
///
/// The fraction is separated from its neighbours by a single space, so a
/// glyph glued to a whole number becomes a mixed number. All other text is
/// left as it is.
///
/// # Examples
///
/// ```rust
/// use recipe_units::fractions::replace_vulgar_fractions;
///
/// assert_eq!(replace_vulgar_fractions("1½ cups"), "1 1/2 cups");
/// assert_eq!(replace_vulgar_fractions("¾cup sugar"), "3/4 cup sugar");
/// assert_eq!(replace_vulgar_fractions("2 cups"), "2 cups");
/// ```
pub fn replace_vulgar_fractions(input: &str) -> String {
    if !input.chars().any(|c| vulgar_fraction(c).is_some()) {
        return input.to_string();
    }

    let mut output = String::with_capacity(input.len() + 8);
    let mut pad_next = false;

    for c in input.chars() {
        if let Some(fraction) = vulgar_fraction(c) {
            if !output.is_empty() && !output.ends_with(char::is_whitespace) {
                output.push(' ');
            }
            output.push_str(fraction);
            pad_next = true;
        } else {
            if pad_next && !c.is_whitespace() {
                output.push(' ');
            }
            pad_next = false;
            output.push(c);
        }
    }

    trace!("Replaced vulgar fractions: '{}' -> '{}'", input, output);
    output
}

/// Replace decimal numbers that match a common kitchen fraction with `a/b` text.
///
/// Only the first three decimal places are considered, so "0.333" and
/// "3.33333" both map onto thirds. Decimals with no matching fraction are
/// left untouched.
///
/// # Examples
///
/// ```rust
/// use recipe_units::fractions::replace_decimal_fractions;
///
/// assert_eq!(replace_decimal_fractions("0.5 cup milk"), "1/2 cup milk");
/// assert_eq!(replace_decimal_fractions("6.5 apples"), "6 1/2 apples");
/// assert_eq!(replace_decimal_fractions("2.45 kg"), "2.45 kg");
/// ```
pub fn replace_decimal_fractions(input: &str) -> String {
    DECIMAL_REGEX
        .replace_all(input, |caps: &regex::Captures| {
            let whole = &caps[1];
            let mut decimals: String = caps[2].chars().take(3).collect();
            while decimals.len() < 3 {
                decimals.push('0');
            }

            let Some((_, fraction)) = DECIMAL_FRACTIONS.iter().find(|(d, _)| *d == decimals)
            else {
                return caps[0].to_string();
            };

            match whole.parse::<u64>() {
                Ok(n) if n > 0 => format!("{n} {fraction}"),
                _ => fraction.to_string(),
            }
        })
        .into_owned()
}

/// Parse an `a/b` fragment. A zero denominator is rejected.
pub fn parse_fraction(s: &str) -> Option<f64> {
    let (numerator, denominator) = s.split_once('/')?;
    let numerator: f64 = numerator.trim().parse().ok()?;
    let denominator: f64 = denominator.trim().parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Sum consecutive numeric fragments of a string.
///
/// Fragments are space separated; `a/b` fragments add `a/b`. Text before the
/// first number is skipped and text after it ends the summation.
///
/// # Examples
///
/// ```rust
/// use recipe_units::fractions::sum_quantities;
///
/// assert_eq!(sum_quantities("1 1/2 cups"), 1.5);
/// assert_eq!(sum_quantities("apples 4 1/2"), 4.5);
/// assert_eq!(sum_quantities("no numbers here"), 0.0);
/// ```
pub fn sum_quantities(s: &str) -> f64 {
    let mut sum = 0.0;

    for fragment in s.split(' ').filter(|f| !f.is_empty()) {
        if fragment.contains('/') {
            if let Some(value) = parse_fraction(fragment) {
                sum += value;
            }
            continue;
        }

        match fragment.parse::<f64>() {
            Ok(value) => sum += value,
            Err(_) if sum == 0.0 => continue,
            Err(_) => return sum,
        }
    }

    sum
}

/// Multiply every number, fraction and mixed number of a string in place.
///
/// # Examples
///
/// ```rust
/// use recipe_units::fractions::scale_numbers;
///
/// assert_eq!(scale_numbers("4 3/4 cups of tea", 2.0), "9.5 cups of tea");
/// assert_eq!(scale_numbers("1/2 watermelon", 2.0), "1 watermelon");
/// ```
pub fn scale_numbers(s: &str, multiplier: f64) -> String {
    DIGIT_REGEX
        .replace_all(s, |caps: &regex::Captures| {
            format_quantity(sum_quantities(&caps[0]) * multiplier, 6)
        })
        .into_owned()
}

/// Multiply a number word that opens a line and write the result as digits.
///
/// "a dozen" counts as twelve. Returns `None` when the line does not start
/// with a known number word.
///
/// # Examples
///
/// ```rust
/// use recipe_units::fractions::scale_number_word;
///
/// assert_eq!(scale_number_word("Two eggs", 2.0, 2).as_deref(), Some("4 eggs"));
/// assert_eq!(scale_number_word("A dozen eggs", 0.5, 2).as_deref(), Some("6 eggs"));
/// assert_eq!(scale_number_word("a pinch of salt", 2.0, 2), None);
/// ```
pub fn scale_number_word(s: &str, multiplier: f64, precision: usize) -> Option<String> {
    let caps = LEADING_WORD_REGEX.captures(s)?;
    let (whole, word) = (caps.get(0)?, caps.get(1)?);

    let value = NUMBER_WORDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(word.as_str()))
        .map(|(_, value)| *value)?;

    let scaled = format_quantity(value * multiplier, precision);
    trace!("Scaled number word '{}' to {}", whole.as_str(), scaled);
    Some(format!("{}{}", scaled, &s[whole.end()..]))
}

/// Format a quantity with a fixed number of decimals, then strip trailing
/// zeros and a dangling decimal point.
pub fn format_quantity(quantity: f64, precision: usize) -> String {
    let formatted = format!("{quantity:.precision$}");
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}
