//! # Recipe Units
//!
//! Recognizes quantities and units in free-form recipe text, converts them
//! between the Imperial and Metric systems, rescales them for a new recipe
//! yield and renders them back into the original sentence.

pub mod bucketing;
pub mod conversion_errors;
pub mod conversion_table;
pub mod converter_config;
pub mod fractions;
pub mod measurement_patterns;
pub mod measurement_types;
pub mod recipe_conversion;
pub mod sentence_tokenizer;
pub mod text_processing;
pub mod unit_parser;

// Re-export types for easier access
pub use bucketing::convert_measurement;
pub use conversion_errors::{ConversionError, ConversionResult};
pub use converter_config::ConverterConfig;
pub use fractions::{replace_decimal_fractions, replace_vulgar_fractions};
pub use measurement_types::{Dimension, Measurement, System, Unit};
pub use recipe_conversion::{Converter, RecipeText};
pub use sentence_tokenizer::{SentenceSpan, SentenceTokenizer, UnicodeSentenceTokenizer};
pub use text_processing::{
    convert_paragraph, convert_sentence, detect_system, normalize_quantities, scale_sentence,
    MeasurementMatch,
};
pub use unit_parser::{parse_measurement_from_text, parse_unit};
