//! # Conversion Error Types Module
//!
//! This module defines the error type returned by the conversion engine.
//! Every failure is a distinct variant so callers can tell an unknown unit
//! from a sentence that simply contains nothing to convert.

use thiserror::Error;

use crate::measurement_types::{System, Unit};

/// Errors produced while parsing or converting measurements
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// A unit token matched the measurement pattern but has no known synonym
    #[error("unrecognized unit '{token}'")]
    UnrecognizedUnit { token: String },
    /// Conversion between units of different dimensions
    #[error("cannot convert {from} to {to}: incompatible dimensions")]
    IncompatibleUnits { from: Unit, to: Unit },
    /// Source and target systems are the same
    #[error("sentence is already in the {system} system")]
    UnchangedSystem { system: System },
    /// The text holds no quantity followed by a unit
    #[error("no measurement found")]
    NoMeasurementFound,
    /// None of the parts of a quantity could be converted
    #[error("could not parse quantity '{quantity}'")]
    UnparseableQuantity { quantity: String },
    /// No measurement system could be detected for a recipe
    #[error("could not determine the measurement system")]
    UndetectableSystem,
}

/// Result alias for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
