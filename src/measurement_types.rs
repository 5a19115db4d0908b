//! # Measurement Types Module
//!
//! This module defines the unit catalog and the core value types used by the
//! conversion engine: [`Unit`], [`Dimension`], [`System`] and [`Measurement`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::fractions::format_quantity;

/// Decimal places used when rendering a measurement
pub const DEFAULT_PRECISION: usize = 2;

/// Physical quantity category within which conversion is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Temperature,
    Length,
    Mass,
    Volume,
}

/// Measurement system, used both as a conversion target and as a
/// classification result for a sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum System {
    Imperial,
    Metric,
    /// Unparseable or indeterminate
    #[default]
    Invalid,
}

impl System {
    /// Lowercase name of the system
    pub fn as_str(&self) -> &'static str {
        match self {
            System::Imperial => "imperial",
            System::Metric => "metric",
            System::Invalid => "invalid",
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for System {
    type Err = Infallible;

    /// Parses "imperial" or "metric" in any case; anything else is `Invalid`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "imperial" => System::Imperial,
            "metric" => System::Metric,
            _ => System::Invalid,
        })
    }
}

/// Every unit known to the conversion engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Celsius,
    Centimeter,
    Cup,
    Decilitre,
    Fahrenheit,
    Feet,
    FlOz,
    Gallon,
    Gram,
    Inch,
    Kilogram,
    Litre,
    Meter,
    Milligram,
    Millilitre,
    Millimeter,
    Ounce,
    Pint,
    Pound,
    Quart,
    Tablespoon,
    Teaspoon,
    Yard,
}

impl Unit {
    /// The complete catalog, in declaration order
    pub const ALL: [Unit; 23] = [
        Unit::Celsius,
        Unit::Centimeter,
        Unit::Cup,
        Unit::Decilitre,
        Unit::Fahrenheit,
        Unit::Feet,
        Unit::FlOz,
        Unit::Gallon,
        Unit::Gram,
        Unit::Inch,
        Unit::Kilogram,
        Unit::Litre,
        Unit::Meter,
        Unit::Milligram,
        Unit::Millilitre,
        Unit::Millimeter,
        Unit::Ounce,
        Unit::Pint,
        Unit::Pound,
        Unit::Quart,
        Unit::Tablespoon,
        Unit::Teaspoon,
        Unit::Yard,
    ];

    /// Canonical display symbol (e.g. "mL", "°C", "cup")
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Centimeter => "cm",
            Unit::Cup => "cup",
            Unit::Decilitre => "dL",
            Unit::Fahrenheit => "°F",
            Unit::Feet => "feet",
            Unit::FlOz => "fl oz",
            Unit::Gallon => "gallon",
            Unit::Gram => "g",
            Unit::Inch => "inch",
            Unit::Kilogram => "kg",
            Unit::Litre => "L",
            Unit::Meter => "m",
            Unit::Milligram => "mg",
            Unit::Millilitre => "mL",
            Unit::Millimeter => "mm",
            Unit::Ounce => "oz",
            Unit::Pint => "pint",
            Unit::Pound => "lb",
            Unit::Quart => "fl qt",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
            Unit::Yard => "yard",
        }
    }

    /// Symbol used when the rendered quantity is greater than one.
    ///
    /// Abbreviations do not take an "s"; the mixed-case metric volume
    /// abbreviations fall back to lowercase in the plural ("2 ml", "3 dl").
    pub fn plural(&self) -> &'static str {
        match self {
            Unit::Cup => "cups",
            Unit::Gallon => "gallons",
            Unit::Inch => "inches",
            Unit::Pint => "pints",
            Unit::Yard => "yards",
            Unit::Decilitre => "dl",
            Unit::Millilitre => "ml",
            _ => self.symbol(),
        }
    }

    /// Whether the symbol stays the same in the plural (e.g. "°C", "kg")
    pub fn is_plural_invariant(&self) -> bool {
        self.plural() == self.symbol()
    }

    /// Physical dimension the unit measures
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Celsius | Unit::Fahrenheit => Dimension::Temperature,
            Unit::Centimeter
            | Unit::Feet
            | Unit::Inch
            | Unit::Meter
            | Unit::Millimeter
            | Unit::Yard => Dimension::Length,
            Unit::Gram | Unit::Kilogram | Unit::Milligram | Unit::Ounce | Unit::Pound => {
                Dimension::Mass
            }
            Unit::Cup
            | Unit::Decilitre
            | Unit::FlOz
            | Unit::Gallon
            | Unit::Litre
            | Unit::Millilitre
            | Unit::Pint
            | Unit::Quart
            | Unit::Tablespoon
            | Unit::Teaspoon => Dimension::Volume,
        }
    }

    /// Measurement system the unit belongs to
    pub fn system(&self) -> System {
        match self {
            Unit::Celsius
            | Unit::Centimeter
            | Unit::Decilitre
            | Unit::Gram
            | Unit::Kilogram
            | Unit::Litre
            | Unit::Meter
            | Unit::Milligram
            | Unit::Millilitre
            | Unit::Millimeter => System::Metric,
            _ => System::Imperial,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A physical measurement consisting of a quantity and a unit.
///
/// Every operation returns a new value. Zero and negative quantities are
/// accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub quantity: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(quantity: f64, unit: Unit) -> Self {
        Self { quantity, unit }
    }

    /// Render as "<quantity> <unit>" with two decimal places
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_units::measurement_types::{Measurement, Unit};
    ///
    /// assert_eq!(Measurement::new(3.0, Unit::Cup).format(), "3 cups");
    /// assert_eq!(Measurement::new(3.1, Unit::Kilogram).format(), "3.1 kg");
    /// assert_eq!(Measurement::new(1.0, Unit::Cup).format(), "1 cup");
    /// ```
    pub fn format(&self) -> String {
        self.format_with_precision(DEFAULT_PRECISION)
    }

    /// Render with a custom number of decimal places.
    ///
    /// The unit is pluralized when the quantity rounded to one decimal
    /// exceeds one.
    pub fn format_with_precision(&self, precision: usize) -> String {
        let unit = if (self.quantity * 10.0).round() / 10.0 > 1.0 {
            self.unit.plural()
        } else {
            self.unit.symbol()
        };
        format!("{} {}", format_quantity(self.quantity, precision), unit)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
