//! # Conversion Table Module
//!
//! Multiplicative factors between every pair of units sharing a dimension.
//!
//! Each unit carries one exact magnitude in its dimension's reference unit
//! (millimetre, milligram, millilitre); the factor from `A` to `B` is
//! `magnitude(A) / magnitude(B)`. Temperature is affine and handled apart.

use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::trace;

use crate::conversion_errors::{ConversionError, ConversionResult};
use crate::measurement_types::{Dimension, Measurement, Unit};

/// Magnitude of a unit in millimetres, milligrams or millilitres (US customary volumes)
fn reference_magnitude(unit: Unit) -> Option<f64> {
    let magnitude = match unit {
        Unit::Millimeter => 1.0,
        Unit::Centimeter => 10.0,
        Unit::Meter => 1_000.0,
        Unit::Inch => 25.4,
        Unit::Feet => 304.8,
        Unit::Yard => 914.4,

        Unit::Milligram => 1.0,
        Unit::Gram => 1_000.0,
        Unit::Kilogram => 1_000_000.0,
        Unit::Ounce => 28_349.523125,
        Unit::Pound => 453_592.37,

        Unit::Millilitre => 1.0,
        Unit::Decilitre => 100.0,
        Unit::Litre => 1_000.0,
        Unit::Teaspoon => 4.928_921_593_75,
        Unit::Tablespoon => 14.786_764_781_25,
        Unit::FlOz => 29.573_529_562_5,
        Unit::Cup => 236.588_236_5,
        Unit::Pint => 473.176_473,
        Unit::Quart => 946.352_946,
        Unit::Gallon => 3_785.411_784,

        Unit::Celsius | Unit::Fahrenheit => return None,
    };
    Some(magnitude)
}

lazy_static! {
    static ref FACTORS: HashMap<(Unit, Unit), f64> = {
        let mut factors = HashMap::new();
        for from in Unit::ALL {
            for to in Unit::ALL {
                if from.dimension() != to.dimension() {
                    continue;
                }
                if let (Some(a), Some(b)) = (reference_magnitude(from), reference_magnitude(to)) {
                    factors.insert((from, to), a / b);
                }
            }
        }
        factors
    };
}

/// Factor such that `quantity_to = quantity_from * factor(from, to)`.
///
/// Returns `None` across dimensions and between temperature units, whose
/// conversion is not multiplicative.
pub fn factor(from: Unit, to: Unit) -> Option<f64> {
    FACTORS.get(&(from, to)).copied()
}

fn convert_temperature(quantity: f64, from: Unit, to: Unit) -> f64 {
    match (from, to) {
        (Unit::Celsius, Unit::Fahrenheit) => (1.8 * quantity + 32.0).round(),
        (Unit::Fahrenheit, Unit::Celsius) => (0.5556 * (quantity - 32.0)).round(),
        _ => quantity,
    }
}

impl Measurement {
    /// Convert to another unit of the same dimension.
    ///
    /// No rounding happens here except for Celsius/Fahrenheit, which round
    /// to the nearest degree in both directions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_units::measurement_types::{Measurement, Unit};
    ///
    /// let grams = Measurement::new(1.0, Unit::Kilogram).convert(Unit::Gram).unwrap();
    /// assert_eq!(grams, Measurement::new(1000.0, Unit::Gram));
    ///
    /// let oven = Measurement::new(200.0, Unit::Celsius).convert(Unit::Fahrenheit).unwrap();
    /// assert_eq!(oven.quantity, 392.0);
    ///
    /// assert!(Measurement::new(1.0, Unit::Cup).convert(Unit::Gram).is_err());
    /// ```
    pub fn convert(&self, to: Unit) -> ConversionResult<Measurement> {
        let incompatible = || ConversionError::IncompatibleUnits {
            from: self.unit,
            to,
        };

        if self.unit.dimension() != to.dimension() {
            return Err(incompatible());
        }

        let quantity = if self.unit.dimension() == Dimension::Temperature {
            convert_temperature(self.quantity, self.unit, to)
        } else {
            self.quantity * factor(self.unit, to).ok_or_else(incompatible)?
        };

        trace!(
            "Converted {} {:?} to {} {:?}",
            self.quantity,
            self.unit,
            quantity,
            to
        );
        Ok(Measurement::new(quantity, to))
    }
}
