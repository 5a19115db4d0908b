//! # Bucketing Module
//!
//! Picks the most readable unit for a magnitude. Two independent threshold
//! tables exist: the scaler's, used after multiplying a quantity for a new
//! recipe yield, and the selector's, used when switching measurement system.
//!
//! Thresholds are physical quantities (`1 cup`, `2 lb`) resolved through the
//! conversion table at lookup time, so they never drift from the factors.

use tracing::trace;

use crate::measurement_types::{Dimension, Measurement, System, Unit};

// Relative slack so that e.g. 3 tsp still reaches the 1 tbsp bucket
const THRESHOLD_EPSILON: f64 = 1e-9;

/// One entry of a threshold table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    /// Smallest magnitude served by this bucket, `None` for the catch-all entry
    pub floor: Option<(f64, Unit)>,
    pub unit: Unit,
}

const fn at_least(quantity: f64, of: Unit, unit: Unit) -> Bucket {
    Bucket {
        floor: Some((quantity, of)),
        unit,
    }
}

const fn otherwise(unit: Unit) -> Bucket {
    Bucket { floor: None, unit }
}

// Fluid ounces are left out so scaled spoon measures stay in spoons
const SCALE_IMPERIAL_VOLUME: &[Bucket] = &[
    at_least(1.0, Unit::Gallon, Unit::Gallon),
    at_least(1.0, Unit::Cup, Unit::Cup),
    at_least(1.0, Unit::Tablespoon, Unit::Tablespoon),
    otherwise(Unit::Teaspoon),
];

const SCALE_METRIC_VOLUME: &[Bucket] = &[
    at_least(1.0, Unit::Litre, Unit::Litre),
    at_least(1.0, Unit::Decilitre, Unit::Decilitre),
    otherwise(Unit::Millilitre),
];

const SCALE_IMPERIAL_MASS: &[Bucket] = &[
    at_least(1.0, Unit::Pound, Unit::Pound),
    otherwise(Unit::Ounce),
];

const SCALE_METRIC_MASS: &[Bucket] = &[
    at_least(1.0, Unit::Kilogram, Unit::Kilogram),
    at_least(1.0, Unit::Gram, Unit::Gram),
    otherwise(Unit::Milligram),
];

const SCALE_IMPERIAL_LENGTH: &[Bucket] = &[
    at_least(1.0, Unit::Yard, Unit::Yard),
    at_least(1.0, Unit::Feet, Unit::Feet),
    otherwise(Unit::Inch),
];

const SCALE_METRIC_LENGTH: &[Bucket] = &[
    at_least(1.0, Unit::Meter, Unit::Meter),
    at_least(1.0, Unit::Centimeter, Unit::Centimeter),
    otherwise(Unit::Millimeter),
];

const SELECT_IMPERIAL_VOLUME: &[Bucket] = &[
    at_least(1.0, Unit::Gallon, Unit::Gallon),
    at_least(1.0, Unit::Quart, Unit::Quart),
    at_least(1.0, Unit::Pint, Unit::Pint),
    at_least(0.5, Unit::Cup, Unit::Cup),
    at_least(1.0, Unit::FlOz, Unit::FlOz),
    at_least(1.0, Unit::Tablespoon, Unit::Tablespoon),
    otherwise(Unit::Teaspoon),
];

const SELECT_IMPERIAL_MASS: &[Bucket] = &[
    at_least(1.0, Unit::Pound, Unit::Pound),
    otherwise(Unit::Ounce),
];

const SELECT_IMPERIAL_LENGTH: &[Bucket] = &[
    at_least(1000.0, Unit::Feet, Unit::Yard),
    at_least(1.0, Unit::Meter, Unit::Feet),
    otherwise(Unit::Inch),
];

const SELECT_METRIC_VOLUME: &[Bucket] = &[
    at_least(1.0, Unit::Litre, Unit::Litre),
    at_least(1.0, Unit::Decilitre, Unit::Decilitre),
    otherwise(Unit::Millilitre),
];

const SELECT_METRIC_MASS: &[Bucket] = &[
    at_least(2.0, Unit::Pound, Unit::Kilogram),
    at_least(1.0, Unit::Gram, Unit::Gram),
    otherwise(Unit::Milligram),
];

const SELECT_METRIC_LENGTH: &[Bucket] = &[
    at_least(1.0, Unit::Meter, Unit::Meter),
    at_least(1.0, Unit::Inch, Unit::Centimeter),
    otherwise(Unit::Millimeter),
];

const SELECT_FAHRENHEIT: &[Bucket] = &[otherwise(Unit::Fahrenheit)];
const SELECT_CELSIUS: &[Bucket] = &[otherwise(Unit::Celsius)];

/// Scaler thresholds for a dimension within a system. Temperature has none.
pub fn scale_table(dimension: Dimension, system: System) -> &'static [Bucket] {
    match (dimension, system) {
        (Dimension::Volume, System::Imperial) => SCALE_IMPERIAL_VOLUME,
        (Dimension::Volume, System::Metric) => SCALE_METRIC_VOLUME,
        (Dimension::Mass, System::Imperial) => SCALE_IMPERIAL_MASS,
        (Dimension::Mass, System::Metric) => SCALE_METRIC_MASS,
        (Dimension::Length, System::Imperial) => SCALE_IMPERIAL_LENGTH,
        (Dimension::Length, System::Metric) => SCALE_METRIC_LENGTH,
        _ => &[],
    }
}

/// Selector thresholds used when moving a dimension into `target`
pub fn select_table(dimension: Dimension, target: System) -> &'static [Bucket] {
    match (dimension, target) {
        (Dimension::Volume, System::Imperial) => SELECT_IMPERIAL_VOLUME,
        (Dimension::Volume, System::Metric) => SELECT_METRIC_VOLUME,
        (Dimension::Mass, System::Imperial) => SELECT_IMPERIAL_MASS,
        (Dimension::Mass, System::Metric) => SELECT_METRIC_MASS,
        (Dimension::Length, System::Imperial) => SELECT_IMPERIAL_LENGTH,
        (Dimension::Length, System::Metric) => SELECT_METRIC_LENGTH,
        (Dimension::Temperature, System::Imperial) => SELECT_FAHRENHEIT,
        (Dimension::Temperature, System::Metric) => SELECT_CELSIUS,
        (_, System::Invalid) => &[],
    }
}

fn reaches(m: &Measurement, floor: (f64, Unit)) -> bool {
    match Measurement::new(floor.0, floor.1).convert(m.unit) {
        Ok(threshold) => m.quantity >= threshold.quantity * (1.0 - THRESHOLD_EPSILON),
        Err(_) => false,
    }
}

/// Convert `m` into the unit of the first bucket whose floor it reaches.
///
/// An empty table, or a bucket that cannot hold the dimension, leaves the
/// measurement as it is.
pub fn rebucket(m: &Measurement, table: &[Bucket]) -> Measurement {
    let bucket = table
        .iter()
        .find(|bucket| bucket.floor.map_or(true, |floor| reaches(m, floor)));

    match bucket {
        Some(bucket) => m.convert(bucket.unit).unwrap_or(*m),
        None => *m,
    }
}

impl Measurement {
    /// Multiply the quantity and pick the most readable unit of the same
    /// system for the result. Temperatures are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_units::measurement_types::{Measurement, Unit};
    ///
    /// let doubled = Measurement::new(500.0, Unit::Gram).scale(2.0);
    /// assert_eq!(doubled, Measurement::new(1.0, Unit::Kilogram));
    /// ```
    pub fn scale(&self, multiplier: f64) -> Measurement {
        if self.unit.dimension() == Dimension::Temperature {
            return *self;
        }

        let scaled = Measurement::new(self.quantity * multiplier, self.unit);
        let table = scale_table(self.unit.dimension(), self.unit.system());
        let result = rebucket(&scaled, table);

        trace!("Scaled {:?} by {} to {:?}", self, multiplier, result);
        result
    }
}

/// Move a measurement into the `to` system, picking the conventional unit
/// for its magnitude.
///
/// A measurement already in `to`, or an `Invalid` target, is returned as is.
///
/// # Examples
///
/// ```rust
/// use recipe_units::bucketing::convert_measurement;
/// use recipe_units::measurement_types::{Measurement, System, Unit};
///
/// let metric = convert_measurement(&Measurement::new(1.0, Unit::Cup), System::Metric);
/// assert_eq!(metric.unit, Unit::Decilitre);
/// assert_eq!(metric.format(), "2.37 dl");
/// ```
pub fn convert_measurement(m: &Measurement, to: System) -> Measurement {
    if to == System::Invalid || m.unit.system() == to {
        return *m;
    }

    let result = rebucket(m, select_table(m.unit.dimension(), to));
    trace!("Converted {:?} to the {} system as {:?}", m, to, result);
    result
}
