use thiserror::Error;

use crate::error::ParseError;

/// Quantity expressions over unit names, such as `5 ft + 3 in` or
/// `9.81 m/s^2`.
pub mod parser;
/// Dimensions, units and quantities.
pub mod quantity;
/// The built-in table of units and prefixes.
pub mod registry;

pub use quantity::{Dimension, Quantity, Unit};
pub use registry::UnitRegistry;

/// Failures of the unit system.
///
/// These never reach the user: the conversion resolver logs them and falls
/// back to plain arithmetic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// No unit, prefixed unit or plural matches the name.
    #[error("unknown unit '{name}'")]
    UnknownUnit {
        /// The name as written.
        name: String,
    },
    /// The source and target measure different things.
    #[error("cannot convert from '{from}' to '{to}'")]
    IncompatibleDimensions {
        /// Symbol of the source unit.
        from: String,
        /// Symbol of the target unit.
        to:   String,
    },
    /// An offset unit such as `°C` was combined with another unit.
    #[error("'{unit}' has an offset and cannot be combined with other units")]
    OffsetUnit {
        /// Symbol of the offset unit.
        unit: String,
    },
    /// An exponent was not a plain integer, or the resulting unit powers
    /// left the `i32` range.
    #[error("exponent must be a small dimensionless integer")]
    InvalidExponent,
    /// A conversion target carried a magnitude, as in `in 2 m`.
    #[error("conversion target '{target}' must be a unit")]
    ScaledTarget {
        /// The target text.
        target: String,
    },
    /// The quantity text is not a valid expression.
    #[error(transparent)]
    Syntax(#[from] ParseError),
}

/// A collaborator that understands quantities with units.
///
/// The conversion resolver only talks to this trait, so a different unit
/// system can be swapped in without touching the calculator.
pub trait UnitSystem {
    /// A magnitude together with its unit.
    type Quantity;

    /// Builds a quantity from a magnitude and a unit expression, such as
    /// `(72.0, "degF")` or `(3.0, "km/h")`.
    fn quantity(&self, magnitude: f64, unit: &str) -> Result<Self::Quantity, UnitError>;

    /// Parses a free-form quantity expression, such as `5 ft + 3 in`.
    fn parse_quantity(&self, text: &str) -> Result<Self::Quantity, UnitError>;

    /// Converts `quantity` to the unit expression `target`.
    fn convert(&self, quantity: &Self::Quantity, target: &str)
               -> Result<Self::Quantity, UnitError>;

    /// The numeric part of `quantity`.
    fn magnitude(&self, quantity: &Self::Quantity) -> f64;

    /// The compact display symbol of the unit of `quantity`, such as `km/h`.
    fn symbol(&self, quantity: &Self::Quantity) -> String;
}
