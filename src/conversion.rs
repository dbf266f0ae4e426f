use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{
    format::format_number,
    units::{UnitError, UnitSystem},
};

static CONVERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.+?)\s+(?:in|to)\s+(.+)$").expect("conversion pattern is valid")
});

static MAGNITUDE_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?\d+\.?\d*(?:e[+-]?\d+)?)\s*(.+)$").expect("magnitude pattern is valid")
});

/// Spellings of temperature scales mapped to registry names.
const TEMPERATURE_ALIASES: &[(&str, &str)] = &[("fahrenheit", "degF"),
                                               ("farenheit", "degF"),
                                               ("f", "degF"),
                                               ("celsius", "degC"),
                                               ("centigrade", "degC"),
                                               ("c", "degC"),
                                               ("kelvin", "K")];

/// Outcome of trying to read a line as a unit conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    /// The line converted successfully.
    Converted {
        /// The converted value, stored as the result.
        magnitude: f64,
        /// The value and unit symbol as shown to the user, like `1.524 m`.
        display:   String,
    },
    /// The line is not a conversion, or the conversion failed; it should be
    /// evaluated as plain arithmetic.
    NotApplicable,
}

/// Tries to read `expr` as `<quantity> in <unit>` or `<quantity> to <unit>`.
///
/// Failures of the unit system are never reported: they are logged at debug
/// level and the line falls through to the arithmetic evaluator.
///
/// # Example
/// ```
/// use figya::{
///     conversion::{Conversion, resolve},
///     units::UnitRegistry,
/// };
///
/// let units = UnitRegistry::new();
/// match resolve(&units, "72 fahrenheit in celsius") {
///     Conversion::Converted { display, .. } => assert_eq!(display, "22.22222222 °C"),
///     Conversion::NotApplicable => unreachable!(),
/// }
/// assert_eq!(resolve(&units, "2 + 2"), Conversion::NotApplicable);
/// assert_eq!(resolve(&units, "5 apples in pears"), Conversion::NotApplicable);
/// ```
pub fn resolve<U: UnitSystem>(units: &U, expr: &str) -> Conversion {
    let Some(caps) = CONVERSION.captures(expr.trim()) else {
        return Conversion::NotApplicable;
    };

    match convert(units, &caps[1], &caps[2]) {
        Ok((magnitude, display)) => Conversion::Converted { magnitude, display },
        Err(error) => {
            debug!(%error, expr, "not a unit conversion");
            Conversion::NotApplicable
        },
    }
}

fn convert<U: UnitSystem>(units: &U, source: &str, target: &str) -> Result<(f64, String), UnitError> {
    let target = temperature_alias(target.trim());
    let source = source.trim();

    let quantity = match MAGNITUDE_UNIT.captures(source) {
        Some(caps) if !is_sum(&caps[2]) => match caps[1].parse::<f64>() {
            Ok(magnitude) => units.quantity(magnitude, temperature_alias(caps[2].trim()))?,
            Err(_) => units.parse_quantity(source)?,
        },
        _ => units.parse_quantity(source)?,
    };

    let converted = units.convert(&quantity, target)?;
    let magnitude = units.magnitude(&converted);
    let symbol = units.symbol(&converted);
    let display = if symbol.is_empty() {
        format_number(magnitude)
    } else {
        format!("{} {symbol}", format_number(magnitude))
    };
    Ok((magnitude, display))
}

/// `5 ft + 6 in` has to be read as a whole, not as `5 * (ft + 6 in)`.
fn is_sum(unit: &str) -> bool {
    unit.contains('+') || unit.contains(" - ")
}

/// Maps a temperature scale spelling to its registry name, or returns `unit`
/// as it is.
fn temperature_alias(unit: &str) -> &str {
    let lower = unit.to_lowercase();
    TEMPERATURE_ALIASES.iter()
                       .find(|(alias, _)| *alias == lower)
                       .map_or(unit, |(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitRegistry;

    fn display(expr: &str) -> Option<String> {
        match resolve(&UnitRegistry::new(), expr) {
            Conversion::Converted { display, .. } => Some(display),
            Conversion::NotApplicable => None,
        }
    }

    #[test]
    fn simple_length() {
        assert_eq!(display("5 feet in meters").as_deref(), Some("1.524 m"));
        assert_eq!(display("1 mile to km").as_deref(), Some("1.609344 km"));
    }

    #[test]
    fn keyword_is_case_insensitive() {
        assert_eq!(display("100 cm IN m").as_deref(), Some("1 m"));
    }

    #[test]
    fn temperature_aliases() {
        assert_eq!(display("100 c to f").as_deref(), Some("212 °F"));
        assert_eq!(display("0 Celsius in kelvin").as_deref(), Some("273.15 K"));
        assert_eq!(display("-40 F in C").as_deref(), Some("-40 °C"));
    }

    #[test]
    fn free_form_source() {
        assert_eq!(display("5 ft + 6 inches to ft").as_deref(), Some("5.5 ft"));
        assert_eq!(display("2 km - 500 m to m").as_deref(), Some("1,500 m"));
        assert_eq!(display("(2 + 3) km in m").as_deref(), Some("5,000 m"));
    }

    #[test]
    fn compound_units() {
        assert_eq!(display("36 km/h in m/s").as_deref(), Some("10 m/s"));
    }

    #[test]
    fn failures_fall_through() {
        assert_eq!(display("3 + 4"), None);
        assert_eq!(display("5 kg in meters"), None);
        assert_eq!(display("5 wombats in meters"), None);
        assert_eq!(display("5 m in 2 cm"), None);
        assert_eq!(display("1 (((m^1024)^1024)^1024)^1024 in m"), None);
    }

    #[test]
    fn converted_magnitude_is_exact() {
        let conversion = resolve(&UnitRegistry::new(), "1 km in m");
        assert_eq!(conversion,
                   Conversion::Converted { magnitude: 1000.0,
                                           display:   "1,000 m".to_string(), });
    }
}
