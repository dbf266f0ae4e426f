use std::f64::consts::{PI, TAU};

use crate::units::{
    Quantity, UnitError, UnitSystem,
    parser::parse_quantity,
    quantity::{Dimension, Prefix, Unit, UnitDef},
};

const LENGTH: Dimension = Dimension::new(1, 0, 0, 0, 0, 0, 0);
const MASS: Dimension = Dimension::new(0, 1, 0, 0, 0, 0, 0);
const TIME: Dimension = Dimension::new(0, 0, 1, 0, 0, 0, 0);
const TEMPERATURE: Dimension = Dimension::new(0, 0, 0, 1, 0, 0, 0);
const CURRENT: Dimension = Dimension::new(0, 0, 0, 0, 1, 0, 0);
const AMOUNT: Dimension = Dimension::new(0, 0, 0, 0, 0, 1, 0);
const INFORMATION: Dimension = Dimension::new(0, 0, 0, 0, 0, 0, 1);
const AREA: Dimension = Dimension::new(2, 0, 0, 0, 0, 0, 0);
const VOLUME: Dimension = Dimension::new(3, 0, 0, 0, 0, 0, 0);
const FREQUENCY: Dimension = Dimension::new(0, 0, -1, 0, 0, 0, 0);
const SPEED: Dimension = Dimension::new(1, 0, -1, 0, 0, 0, 0);
const FORCE: Dimension = Dimension::new(1, 1, -2, 0, 0, 0, 0);
const ENERGY: Dimension = Dimension::new(2, 1, -2, 0, 0, 0, 0);
const POWER: Dimension = Dimension::new(2, 1, -3, 0, 0, 0, 0);
const PRESSURE: Dimension = Dimension::new(-1, 1, -2, 0, 0, 0, 0);
const CHARGE: Dimension = Dimension::new(0, 0, 1, 0, 1, 0, 0);
const VOLTAGE: Dimension = Dimension::new(2, 1, -3, 0, -1, 0, 0);
const RESISTANCE: Dimension = Dimension::new(2, 1, -3, 0, -2, 0, 0);

/// Kelvin per degree Fahrenheit.
const FAHRENHEIT_STEP: f64 = 5.0 / 9.0;

/// Every unit the registry knows, with factors relative to SI.
pub static UNITS: &[UnitDef] = &[
    // length
    UnitDef::new("meter", "m", &["metre"], LENGTH, 1.0).prefixable(),
    UnitDef::new("inch", "in", &[], LENGTH, 0.0254),
    UnitDef::new("foot", "ft", &["feet"], LENGTH, 0.3048),
    UnitDef::new("yard", "yd", &[], LENGTH, 0.9144),
    UnitDef::new("mile", "mi", &[], LENGTH, 1609.344),
    UnitDef::new("nautical_mile", "nmi", &[], LENGTH, 1852.0),
    UnitDef::new("angstrom", "Å", &[], LENGTH, 1e-10),
    UnitDef::new("light_year", "ly", &["lightyear"], LENGTH, 9_460_730_472_580_800.0),
    UnitDef::new("astronomical_unit", "au", &[], LENGTH, 149_597_870_700.0),
    // mass
    UnitDef::new("gram", "g", &["gramme"], MASS, 1e-3).prefixable(),
    UnitDef::new("tonne", "t", &["metric_ton"], MASS, 1e3).prefixable(),
    UnitDef::new("pound", "lb", &["lbs"], MASS, 0.453_592_37),
    UnitDef::new("ounce", "oz", &[], MASS, 0.028_349_523_125),
    UnitDef::new("stone", "st", &[], MASS, 6.350_293_18),
    // time
    UnitDef::new("second", "s", &["sec"], TIME, 1.0).prefixable(),
    UnitDef::new("minute", "min", &[], TIME, 60.0),
    UnitDef::new("hour", "h", &["hr"], TIME, 3600.0),
    UnitDef::new("day", "d", &[], TIME, 86_400.0),
    UnitDef::new("week", "wk", &[], TIME, 604_800.0),
    UnitDef::new("year", "yr", &["annum"], TIME, 31_557_600.0),
    // temperature
    UnitDef::new("kelvin", "K", &[], TEMPERATURE, 1.0).prefixable(),
    UnitDef::new("degree_Celsius", "°C", &["degC", "celsius"], TEMPERATURE, 1.0)
        .with_offset(273.15),
    UnitDef::new("degree_Fahrenheit", "°F", &["degF", "fahrenheit"], TEMPERATURE, FAHRENHEIT_STEP)
        .with_offset(459.67 * FAHRENHEIT_STEP),
    UnitDef::new("degree_Rankine", "°R", &["degR", "rankine"], TEMPERATURE, FAHRENHEIT_STEP),
    // electricity, substance, information
    UnitDef::new("ampere", "A", &["amp"], CURRENT, 1.0).prefixable(),
    UnitDef::new("mole", "mol", &[], AMOUNT, 1.0).prefixable(),
    UnitDef::new("bit", "bit", &[], INFORMATION, 1.0).prefixable(),
    UnitDef::new("byte", "B", &[], INFORMATION, 8.0).prefixable(),
    UnitDef::new("coulomb", "C", &[], CHARGE, 1.0).prefixable(),
    UnitDef::new("volt", "V", &[], VOLTAGE, 1.0).prefixable(),
    UnitDef::new("ohm", "Ω", &[], RESISTANCE, 1.0).prefixable(),
    // area and volume
    UnitDef::new("hectare", "ha", &[], AREA, 1e4),
    UnitDef::new("acre", "ac", &[], AREA, 4_046.856_422_4),
    UnitDef::new("liter", "L", &["l", "litre"], VOLUME, 1e-3).prefixable(),
    UnitDef::new("gallon", "gal", &[], VOLUME, 3.785_411_784e-3),
    UnitDef::new("quart", "qt", &[], VOLUME, 9.463_529_46e-4),
    UnitDef::new("pint", "pt", &[], VOLUME, 4.731_764_73e-4),
    UnitDef::new("cup", "cup", &[], VOLUME, 2.365_882_365e-4),
    UnitDef::new("fluid_ounce", "floz", &["fl_oz"], VOLUME, 2.957_352_956_25e-5),
    UnitDef::new("tablespoon", "tbsp", &[], VOLUME, 1.478_676_478_125e-5),
    UnitDef::new("teaspoon", "tsp", &[], VOLUME, 4.928_921_593_75e-6),
    // mechanics
    UnitDef::new("hertz", "Hz", &[], FREQUENCY, 1.0).prefixable(),
    UnitDef::new("newton", "N", &[], FORCE, 1.0).prefixable(),
    UnitDef::new("pound_force", "lbf", &[], FORCE, 4.448_221_615_260_5),
    UnitDef::new("joule", "J", &[], ENERGY, 1.0).prefixable(),
    UnitDef::new("calorie", "cal", &[], ENERGY, 4.184).prefixable(),
    UnitDef::new("watt_hour", "Wh", &[], ENERGY, 3600.0).prefixable(),
    UnitDef::new("electron_volt", "eV", &[], ENERGY, 1.602_176_634e-19).prefixable(),
    UnitDef::new("british_thermal_unit", "BTU", &["Btu"], ENERGY, 1_055.055_852_62),
    UnitDef::new("watt", "W", &[], POWER, 1.0).prefixable(),
    UnitDef::new("horsepower", "hp", &[], POWER, 745.699_871_582_270_2),
    UnitDef::new("pascal", "Pa", &[], PRESSURE, 1.0).prefixable(),
    UnitDef::new("bar", "bar", &[], PRESSURE, 1e5).prefixable(),
    UnitDef::new("atmosphere", "atm", &[], PRESSURE, 101_325.0),
    UnitDef::new("pound_per_square_inch", "psi", &[], PRESSURE, 6_894.757_293_168_361),
    UnitDef::new("millimeter_Hg", "mmHg", &[], PRESSURE, 133.322_387_415),
    UnitDef::new("torr", "Torr", &[], PRESSURE, 133.322_368_421_052_63),
    // speed
    UnitDef::new("mile_per_hour", "mph", &[], SPEED, 0.447_04),
    UnitDef::new("kilometer_per_hour", "kph", &["kmh"], SPEED, 1.0 / 3.6),
    UnitDef::new("knot", "kn", &[], SPEED, 1852.0 / 3600.0),
    // angle
    UnitDef::new("radian", "rad", &[], Dimension::NONE, 1.0).prefixable(),
    UnitDef::new("degree", "deg", &["°"], Dimension::NONE, PI / 180.0),
    UnitDef::new("revolution", "rev", &["turn"], Dimension::NONE, TAU),
];

/// Metric and binary prefixes. Two-letter symbols come first so that `Mi`
/// is tried before `M`.
pub static PREFIXES: &[Prefix] = &[
    Prefix { name: "deca", symbol: "da", factor: 1e1 },
    Prefix { name: "kibi", symbol: "Ki", factor: 1024.0 },
    Prefix { name: "mebi", symbol: "Mi", factor: 1_048_576.0 },
    Prefix { name: "gibi", symbol: "Gi", factor: 1_073_741_824.0 },
    Prefix { name: "tebi", symbol: "Ti", factor: 1_099_511_627_776.0 },
    Prefix { name: "yotta", symbol: "Y", factor: 1e24 },
    Prefix { name: "zetta", symbol: "Z", factor: 1e21 },
    Prefix { name: "exa", symbol: "E", factor: 1e18 },
    Prefix { name: "peta", symbol: "P", factor: 1e15 },
    Prefix { name: "tera", symbol: "T", factor: 1e12 },
    Prefix { name: "giga", symbol: "G", factor: 1e9 },
    Prefix { name: "mega", symbol: "M", factor: 1e6 },
    Prefix { name: "kilo", symbol: "k", factor: 1e3 },
    Prefix { name: "hecto", symbol: "h", factor: 1e2 },
    Prefix { name: "deci", symbol: "d", factor: 1e-1 },
    Prefix { name: "centi", symbol: "c", factor: 1e-2 },
    Prefix { name: "milli", symbol: "m", factor: 1e-3 },
    Prefix { name: "micro", symbol: "µ", factor: 1e-6 },
    Prefix { name: "micro", symbol: "u", factor: 1e-6 },
    Prefix { name: "nano", symbol: "n", factor: 1e-9 },
    Prefix { name: "pico", symbol: "p", factor: 1e-12 },
    Prefix { name: "femto", symbol: "f", factor: 1e-15 },
    Prefix { name: "atto", symbol: "a", factor: 1e-18 },
    Prefix { name: "zepto", symbol: "z", factor: 1e-21 },
    Prefix { name: "yocto", symbol: "y", factor: 1e-24 },
];

type Resolved = (&'static UnitDef, Option<&'static Prefix>);

/// The built-in unit system.
///
/// Unit names are resolved in this order:
/// 1. an exact symbol, name or alias (`ft`, `foot`, `feet`);
/// 2. a prefix symbol on a unit symbol (`km`, `MiB`) or a prefix name on a
///    unit name (`kilometer`);
/// 3. the same after dropping a plural `s` or `es` from a name (`meters`,
///    `inches`, `kilometers`);
/// 4. the same, ignoring case, for names (`Meter`, `KELVIN`).
#[derive(Debug, Clone, Copy)]
pub struct UnitRegistry {
    units:    &'static [UnitDef],
    prefixes: &'static [Prefix],
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    /// Creates a registry over the built-in tables.
    #[must_use]
    pub const fn new() -> Self {
        Self { units:    UNITS,
               prefixes: PREFIXES, }
    }

    /// Resolves a single unit name.
    ///
    /// # Errors
    /// Returns `UnitError::UnknownUnit` if no rule matches.
    ///
    /// # Example
    /// ```
    /// use figya::units::UnitRegistry;
    ///
    /// let registry = UnitRegistry::new();
    /// assert_eq!(registry.lookup("kilometers").unwrap().symbol(), "km");
    /// assert_eq!(registry.lookup("ms").unwrap().symbol(), "ms");
    /// assert_eq!(registry.lookup("degF").unwrap().symbol(), "°F");
    /// assert!(registry.lookup("furlongs").is_err());
    /// ```
    pub fn lookup(&self, name: &str) -> Result<Unit, UnitError> {
        self.resolve(name)
            .or_else(|| self.resolve_plural(name))
            .or_else(|| {
                let lower = name.to_lowercase();
                (lower != name).then(|| self.resolve_named(&lower).or_else(|| self.resolve_plural(&lower)))
                               .flatten()
            })
            .map(|(def, prefix)| Unit::single(def, prefix))
            .ok_or_else(|| UnitError::UnknownUnit { name: name.to_string() })
    }

    fn resolve(&self, name: &str) -> Option<Resolved> {
        if let Some(def) = self.units
                               .iter()
                               .find(|u| u.symbol == name || u.name == name || u.aliases.contains(&name))
        {
            return Some((def, None));
        }
        self.prefixes
            .iter()
            .find_map(|p| {
                let rest = name.strip_prefix(p.symbol).filter(|rest| !rest.is_empty())?;
                self.units
                    .iter()
                    .find(|u| u.prefixable && u.symbol == rest)
                    .map(|u| (u, Some(p)))
            })
            .or_else(|| self.resolve_named(name))
    }

    /// Resolves by unit names and aliases only, never by symbol.
    fn resolve_named(&self, name: &str) -> Option<Resolved> {
        let by_name = |candidate: &str| {
            self.units
                .iter()
                .find(|u| u.name == candidate || u.aliases.contains(&candidate))
        };
        if let Some(def) = by_name(name) {
            return Some((def, None));
        }
        self.prefixes.iter().find_map(|p| {
                                let rest = name.strip_prefix(p.name)?;
                                by_name(rest).filter(|u| u.prefixable).map(|u| (u, Some(p)))
                            })
    }

    fn resolve_plural(&self, name: &str) -> Option<Resolved> {
        [name.strip_suffix("es"), name.strip_suffix('s')].into_iter()
                                                          .flatten()
                                                          .filter(|stem| !stem.is_empty())
                                                          .find_map(|stem| self.resolve_named(stem))
    }
}

impl UnitSystem for UnitRegistry {
    type Quantity = Quantity;

    fn quantity(&self, magnitude: f64, unit: &str) -> Result<Quantity, UnitError> {
        let unit = parse_quantity(self, unit)?;
        Quantity::unitless(magnitude).checked_mul(&unit)
    }

    fn parse_quantity(&self, text: &str) -> Result<Quantity, UnitError> {
        parse_quantity(self, text)
    }

    fn convert(&self, quantity: &Quantity, target: &str) -> Result<Quantity, UnitError> {
        let target_quantity = parse_quantity(self, target)?;
        if target_quantity.magnitude != 1.0 {
            return Err(UnitError::ScaledTarget { target: target.to_string() });
        }
        quantity.to(&target_quantity.unit)
    }

    fn magnitude(&self, quantity: &Quantity) -> f64 {
        quantity.magnitude
    }

    fn symbol(&self, quantity: &Quantity) -> String {
        quantity.unit.symbol()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn lookup_order() {
        let registry = UnitRegistry::new();
        assert_eq!(registry.lookup("min").unwrap().symbol(), "min");
        assert_eq!(registry.lookup("mm").unwrap().symbol(), "mm");
        assert_eq!(registry.lookup("MiB").unwrap().symbol(), "MiB");
        assert_eq!(registry.lookup("inches").unwrap().symbol(), "in");
        assert_eq!(registry.lookup("feet").unwrap().symbol(), "ft");
        assert_eq!(registry.lookup("Celsius").unwrap().symbol(), "°C");
        assert_eq!(registry.lookup("µs").unwrap().symbol(), "µs");
    }

    #[test]
    fn offset_units_take_no_prefix() {
        let registry = UnitRegistry::new();
        assert!(registry.lookup("kdegC").is_err());
        assert_eq!(registry.lookup("mK").unwrap().symbol(), "mK");
    }

    #[test]
    fn feet_to_meters() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(5.0, "feet").unwrap();
        let converted = registry.convert(&q, "meters").unwrap();
        assert!(close(registry.magnitude(&converted), 1.524));
        assert_eq!(registry.symbol(&converted), "m");
    }

    #[test]
    fn temperature_scales() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(72.0, "degF").unwrap();
        let c = registry.convert(&q, "degC").unwrap();
        assert!(close(c.magnitude, 200.0 / 9.0));
        assert_eq!(c.unit.symbol(), "°C");

        let boiling = registry.quantity(100.0, "degC").unwrap();
        assert!(close(registry.convert(&boiling, "K").unwrap().magnitude, 373.15));
        assert!(close(registry.convert(&boiling, "degF").unwrap().magnitude, 212.0));
    }

    #[test]
    fn compound_units() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(100.0, "km/h").unwrap();
        let mph = registry.convert(&q, "mph").unwrap();
        assert!(close(mph.magnitude, 62.137_119_223_733_4));

        let q = registry.parse_quantity("9.81 m/s^2").unwrap();
        assert_eq!(registry.symbol(&q), "m/s²");
    }

    #[test]
    fn information_units() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(1.0, "GiB").unwrap();
        let mb = registry.convert(&q, "MB").unwrap();
        assert!(close(mb.magnitude, 1_073.741_824));
    }

    #[test]
    fn incompatible_and_scaled_targets() {
        let registry = UnitRegistry::new();
        let q = registry.quantity(1.0, "kg").unwrap();
        assert!(matches!(registry.convert(&q, "m"),
                         Err(UnitError::IncompatibleDimensions { .. })));
        assert!(matches!(registry.convert(&q, "2 g"), Err(UnitError::ScaledTarget { .. })));
    }
}
