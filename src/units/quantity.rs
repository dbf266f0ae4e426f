use std::fmt;

use crate::units::UnitError;

/// Exponents over the base dimensions, in the order length, mass, time,
/// temperature, electric current, amount of substance, information.
///
/// Angles are dimensionless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Dimension(pub [i32; 7]);

impl Dimension {
    /// A pure number.
    pub const NONE: Self = Self([0; 7]);

    /// Builds a dimension from its seven exponents.
    #[must_use]
    pub const fn new(length: i32,
                     mass: i32,
                     time: i32,
                     temperature: i32,
                     current: i32,
                     amount: i32,
                     information: i32)
                     -> Self {
        Self([length, mass, time, temperature, current, amount, information])
    }

    /// Dimension of a product, or `None` if an exponent overflows.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let mut exponents = self.0;
        for (e, o) in exponents.iter_mut().zip(other.0) {
            *e = e.checked_add(o)?;
        }
        Some(Self(exponents))
    }

    /// Dimension of a power, or `None` if an exponent overflows.
    #[must_use]
    pub fn checked_mul(self, power: i32) -> Option<Self> {
        let mut exponents = self.0;
        for e in &mut exponents {
            *e = e.checked_mul(power)?;
        }
        Some(Self(exponents))
    }
}

/// One entry of the unit table.
///
/// A value `v` in this unit is `v * factor + offset` in the coherent SI unit
/// of its dimension. Only temperature scales have a non-zero offset.
#[derive(Debug, PartialEq)]
pub struct UnitDef {
    /// Canonical name, such as `meter`.
    pub name:       &'static str,
    /// Display symbol, such as `m`.
    pub symbol:     &'static str,
    /// Other accepted spellings.
    pub aliases:    &'static [&'static str],
    /// What the unit measures.
    pub dimension:  Dimension,
    /// Scale relative to the SI unit.
    pub factor:     f64,
    /// Zero point relative to the SI unit.
    pub offset:     f64,
    /// Whether metric and binary prefixes may be attached.
    pub prefixable: bool,
}

impl UnitDef {
    /// A unit with no offset and no prefixes.
    #[must_use]
    pub const fn new(name: &'static str,
                     symbol: &'static str,
                     aliases: &'static [&'static str],
                     dimension: Dimension,
                     factor: f64)
                     -> Self {
        Self { name,
               symbol,
               aliases,
               dimension,
               factor,
               offset: 0.0,
               prefixable: false }
    }

    /// Allows prefixes such as `k` or `Mi`.
    #[must_use]
    pub const fn prefixable(mut self) -> Self {
        self.prefixable = true;
        self
    }

    /// Sets the zero point of a temperature scale.
    #[must_use]
    pub const fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Returns `true` for scales whose zero is not absolute, like `°C`.
    #[must_use]
    pub fn has_offset(&self) -> bool {
        self.offset != 0.0
    }
}

/// A metric or binary prefix.
#[derive(Debug, PartialEq)]
pub struct Prefix {
    /// Prefix name, such as `kilo`.
    pub name:   &'static str,
    /// Prefix symbol, such as `k`.
    pub symbol: &'static str,
    /// Multiplier.
    pub factor: f64,
}

/// A possibly prefixed unit raised to an integer power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitTerm {
    /// The unit.
    pub def:    &'static UnitDef,
    /// Attached prefix, if any.
    pub prefix: Option<&'static Prefix>,
    /// Non-zero exponent.
    pub power:  i32,
}

impl UnitTerm {
    fn scale(&self) -> f64 {
        let prefix = self.prefix.map_or(1.0, |p| p.factor);
        (prefix * self.def.factor).powi(self.power)
    }

    fn base_symbol(&self) -> String {
        let prefix = self.prefix.map_or("", |p| p.symbol);
        format!("{prefix}{}", self.def.symbol)
    }

    fn same_unit(&self, other: &Self) -> bool {
        std::ptr::eq(self.def, other.def)
        && match (self.prefix, other.prefix) {
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// A product of unit terms, such as `kg·m/s²`.
///
/// The empty product is the unit of plain numbers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Unit {
    terms: Vec<UnitTerm>,
}

impl Unit {
    /// The unit of plain numbers.
    #[must_use]
    pub const fn unitless() -> Self {
        Self { terms: Vec::new() }
    }

    /// A single, possibly prefixed, unit.
    #[must_use]
    pub fn single(def: &'static UnitDef, prefix: Option<&'static Prefix>) -> Self {
        Self { terms: vec![UnitTerm { def,
                                      prefix,
                                      power: 1 }] }
    }

    /// Returns `true` for plain numbers.
    #[must_use]
    pub fn is_unitless(&self) -> bool {
        self.terms.is_empty()
    }

    /// What the unit measures.
    ///
    /// # Errors
    /// `InvalidExponent` if a dimension exponent leaves the `i32` range.
    pub fn dimension(&self) -> Result<Dimension, UnitError> {
        self.terms.iter().try_fold(Dimension::NONE, |acc, t| {
                              t.def
                               .dimension
                               .checked_mul(t.power)
                               .and_then(|d| acc.checked_add(d))
                               .ok_or(UnitError::InvalidExponent)
                          })
    }

    /// The term of a lone offset unit, or an error if an offset unit is
    /// combined with anything else.
    fn offset_term(&self) -> Result<Option<&UnitTerm>, UnitError> {
        match self.terms.iter().find(|t| t.def.has_offset()) {
            None => Ok(None),
            Some(term) if self.terms.len() == 1 && term.power == 1 => Ok(Some(term)),
            Some(term) => Err(UnitError::OffsetUnit { unit: term.base_symbol() }),
        }
    }

    /// Converts `value` in this unit to the SI unit of its dimension.
    fn to_base(&self, value: f64) -> Result<f64, UnitError> {
        Ok(match self.offset_term()? {
               Some(term) => value * term.scale() + term.def.offset,
               None => value * self.scale(),
           })
    }

    /// Converts `value` in the SI unit of its dimension to this unit.
    fn from_base(&self, value: f64) -> Result<f64, UnitError> {
        Ok(match self.offset_term()? {
               Some(term) => (value - term.def.offset) / term.scale(),
               None => value / self.scale(),
           })
    }

    fn scale(&self) -> f64 {
        self.terms.iter().map(UnitTerm::scale).product()
    }

    /// The unit of a product.
    ///
    /// Powers of identical terms are added and terms that cancel out are
    /// dropped, so `m/m` is unitless.
    ///
    /// # Errors
    /// `InvalidExponent` if a combined power overflows.
    pub fn multiply(&self, other: &Self) -> Result<Self, UnitError> {
        let mut terms = self.terms.clone();
        for term in &other.terms {
            match terms.iter_mut().find(|t| t.same_unit(term)) {
                Some(existing) => {
                    existing.power = existing.power
                                             .checked_add(term.power)
                                             .ok_or(UnitError::InvalidExponent)?;
                },
                None => terms.push(*term),
            }
        }
        terms.retain(|t| t.power != 0);
        Ok(Self { terms })
    }

    /// The unit raised to `power`.
    ///
    /// # Errors
    /// `InvalidExponent` if a resulting power overflows.
    pub fn powi(&self, power: i32) -> Result<Self, UnitError> {
        if power == 0 {
            return Ok(Self::unitless());
        }
        let terms = self.terms
                        .iter()
                        .map(|t| {
                            t.power
                             .checked_mul(power)
                             .map(|power| UnitTerm { power, ..*t })
                             .ok_or(UnitError::InvalidExponent)
                        })
                        .collect::<Result<_, _>>()?;
        Ok(Self { terms })
    }

    /// The compact display symbol: `m`, `°C`, `km/h`, `m²`, `kg·m/s²`.
    ///
    /// Plain numbers have an empty symbol.
    #[must_use]
    pub fn symbol(&self) -> String {
        let render = |t: &UnitTerm, power: i32| {
            if power == 1 {
                t.base_symbol()
            } else {
                format!("{}{}", t.base_symbol(), superscript(power))
            }
        };
        let numerator: Vec<String> = self.terms
                                         .iter()
                                         .filter(|t| t.power > 0)
                                         .map(|t| render(t, t.power))
                                         .collect();
        let denominator: Vec<String> = self.terms
                                           .iter()
                                           .filter(|t| t.power < 0)
                                           .map(|t| render(t, -t.power))
                                           .collect();

        let top = if numerator.is_empty() {
            "1".to_string()
        } else {
            numerator.join("·")
        };
        match denominator.as_slice() {
            [] if numerator.is_empty() => String::new(),
            [] => top,
            [single] => format!("{top}/{single}"),
            many => format!("{top}/({})", many.join("·")),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

fn superscript(n: i32) -> String {
    n.to_string()
     .chars()
     .map(|c| match c {
         '0' => '⁰',
         '1' => '¹',
         '2' => '²',
         '3' => '³',
         '4' => '⁴',
         '5' => '⁵',
         '6' => '⁶',
         '7' => '⁷',
         '8' => '⁸',
         '9' => '⁹',
         '-' => '⁻',
         other => other,
     })
     .collect()
}

/// A magnitude with a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    /// The numeric part.
    pub magnitude: f64,
    /// The unit the magnitude is expressed in.
    pub unit:      Unit,
}

impl Quantity {
    /// Pairs a magnitude with a unit.
    #[must_use]
    pub const fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    /// A plain number.
    #[must_use]
    pub const fn unitless(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::unitless())
    }

    /// Expresses the quantity in `target`.
    ///
    /// # Errors
    /// - `IncompatibleDimensions` if `target` measures something else.
    /// - `OffsetUnit` if either side combines an offset unit with others.
    /// - `InvalidExponent` if a dimension is out of range.
    pub fn to(&self, target: &Unit) -> Result<Self, UnitError> {
        if self.unit.dimension()? != target.dimension()? {
            return Err(UnitError::IncompatibleDimensions { from: self.unit.symbol(),
                                                           to:   target.symbol(), });
        }
        let base = self.unit.to_base(self.magnitude)?;
        Ok(Self::new(target.from_base(base)?, target.clone()))
    }

    /// Sum of two quantities of the same dimension, in the unit of `self`.
    ///
    /// # Errors
    /// Fails for different dimensions and for offset units.
    pub fn checked_add(&self, other: &Self) -> Result<Self, UnitError> {
        reject_offset(&[&self.unit, &other.unit])?;
        let other = other.to(&self.unit)?;
        Ok(Self::new(self.magnitude + other.magnitude, self.unit.clone()))
    }

    /// Difference of two quantities of the same dimension.
    ///
    /// # Errors
    /// Same as [`Quantity::checked_add`].
    pub fn checked_sub(&self, other: &Self) -> Result<Self, UnitError> {
        self.checked_add(&other.negate())
    }

    /// Product of two quantities.
    ///
    /// Scaling by a plain number keeps the unit as it is, even an offset one,
    /// so `(2 + 3) degC` is five degrees Celsius.
    ///
    /// # Errors
    /// `OffsetUnit` when an offset unit would be combined with another unit.
    pub fn checked_mul(&self, other: &Self) -> Result<Self, UnitError> {
        let magnitude = self.magnitude * other.magnitude;
        if self.unit.is_unitless() {
            return Ok(Self::new(magnitude, other.unit.clone()));
        }
        if other.unit.is_unitless() {
            return Ok(Self::new(magnitude, self.unit.clone()));
        }
        reject_offset(&[&self.unit, &other.unit])?;
        Ok(Self::new(magnitude, self.unit.multiply(&other.unit)?))
    }

    /// Quotient of two quantities.
    ///
    /// # Errors
    /// `OffsetUnit` when an offset unit would be combined with another unit.
    pub fn checked_div(&self, other: &Self) -> Result<Self, UnitError> {
        let magnitude = self.magnitude / other.magnitude;
        if other.unit.is_unitless() {
            return Ok(Self::new(magnitude, self.unit.clone()));
        }
        reject_offset(&[&self.unit, &other.unit])?;
        Ok(Self::new(magnitude, self.unit.multiply(&other.unit.powi(-1)?)?))
    }

    /// The quantity raised to an integer power.
    ///
    /// # Errors
    /// - `OffsetUnit` for any power other than one of an offset unit.
    /// - `InvalidExponent` if a unit power overflows.
    pub fn checked_powi(&self, power: i32) -> Result<Self, UnitError> {
        if power != 1 {
            reject_offset(&[&self.unit])?;
        }
        Ok(Self::new(self.magnitude.powi(power), self.unit.powi(power)?))
    }

    /// The quantity with its sign flipped.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::new(-self.magnitude, self.unit.clone())
    }
}

/// Fails if any of `units` contains an offset unit.
fn reject_offset(units: &[&Unit]) -> Result<(), UnitError> {
    units.iter()
         .flat_map(|u| &u.terms)
         .find(|t| t.def.has_offset())
         .map_or(Ok(()), |term| Err(UnitError::OffsetUnit { unit: term.base_symbol() }))
}
