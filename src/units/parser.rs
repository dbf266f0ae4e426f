use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::core::MAX_NESTING,
    },
    units::{Quantity, UnitError, UnitRegistry},
};

type QuantityResult = Result<Quantity, UnitError>;

/// Largest exponent magnitude accepted in a unit expression.
const MAX_EXPONENT: f64 = 1024.0;

/// Parses a quantity expression such as `5 ft + 3 in`, `km/h` or
/// `9.81 m/s^2`.
///
/// Grammar:
/// ```text
/// sum     := product (('+' | '-') product)*
/// product := signed (('*' | '/') signed | power)*
/// signed  := ('-' | '+') signed | power
/// power   := primary (('^' | '**') signed)?
/// primary := NUMBER | IDENT | '(' sum ')'
/// ```
///
/// Juxtaposition multiplies, so `kg m` is `kg * m` and `5 ft` is `5 * ft`.
///
/// # Errors
/// - `UnitError::Syntax` for malformed text, trailing tokens or nesting
///   deeper than [`MAX_NESTING`].
/// - `UnitError::UnknownUnit` for names the registry cannot resolve.
/// - Dimension and offset errors from the quantity arithmetic.
///
/// # Example
/// ```
/// use figya::units::{UnitRegistry, parser::parse_quantity};
///
/// let registry = UnitRegistry::new();
/// let q = parse_quantity(&registry, "5 ft + 12 in").unwrap();
/// assert_eq!(q.unit.symbol(), "ft");
/// assert!((q.magnitude - 6.0).abs() < 1e-12);
/// ```
pub fn parse_quantity(registry: &UnitRegistry, text: &str) -> QuantityResult {
    let tokens = tokenize(text)?;
    let mut iter = tokens.iter().peekable();
    let quantity = parse_sum(registry, &mut iter, 0)?;

    match iter.next() {
        None => Ok(quantity),
        Some((tok, column)) => Err(ParseError::UnexpectedToken { found:  tok.to_string(),
                                                                 column: *column, }.into()),
    }
}

fn parse_sum<'a, I>(registry: &UnitRegistry, tokens: &mut Peekable<I>, depth: usize)
    -> QuantityResult
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_product(registry, tokens, depth)?;

    while let Some((tok, _)) = tokens.peek()
          && matches!(tok, Token::Plus | Token::Minus)
    {
        let subtract = *tok == Token::Minus;
        tokens.next();
        let right = parse_product(registry, tokens, depth)?;
        left = if subtract { left.checked_sub(&right)? } else { left.checked_add(&right)? };
    }

    Ok(left)
}

fn parse_product<'a, I>(registry: &UnitRegistry, tokens: &mut Peekable<I>, depth: usize)
    -> QuantityResult
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_signed(registry, tokens, depth)?;

    while let Some((tok, _)) = tokens.peek() {
        left = match tok {
            Token::Star => {
                tokens.next();
                left.checked_mul(&parse_signed(registry, tokens, depth)?)?
            },
            Token::Slash => {
                tokens.next();
                left.checked_div(&parse_signed(registry, tokens, depth)?)?
            },
            Token::Number(_) | Token::Identifier(_) | Token::LParen => {
                left.checked_mul(&parse_power(registry, tokens, depth)?)?
            },
            _ => break,
        };
    }

    Ok(left)
}

fn parse_signed<'a, I>(registry: &UnitRegistry, tokens: &mut Peekable<I>, depth: usize)
    -> QuantityResult
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if depth > MAX_NESTING {
        return Err(ParseError::NestingTooDeep { limit: MAX_NESTING }.into());
    }
    match tokens.peek() {
        Some((Token::Minus, _)) => {
            tokens.next();
            Ok(parse_signed(registry, tokens, depth + 1)?.negate())
        },
        Some((Token::Plus, _)) => {
            tokens.next();
            parse_signed(registry, tokens, depth + 1)
        },
        _ => parse_power(registry, tokens, depth),
    }
}

fn parse_power<'a, I>(registry: &UnitRegistry, tokens: &mut Peekable<I>, depth: usize)
    -> QuantityResult
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_primary(registry, tokens, depth)?;

    if let Some((Token::Caret | Token::StarStar, _)) = tokens.peek() {
        tokens.next();
        let exponent = parse_signed(registry, tokens, depth + 1)?;
        return base.checked_powi(integer_exponent(&exponent)?);
    }

    Ok(base)
}

#[allow(clippy::cast_possible_truncation)]
fn integer_exponent(exponent: &Quantity) -> Result<i32, UnitError> {
    let n = exponent.magnitude;
    if !exponent.unit.is_unitless() || n.fract() != 0.0 || n.abs() > MAX_EXPONENT {
        return Err(UnitError::InvalidExponent);
    }
    Ok(n as i32)
}

fn parse_primary<'a, I>(registry: &UnitRegistry, tokens: &mut Peekable<I>, depth: usize)
    -> QuantityResult
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(n), _)) => Ok(Quantity::unitless(*n)),
        Some((Token::Identifier(name), _)) => Ok(Quantity::new(1.0, registry.lookup(name)?)),
        Some((Token::LParen, column)) => {
            let inner = parse_sum(registry, tokens, depth + 1)?;
            match tokens.next() {
                Some((Token::RParen, _)) => Ok(inner),
                _ => Err(ParseError::ExpectedClosingParen { column: *column }.into()),
            }
        },
        Some((tok, column)) => Err(ParseError::UnexpectedToken { found:  tok.to_string(),
                                                                 column: *column, }.into()),
        None => Err(ParseError::UnexpectedEndOfInput.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn juxtaposition_multiplies() {
        let registry = UnitRegistry::new();
        let q = parse_quantity(&registry, "3 kg m/s^2").unwrap();
        assert_eq!(q.magnitude, 3.0);
        assert_eq!(q.unit.symbol(), "kg·m/s²");
    }

    #[test]
    fn sums_convert_to_the_first_unit() {
        let registry = UnitRegistry::new();
        let q = parse_quantity(&registry, "1 km - 500 m").unwrap();
        assert_eq!(q.unit.symbol(), "km");
        assert!((q.magnitude - 0.5).abs() < 1e-12);
    }

    #[test]
    fn exponents_must_be_plain_integers() {
        let registry = UnitRegistry::new();
        assert_eq!(parse_quantity(&registry, "m^1.5"), Err(UnitError::InvalidExponent));
        assert_eq!(parse_quantity(&registry, "m^s"), Err(UnitError::InvalidExponent));
        assert_eq!(parse_quantity(&registry, "m^2000"), Err(UnitError::InvalidExponent));
        assert_eq!(parse_quantity(&registry, "m^-1").unwrap().unit.symbol(), "1/m");
    }

    #[test]
    fn syntax_errors() {
        let registry = UnitRegistry::new();
        assert!(matches!(parse_quantity(&registry, "(m"),
                         Err(UnitError::Syntax(ParseError::ExpectedClosingParen { column: 1 }))));
        assert!(matches!(parse_quantity(&registry, ""),
                         Err(UnitError::Syntax(ParseError::UnexpectedEndOfInput))));
        assert!(matches!(parse_quantity(&registry, "m )"),
                         Err(UnitError::Syntax(ParseError::UnexpectedToken { .. }))));
    }

    #[test]
    fn power_overflow_is_rejected() {
        let registry = UnitRegistry::new();
        assert_eq!(parse_quantity(&registry, "1 (((m^1024)^1024)^1024)^1024"),
                   Err(UnitError::InvalidExponent));
        let cubed = "((m^1024)^1024)^1024";
        assert_eq!(parse_quantity(&registry, &format!("{cubed} * {cubed}")),
                   Err(UnitError::InvalidExponent));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let registry = UnitRegistry::new();
        let deep = format!("{}m{}", "(".repeat(700), ")".repeat(700));
        assert_eq!(parse_quantity(&registry, &deep),
                   Err(UnitError::Syntax(ParseError::NestingTooDeep { limit: 200 })));
        let signs = format!("{}1 m", "-".repeat(5000));
        assert_eq!(parse_quantity(&registry, &signs),
                   Err(UnitError::Syntax(ParseError::NestingTooDeep { limit: 200 })));
    }

    #[test]
    fn unknown_units() {
        let registry = UnitRegistry::new();
        assert_eq!(parse_quantity(&registry, "5 smoots"),
                   Err(UnitError::UnknownUnit { name: "smoots".to_string() }));
    }
}
