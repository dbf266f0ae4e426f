use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_power,
            core::{MAX_NESTING, ParseResult, parse_expression},
            utils::parse_comma_separated,
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators `-` (negation) and `+` (identity). Unary
/// operators are right-associative, so `--x` is parsed as `-( -x )`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "+") unary
///            | power
/// ```
/// Every nested group, sign and exponent passes through here, so this is
/// where the nesting limit is enforced.
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `depth`: Current nesting level.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a power-level expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if depth > MAX_NESTING {
        return Err(ParseError::NestingTooDeep { limit: MAX_NESTING });
    }
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Plus, _)) => UnaryOperator::Plus,
        _ => return parse_power(tokens, depth),
    };
    tokens.next();
    let expr = parse_unary(tokens, depth + 1)?;
    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr) })
}

/// Parses a primary (atomic) expression.
///
/// Grammar:
/// ```text
///     primary := NUMBER
///              | IDENT
///              | IDENT "(" arguments ")"
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(n), _)) => Ok(Expr::Number(*n)),
        Some((Token::Identifier(name), _)) => parse_identifier_or_call(tokens, name, depth),
        Some((Token::LParen, column)) => parse_grouping(tokens, *column, depth),
        Some((tok, column)) => Err(ParseError::UnexpectedToken { found:  tok.to_string(),
                                                                 column: *column, }),
        None => Err(ParseError::UnexpectedEndOfInput),
    }
}

/// Parses the remainder of a parenthesized expression.
///
/// The opening `(` has already been consumed; `open_column` is where it
/// stood and is reported if the group is never closed.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>,
                         open_column: usize,
                         depth: usize)
                         -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_expression(tokens, depth + 1)?;
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(expr),
        Some((tok, column)) => Err(ParseError::UnexpectedToken { found:  tok.to_string(),
                                                                 column: *column, }),
        None => Err(ParseError::ExpectedClosingParen { column: open_column }),
    }
}

/// Parses a name reference or, when followed by `(`, a function call.
///
/// No lookup happens here: whether `name` is a known constant or builtin is
/// decided by the evaluator.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>,
                                   name: &str,
                                   depth: usize)
                                   -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::LParen, column)) = tokens.peek() {
        let open_column = *column;
        tokens.next();
        let arguments = parse_comma_separated(tokens,
                                              |tokens| parse_expression(tokens, depth + 1),
                                              open_column)?;
        return Ok(Expr::FunctionCall { name: name.to_string(),
                                       arguments });
    }
    Ok(Expr::Name(name.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{BinaryOperator, Expr, UnaryOperator},
        error::ParseError,
        interpreter::{lexer::tokenize, parser::core::parse},
    };

    fn parse_str(source: &str) -> Result<Expr, ParseError> {
        parse(&tokenize(source).unwrap())
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        let expr = parse_str("-2^2").unwrap();
        match expr {
            Expr::UnaryOp { op: UnaryOperator::Negate, expr } => {
                assert!(matches!(*expr, Expr::BinaryOp { op: BinaryOperator::Pow, .. }));
            },
            other => panic!("unexpected tree: {other:?}"),
        }
    }

    #[test]
    fn power_is_right_associative() {
        let expr = parse_str("2^3^2").unwrap();
        match expr {
            Expr::BinaryOp { left, op: BinaryOperator::Pow, right } => {
                assert_eq!(*left, Expr::Number(2.0));
                assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::Pow, .. }));
            },
            other => panic!("unexpected tree: {other:?}"),
        }
    }

    #[test]
    fn function_call_with_arguments() {
        let expr = parse_str("max(1, 2, 3)").unwrap();
        match expr {
            Expr::FunctionCall { name, arguments } => {
                assert_eq!(name, "max");
                assert_eq!(arguments.len(), 3);
            },
            other => panic!("unexpected tree: {other:?}"),
        }
    }

    #[test]
    fn empty_argument_list() {
        let expr = parse_str("gcd()").unwrap();
        assert_eq!(expr,
                   Expr::FunctionCall { name:      "gcd".to_string(),
                                        arguments: vec![], });
    }

    #[test]
    fn unclosed_paren_reports_its_column() {
        assert_eq!(parse_str("2 * (3 + 4").unwrap_err(),
                   ParseError::ExpectedClosingParen { column: 5 });
        assert_eq!(parse_str("sqrt(2").unwrap_err(),
                   ParseError::ExpectedClosingParen { column: 5 });
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse_str("").unwrap_err(), ParseError::UnexpectedEndOfInput);
        assert_eq!(parse_str("1 +").unwrap_err(), ParseError::UnexpectedEndOfInput);
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let deep = format!("{}1{}", "(".repeat(700), ")".repeat(700));
        assert_eq!(parse_str(&deep).unwrap_err(), ParseError::NestingTooDeep { limit: 200 });

        let signs = format!("{}1", "-".repeat(200_000));
        assert_eq!(parse_str(&signs).unwrap_err(), ParseError::NestingTooDeep { limit: 200 });

        let powers = vec!["2"; 500].join("^");
        assert_eq!(parse_str(&powers).unwrap_err(), ParseError::NestingTooDeep { limit: 200 });

        let calls = format!("{}1{}", "abs(".repeat(500), ")".repeat(500));
        assert_eq!(parse_str(&calls).unwrap_err(), ParseError::NestingTooDeep { limit: 200 });
    }

    #[test]
    fn moderate_nesting_parses() {
        let nested = format!("{}1{}", "(".repeat(150), ")".repeat(150));
        assert_eq!(parse_str(&nested).unwrap(), Expr::Number(1.0));
    }

    #[test]
    fn decimal_point_before_call_is_rejected() {
        let err = parse_str("2.factorial(5)").unwrap_err();
        assert_eq!(err,
                   ParseError::UnexpectedToken { found:  "factorial".to_string(),
                                                 column: 3, });
    }
}
