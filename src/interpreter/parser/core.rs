use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{lexer::Token, parser::binary::parse_additive},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// How deeply groups, prefix signs and exponents may nest before parsing
/// gives up with [`ParseError::NestingTooDeep`].
pub const MAX_NESTING: usize = 200;

/// Parses a full expression.
///
/// Begins at the lowest-precedence level, addition, and recursively descends
/// through the precedence hierarchy.
///
/// Grammar: `expression := additive`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, column)` pairs.
/// - `depth`: Nesting level of this expression; `0` at the top.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_additive(tokens, depth)
}

/// Parses a complete token list into exactly one expression.
///
/// Unlike [`parse_expression`], this requires the whole input to be consumed:
/// `2 3` parses `2` and then fails on the dangling `3`.
///
/// # Errors
/// - `UnexpectedEndOfInput` when `tokens` is empty or ends mid-expression.
/// - `UnexpectedToken` for the first token that does not fit the grammar.
/// - `ExpectedClosingParen` for an unbalanced `(`.
/// - `NestingTooDeep` past [`MAX_NESTING`] levels.
///
/// # Example
/// ```
/// use figya::{
///     ast::{BinaryOperator, Expr},
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let tokens = tokenize("1 + 2").unwrap();
/// let expr = parse(&tokens).unwrap();
/// assert!(matches!(expr, Expr::BinaryOp { op: BinaryOperator::Add, .. }));
///
/// let tokens = tokenize("2 3").unwrap();
/// assert!(parse(&tokens).is_err());
/// ```
pub fn parse(tokens: &[(Token, usize)]) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter, 0)?;

    match iter.next() {
        None => Ok(expr),
        Some((tok, column)) => Err(ParseError::UnexpectedToken { found:  tok.to_string(),
                                                                 column: *column, }),
    }
}
