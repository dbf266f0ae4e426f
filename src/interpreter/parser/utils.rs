use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Parses a comma-separated argument list up to the closing `)`.
///
/// The opening `(` has already been consumed. An immediately encountered `)`
/// produces an empty list. Each element is parsed by `parse_item`, after
/// which either a comma (continue) or `)` (end) must follow.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or `)`.
/// - `parse_item`: Function used to parse each list element.
/// - `open_column`: Column of the opening `(`, reported when the list is never
///   closed.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - a token other than `,` or `)` follows an item,
/// - the stream ends before the closing `)`.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    open_column: usize)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((Token::RParen, _)) = tokens.peek() {
        tokens.next();
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RParen, _)) => break,
            Some((tok, column)) => {
                return Err(ParseError::UnexpectedToken { found:  tok.to_string(),
                                                         column: *column, });
            },
            None => return Err(ParseError::ExpectedClosingParen { column: open_column }),
        }
    }
    Ok(items)
}
