use std::fmt;

use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in an expression.
///
/// The same token set serves both the arithmetic parser and the quantity
/// parser of the unit registry, which is why identifiers accept a handful of
/// unit symbols (`°C`, `µm`, `Ω`, `Å`).
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14`, `.5`, `5.` or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Identifier tokens; constants, function names or unit names.
    #[regex(r"[a-zA-Z_°µΩÅ][a-zA-Z0-9_°µΩÅ]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `**`
    #[token("**")]
    StarStar,
    /// `//`
    #[token("//")]
    SlashSlash,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// Whitespace between tokens.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::StarStar => write!(f, "**"),
            Self::SlashSlash => write!(f, "//"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::Caret => write!(f, "^"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Comma => write!(f, ","),
            Self::Ignored => write!(f, " "),
        }
    }
}

/// Splits `source` into tokens paired with their 1-based column.
///
/// # Errors
/// Returns `ParseError::UnexpectedCharacter` for the first character that
/// cannot start a token, such as `$`, `!`, `=` or a stray `.`.
///
/// # Example
/// ```
/// use figya::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2 * pi").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Number(2.0), 1),
///                 (Token::Star, 3),
///                 (Token::Identifier("pi".to_string()), 5)]);
///
/// assert!(tokenize("2.factorial(5)").is_ok());
/// assert!(tokenize("3 $ 4").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let column = lexer.span().start + 1;
        match token {
            Ok(tok) => tokens.push((tok, column)),
            Err(()) => {
                return Err(ParseError::UnexpectedCharacter { found: lexer.slice().to_string(),
                                                             column });
            },
        }
    }

    Ok(tokens)
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value.
/// - `None`: If the slice is not a valid float, which turns into a lexer
///   error.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_in_all_notations() {
        let tokens = tokenize("42 3.14 .5 5. 2.1e-10 1E3").unwrap();
        let values: Vec<_> = tokens.into_iter().map(|(t, _)| t).collect();
        assert_eq!(values,
                   vec![Token::Number(42.0),
                        Token::Number(3.14),
                        Token::Number(0.5),
                        Token::Number(5.0),
                        Token::Number(2.1e-10),
                        Token::Number(1000.0)]);
    }

    #[test]
    fn double_character_operators_win_over_single() {
        let tokens = tokenize("2**3//4").unwrap();
        let values: Vec<_> = tokens.into_iter().map(|(t, _)| t).collect();
        assert_eq!(values,
                   vec![Token::Number(2.0),
                        Token::StarStar,
                        Token::Number(3.0),
                        Token::SlashSlash,
                        Token::Number(4.0)]);
    }

    #[test]
    fn unit_symbols_are_identifiers() {
        let tokens = tokenize("°C µm").unwrap();
        assert_eq!(tokens[0].0, Token::Identifier("°C".to_string()));
        assert_eq!(tokens[1].0, Token::Identifier("µm".to_string()));
    }

    #[test]
    fn stray_character_reports_column() {
        let err = tokenize("1 + !").unwrap_err();
        assert_eq!(err,
                   ParseError::UnexpectedCharacter { found:  "!".to_string(),
                                                     column: 5, });
    }
}
