use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
///
/// Columns are 1-based byte offsets into the text handed to the lexer, which
/// is the expression after variable substitution and preprocessing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer found a character that starts no valid token.
    #[error("syntax error at column {column}: unexpected character '{found}'")]
    UnexpectedCharacter {
        /// The offending text.
        found:  String,
        /// Column where the character starts.
        column: usize,
    },
    /// Found a valid token in a position where it is not allowed.
    #[error("syntax error at column {column}: unexpected '{found}'")]
    UnexpectedToken {
        /// The token encountered.
        found:  String,
        /// Column where the token starts.
        column: usize,
    },
    /// Reached the end of input while an operand or `)` was still expected.
    #[error("syntax error: unexpected end of input")]
    UnexpectedEndOfInput,
    /// A `(` was opened at `column` and never closed.
    #[error("syntax error at column {column}: '(' was never closed")]
    ExpectedClosingParen {
        /// Column of the unmatched opening parenthesis.
        column: usize,
    },
    /// Groups, signs or exponents were nested more than `limit` levels deep.
    #[error("syntax error: expression nested more than {limit} levels deep")]
    NestingTooDeep {
        /// The nesting limit that was exceeded.
        limit: usize,
    },
}
