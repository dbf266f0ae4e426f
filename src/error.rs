use thiserror::Error;

/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of an
/// arithmetic expression: stray characters, unexpected tokens, unbalanced
/// parentheses and premature end of input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a parsed
/// expression: undefined names and functions, wrong arity, domain and range
/// failures, and operations on values of the wrong kind.
pub mod runtime_error;
/// Variable store errors.
///
/// Raised while substituting `$` references into an expression: references
/// to variables that do not exist and reference cycles.
pub mod variable_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use variable_error::VariableError;

/// Any failure that can surface from evaluating one input line.
///
/// Every variant is reported to the user as a single message. None of them
/// leave the variable store modified, because the store is only written after
/// a value has been produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The expression could not be tokenized or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The expression parsed but could not be evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// A `$` reference could not be resolved.
    #[error(transparent)]
    Variable(#[from] VariableError),
    /// The left-hand side of `$name = ...` is not an assignable name.
    #[error("cannot assign to '{target}': names must start with a letter or underscore")]
    MalformedAssignmentTarget {
        /// The rejected target, including its `$` prefix.
        target: String,
    },
}

/// Result type for line-level evaluation.
pub type CalcResult<T> = Result<T, Error>;
