use crate::{
    error::CalcResult,
    interpreter::{evaluator::core::Context, lexer::tokenize, parser::core::parse, value::core::Value},
};

/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, applies operators and builtins, and
/// turns IEEE special values into domain and range errors where a
/// mathematical result does not exist.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Resolves constants and dispatches calls to the builtin table.
/// - Reports runtime errors such as division by zero or invalid arguments.
pub mod evaluator;
/// The lexer module tokenizes expressions for further parsing.
///
/// The lexer reads the raw text and produces a stream of tokens, each paired
/// with the column where it starts. This is the first stage of evaluation and
/// is shared with the quantity parser of the unit registry.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Enforces operator precedence and associativity.
/// - Reports syntax errors with the column of the offending token.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
pub mod value;

/// Evaluates one arithmetic expression.
///
/// The text must already be free of `$` references and preprocessed; see
/// [`crate::router::Calculator`] for the full line pipeline.
///
/// # Errors
/// Returns a syntax error if the text cannot be tokenized or parsed, and a
/// runtime error if evaluation fails.
///
/// # Example
/// ```
/// use figya::interpreter::{evaluate, value::core::Value};
///
/// assert_eq!(evaluate("2 ^ 10 // 3").unwrap(), Value::Number(341.0));
/// assert_eq!(evaluate("hex(255)").unwrap(), Value::from("0xff"));
/// assert!(evaluate("1 / 0").is_err());
/// ```
pub fn evaluate(source: &str) -> CalcResult<Value> {
    let tokens = tokenize(source)?;
    let expr = parse(&tokens)?;
    Ok(Context::new().eval(&expr)?)
}
