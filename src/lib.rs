//! # figya
//!
//! figya is a terminal calculator. It evaluates arithmetic expressions,
//! converts between units, and keeps every result in a store of `$`
//! variables that can be saved and restored as named workspaces.
//!
//! ```
//! use figya::{router::Calculator, variables::VariableStore};
//!
//! let calc = Calculator::new();
//! let mut store = VariableStore::new();
//!
//! calc.evaluate("$r = 2", &mut store).unwrap();
//! let area = calc.evaluate("pi * $r^2", &mut store).unwrap().unwrap();
//! assert_eq!(area.to_string(), "$1 = 12.56637061");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator types. The AST is
/// built by the parser and walked by the evaluator.
pub mod ast;
/// Session commands such as `list`, `save` and `delete`.
///
/// Commands are recognised before a line reaches the router, and they are
/// the only way to change saved workspaces.
pub mod commands;
/// Reads `<quantity> in <unit>` lines and hands them to a unit system.
pub mod conversion;
/// Provides unified error types for parsing and evaluation.
///
/// Every failure of a line is one [`error::Error`], wrapping the syntax,
/// runtime or variable error that caused it.
pub mod error;
/// Display formatting of numbers and values.
pub mod format;
/// Lexing, parsing and evaluation of arithmetic expressions.
///
/// This module ties the lexer, parser and evaluator together behind
/// [`interpreter::evaluate`].
///
/// # Responsibilities
/// - Tokenizes and parses expression text with column-accurate errors.
/// - Evaluates the tree against a fixed set of constants and builtins.
/// - Reports domain, range and arity failures as runtime errors.
pub mod interpreter;
/// Saving and loading variable stores as JSON files.
pub mod persistence;
/// Textual shorthand rewrites applied before parsing.
pub mod preprocess;
/// The per-line pipeline: assignment, conversion, arithmetic.
pub mod router;
/// Units, dimensions and quantities.
///
/// The [`units::UnitSystem`] trait is what the conversion resolver talks to;
/// [`units::UnitRegistry`] is the built-in implementation.
pub mod units;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u64` and `f64` without silent data loss.
pub mod util;
/// The `$` variable store and reference substitution.
pub mod variables;
