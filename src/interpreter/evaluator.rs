/// Binary operator evaluation logic.
///
/// Handles the arithmetic operators, including floor division, floored
/// modulo and exponentiation.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation and unary plus.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the main evaluation entry point, the constant table and name
/// resolution.
pub mod core;

/// Utility functions for evaluation.
///
/// Provides the checks that turn IEEE special values into domain and range
/// errors.
pub mod utils;

/// Function evaluation.
///
/// Handles builtin function calls, argument checking, and return value
/// computation.
pub mod function;
