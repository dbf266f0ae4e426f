use std::{
    collections::HashMap,
    f64::consts::{E, PI, TAU},
};

use crate::{ast::Expr, error::RuntimeError, interpreter::value::core::Value};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Names that evaluate to a fixed number.
pub const CONSTANTS: &[(&str, f64)] = &[("pi", PI), ("e", E), ("tau", TAU), ("inf", f64::INFINITY)];

/// Stores the evaluation context.
///
/// Expressions cannot define anything, so the context only holds the
/// read-only table of named constants. Builtin functions live in a static
/// table, see [`crate::interpreter::evaluator::function::core`].
///
/// ## Usage
///
/// A `Context` is cheap to build and can be reused for any number of
/// expressions.
#[derive(Debug, Clone)]
pub struct Context {
    /// Named constants, such as `pi`.
    constants: HashMap<&'static str, f64>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with the standard constants `pi`, `e`, `tau` and
    /// `inf`.
    #[must_use]
    pub fn new() -> Self {
        Self { constants: CONSTANTS.iter().copied().collect() }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// Operands are evaluated left to right. For a function call the name
    /// is resolved before any argument is evaluated, so `foo(1/0)` reports
    /// the unknown function rather than the division.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The computed [`Value`].
    ///
    /// # Example
    /// ```
    /// use figya::{
    ///     ast::{BinaryOperator, Expr},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let expr = Expr::BinaryOp { left:  Box::new(Expr::Number(2.0)),
    ///                             op:    BinaryOperator::Mul,
    ///                             right: Box::new(Expr::Name("pi".to_string())), };
    ///
    /// let value = Context::new().eval(&expr).unwrap();
    /// assert_eq!(value, Value::Number(std::f64::consts::TAU));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Name(name) => self.eval_name(name),
            Expr::UnaryOp { op, expr } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, &value)
            },
            Expr::BinaryOp { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right)
            },
            Expr::FunctionCall { name, arguments } => self.eval_function_call(name, arguments),
        }
    }

    /// Resolves a bare name to its constant value.
    fn eval_name(&self, name: &str) -> EvalResult<Value> {
        self.constants
            .get(name)
            .map(|n| Value::Number(*n))
            .ok_or_else(|| RuntimeError::UndefinedName { name: name.to_string() })
    }
}
