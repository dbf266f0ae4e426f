use crate::{
    error::RuntimeError,
    interpreter::evaluator::{
        core::{Context, EvalResult},
        utils::check_float,
    },
};

impl Context {
    /// Evaluates an exponentiation operation.
    ///
    /// Raising zero to a negative power is a division by zero. A negative
    /// base with a fractional exponent has no real result and is a domain
    /// error, and a finite result that overflows is a range error.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    ///
    /// # Returns
    /// The result of `base ^ exponent`.
    ///
    /// # Example
    /// ```
    /// use figya::{error::RuntimeError, interpreter::evaluator::core::Context};
    ///
    /// assert_eq!(Context::eval_pow(2.0, 10.0).unwrap(), 1024.0);
    /// assert_eq!(Context::eval_pow(0.0, -1.0), Err(RuntimeError::DivisionByZero));
    /// assert!(matches!(Context::eval_pow(10.0, 400.0),
    ///                  Err(RuntimeError::MathRange { .. })));
    /// ```
    pub fn eval_pow(base: f64, exponent: f64) -> EvalResult<f64> {
        if base == 0.0 && exponent < 0.0 {
            return Err(RuntimeError::DivisionByZero);
        }
        check_float("pow", &[base, exponent], base.powf(exponent))
    }
}
