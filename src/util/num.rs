use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Parameters
/// - `value`: The integer to convert.
/// - `error`: The error to return if conversion is not lossless.
///
/// ## Example
/// ```
/// use figya::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Converts an `f64` argument of `function` to `i64`.
///
/// The value must be finite and integral. Integral values whose magnitude
/// exceeds `MAX_SAFE_U64_INT` are rejected with a range error, since every
/// integer arithmetic builtin converts its result back to `f64`.
///
/// ## Errors
/// - `RuntimeError::ExpectedInteger` for fractional, infinite or NaN input.
/// - `RuntimeError::MathRange` for integral input that is too large.
///
/// ## Example
/// ```
/// use figya::{error::RuntimeError, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(-12.0, "gcd").unwrap(), -12);
///
/// let err = f64_to_i64_checked(1.5, "gcd").unwrap_err();
/// assert!(matches!(err, RuntimeError::ExpectedInteger { .. }));
///
/// let err = f64_to_i64_checked(1e300, "gcd").unwrap_err();
/// assert!(matches!(err, RuntimeError::MathRange { .. }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64, function: &str) -> EvalResult<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(RuntimeError::ExpectedInteger { function: function.to_string(),
                                                   found:    value.to_string(), });
    }
    if value.abs() > MAX_SAFE_U64_INT as f64 {
        return Err(RuntimeError::MathRange { function: function.to_string() });
    }
    Ok(value as i64)
}

/// Converts a non-negative integral `f64` argument of `function` to `u64`.
///
/// ## Errors
/// - `RuntimeError::ExpectedInteger` for fractional, infinite or NaN input.
/// - `RuntimeError::MathDomain` for negative input.
/// - `RuntimeError::MathRange` for input above `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use figya::{error::RuntimeError, util::num::f64_to_u64_checked};
///
/// assert_eq!(f64_to_u64_checked(7.0, "factorial").unwrap(), 7);
///
/// let err = f64_to_u64_checked(-5.0, "factorial").unwrap_err();
/// assert!(matches!(err, RuntimeError::MathDomain { .. }));
/// ```
pub fn f64_to_u64_checked(value: f64, function: &str) -> EvalResult<u64> {
    let n = f64_to_i64_checked(value, function)?;
    u64::try_from(n).map_err(|_| RuntimeError::MathDomain { function: function.to_string() })
}
