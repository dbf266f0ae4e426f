use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Classifies the outcome of a float operation.
///
/// IEEE arithmetic never fails, it produces NaN or an infinity instead. A
/// NaN that did not come from a NaN input means the input was outside the
/// domain (`sqrt(-1)`, `asin(2)`), and an infinity produced from finite
/// inputs means the exact result overflowed (`exp(1000)`).
///
/// # Parameters
/// - `function`: Name reported in the error.
/// - `inputs`: The operands the result was computed from.
/// - `result`: The raw result.
///
/// # Returns
/// `Ok(result)` when the result is acceptable.
///
/// # Example
/// ```
/// use figya::{error::RuntimeError, interpreter::evaluator::utils::check_float};
///
/// assert_eq!(check_float("sqrt", &[4.0], 2.0).unwrap(), 2.0);
/// assert!(matches!(check_float("sqrt", &[-1.0], f64::NAN),
///                  Err(RuntimeError::MathDomain { .. })));
/// assert!(matches!(check_float("exp", &[1000.0], f64::INFINITY),
///                  Err(RuntimeError::MathRange { .. })));
/// assert!(check_float("exp", &[f64::INFINITY], f64::INFINITY).is_ok());
/// ```
pub fn check_float(function: &str, inputs: &[f64], result: f64) -> EvalResult<f64> {
    if result.is_nan() && !inputs.iter().any(|x| x.is_nan()) {
        return Err(RuntimeError::MathDomain { function: function.to_string() });
    }
    if result.is_infinite() && inputs.iter().all(|x| x.is_finite()) {
        return Err(RuntimeError::MathRange { function: function.to_string() });
    }
    Ok(result)
}

/// Computes floored division and modulo together.
///
/// The quotient is rounded towards negative infinity and the remainder takes
/// the sign of the divisor, so that `a == q * b + r` holds as closely as
/// floats allow. The divisor must be non-zero.
///
/// # Example
/// ```
/// use figya::interpreter::evaluator::utils::floor_divmod;
///
/// assert_eq!(floor_divmod(7.0, 2.0), (3.0, 1.0));
/// assert_eq!(floor_divmod(-7.0, 2.0), (-4.0, 1.0));
/// assert_eq!(floor_divmod(7.0, -2.0), (-4.0, -1.0));
/// assert_eq!(floor_divmod(5.5, 2.0), (2.0, 1.5));
/// ```
#[must_use]
pub fn floor_divmod(a: f64, b: f64) -> (f64, f64) {
    let mut rem = a % b;
    let mut div = (a - rem) / b;

    if rem == 0.0 {
        rem = 0.0_f64.copysign(b);
    } else if (b < 0.0) != (rem < 0.0) {
        rem += b;
        div -= 1.0;
    }

    let quotient = if div == 0.0 {
        0.0_f64.copysign(a / b)
    } else {
        let floor = div.floor();
        if div - floor > 0.5 { floor + 1.0 } else { floor }
    };

    (quotient, rem)
}
