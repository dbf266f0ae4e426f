use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::check_float},
        value::core::Value,
    },
    util::num::f64_to_i64_checked,
};

/// Applies a unary float function to the single numeric argument.
///
/// The generated functions expect exactly one argument, which the call
/// dispatcher has already verified. The raw result goes through
/// [`check_float`], so `asin(2)` is a domain error rather than NaN.
///
/// # Example
/// ```
/// use figya::interpreter::{evaluator::function::builtin::sin, value::core::Value};
///
/// let x = Value::Number(std::f64::consts::PI / 2.0);
/// let r = sin(&[x]).unwrap();
///
/// assert_eq!(r, Value::Number(1.0));
/// ```
macro_rules! float_builtin {
    ($fname:ident, $method:ident) => {
        pub fn $fname(args: &[Value]) -> EvalResult<Value> {
            let name = stringify!($fname);
            let x = args[0].as_number(name)?;
            Ok(Value::Number(check_float(name, &[x], x.$method())?))
        }
    };
}

float_builtin!(sin, sin);
float_builtin!(cos, cos);
float_builtin!(tan, tan);
float_builtin!(asin, asin);
float_builtin!(acos, acos);
float_builtin!(atan, atan);
float_builtin!(sqrt, sqrt);
float_builtin!(exp, exp);
float_builtin!(abs, abs);
float_builtin!(degrees, to_degrees);
float_builtin!(radians, to_radians);

/// Rounds to the nearest integer or to `ndigits` decimal places.
///
/// Ties go to the even neighbour, so `round(2.5)` is `2` and `round(0.125,
/// 2)` is `0.12`. A negative `ndigits` rounds to tens, hundreds and so on.
/// Without `ndigits` the result must be an integer, so NaN is a domain error
/// and infinities are range errors; with `ndigits` they pass through.
///
/// # Example
/// ```
/// use figya::interpreter::{evaluator::function::builtin::round, value::core::Value};
///
/// assert_eq!(round(&[Value::Number(2.5)]).unwrap(), Value::Number(2.0));
/// assert_eq!(round(&[Value::Number(3.14159), Value::Number(2.0)]).unwrap(),
///            Value::Number(3.14));
/// assert_eq!(round(&[Value::Number(1234.0), Value::Number(-2.0)]).unwrap(),
///            Value::Number(1200.0));
/// ```
pub fn round(args: &[Value]) -> EvalResult<Value> {
    let x = args[0].as_number("round")?;
    let Some(ndigits) = args.get(1) else {
        return unary_round("round", args);
    };
    let ndigits = f64_to_i64_checked(ndigits.as_number("round")?, "round")?;

    if !x.is_finite() || ndigits > 308 {
        return Ok(Value::Number(x));
    }
    if ndigits < -308 {
        return Ok(Value::Number(0.0_f64.copysign(x)));
    }

    #[allow(clippy::cast_possible_truncation)]
    let scale = 10f64.powi(ndigits.unsigned_abs() as i32);
    let rounded = if ndigits >= 0 {
        let scaled = x * scale;
        if scaled.is_infinite() {
            return Ok(Value::Number(x));
        }
        scaled.round_ties_even() / scale
    } else {
        (x / scale).round_ties_even() * scale
    };

    check_float("round", &[x], rounded).map(Value::Number)
}

/// Rounds the single argument to an integer with the named rule.
///
/// `name` is one of `"floor"`, `"ceil"` or `"round"`.
///
/// # Errors
/// - `MathDomain` for NaN.
/// - `MathRange` for infinities.
pub fn unary_round(name: &str, args: &[Value]) -> EvalResult<Value> {
    let x = args[0].as_number(name)?;
    if x.is_nan() {
        return Err(RuntimeError::MathDomain { function: name.to_string() });
    }
    if x.is_infinite() {
        return Err(RuntimeError::MathRange { function: name.to_string() });
    }
    let result = match name {
        "floor" => x.floor(),
        "ceil" => x.ceil(),
        _ => x.round_ties_even(),
    };
    Ok(Value::Number(result))
}
