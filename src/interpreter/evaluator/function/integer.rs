use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{f64_to_i64_checked, f64_to_u64_checked, i64_to_f64_checked},
};

/// Computes `n!` for a non-negative integer `n`.
///
/// The product is accumulated in floating point and fails with a range
/// error as soon as it overflows, which happens past `170!`.
///
/// # Example
/// ```
/// use figya::{
///     error::RuntimeError,
///     interpreter::{evaluator::function::integer::factorial, value::core::Value},
/// };
///
/// assert_eq!(factorial(&[Value::Number(5.0)]).unwrap(), Value::Number(120.0));
/// assert_eq!(factorial(&[Value::Number(0.0)]).unwrap(), Value::Number(1.0));
/// assert!(matches!(factorial(&[Value::Number(2.5)]),
///                  Err(RuntimeError::ExpectedInteger { .. })));
/// assert!(matches!(factorial(&[Value::Number(-1.0)]),
///                  Err(RuntimeError::MathDomain { .. })));
/// ```
pub fn factorial(args: &[Value]) -> EvalResult<Value> {
    let n = f64_to_u64_checked(args[0].as_number("factorial")?, "factorial")?;
    let mut product = 1.0_f64;
    let mut k = 2.0_f64;
    for _ in 2..=n {
        product *= k;
        if product.is_infinite() {
            return Err(RuntimeError::MathRange { function: "factorial".to_string() });
        }
        k += 1.0;
    }
    Ok(Value::Number(product))
}

/// Greatest common divisor of any number of integers.
///
/// The result is non-negative. `gcd()` is `0`, the identity of the
/// operation.
///
/// # Example
/// ```
/// use figya::interpreter::{evaluator::function::integer::gcd, value::core::Value};
///
/// let args = [Value::Number(12.0), Value::Number(-18.0), Value::Number(30.0)];
/// assert_eq!(gcd(&args).unwrap(), Value::Number(6.0));
/// assert_eq!(gcd(&[]).unwrap(), Value::Number(0.0));
/// ```
pub fn gcd(args: &[Value]) -> EvalResult<Value> {
    let mut acc = 0u64;
    for n in integer_args("gcd", args)? {
        acc = gcd_pair(acc, n.unsigned_abs());
    }
    to_value("gcd", acc)
}

/// Least common multiple of any number of integers.
///
/// The result is non-negative and `0` if any argument is `0`. `lcm()` is
/// `1`. A result too large to be represented exactly is a range error.
///
/// # Example
/// ```
/// use figya::interpreter::{evaluator::function::integer::lcm, value::core::Value};
///
/// let args = [Value::Number(4.0), Value::Number(6.0)];
/// assert_eq!(lcm(&args).unwrap(), Value::Number(12.0));
/// assert_eq!(lcm(&[]).unwrap(), Value::Number(1.0));
/// ```
pub fn lcm(args: &[Value]) -> EvalResult<Value> {
    let mut acc = 1u64;
    for n in integer_args("lcm", args)? {
        let n = n.unsigned_abs();
        if acc == 0 || n == 0 {
            acc = 0;
            continue;
        }
        acc = (acc / gcd_pair(acc, n)).checked_mul(n)
                                      .ok_or_else(|| RuntimeError::MathRange { function:
                                                                                   "lcm".to_string() })?;
    }
    to_value("lcm", acc)
}

/// Formats an integer in base 16, 8 or 2 with a `0x`, `0o` or `0b` prefix.
///
/// `name` is `"hex"`, `"oct"` or `"bin"`. Negative numbers get a leading
/// minus sign before the prefix. The result is text, not a number.
///
/// # Example
/// ```
/// use figya::interpreter::{evaluator::function::integer::to_base, value::core::Value};
///
/// assert_eq!(to_base("hex", &[Value::Number(255.0)]).unwrap(), Value::from("0xff"));
/// assert_eq!(to_base("oct", &[Value::Number(8.0)]).unwrap(), Value::from("0o10"));
/// assert_eq!(to_base("bin", &[Value::Number(-5.0)]).unwrap(), Value::from("-0b101"));
/// ```
pub fn to_base(name: &str, args: &[Value]) -> EvalResult<Value> {
    let n = f64_to_i64_checked(args[0].as_number(name)?, name)?;
    let magnitude = n.unsigned_abs();
    let digits = match name {
        "hex" => format!("{magnitude:#x}"),
        "oct" => format!("{magnitude:#o}"),
        _ => format!("{magnitude:#b}"),
    };
    let sign = if n < 0 { "-" } else { "" };
    Ok(Value::Text(format!("{sign}{digits}")))
}

fn integer_args(name: &str, args: &[Value]) -> EvalResult<Vec<i64>> {
    args.iter()
        .map(|arg| f64_to_i64_checked(arg.as_number(name)?, name))
        .collect()
}

const fn gcd_pair(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn to_value(name: &str, n: u64) -> EvalResult<Value> {
    let range_error = RuntimeError::MathRange { function: name.to_string() };
    let n = i64::try_from(n).map_err(|_| range_error.clone())?;
    Ok(Value::Number(i64_to_f64_checked(n, range_error)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_overflow_is_a_range_error() {
        assert!(factorial(&[Value::Number(170.0)]).is_ok());
        assert_eq!(factorial(&[Value::Number(171.0)]).unwrap_err(),
                   RuntimeError::MathRange { function: "factorial".to_string() });
    }

    #[test]
    fn gcd_rejects_fractions() {
        let err = gcd(&[Value::Number(1.5), Value::Number(2.0)]).unwrap_err();
        assert_eq!(err,
                   RuntimeError::ExpectedInteger { function: "gcd".to_string(),
                                                   found:    "1.5".to_string(), });
    }

    #[test]
    fn lcm_with_zero() {
        assert_eq!(lcm(&[Value::Number(0.0), Value::Number(5.0)]).unwrap(),
                   Value::Number(0.0));
    }

    #[test]
    fn lcm_overflow_is_a_range_error() {
        let big = Value::Number(9_007_199_254_740_881.0);
        let other = Value::Number(9_007_199_254_740_847.0);
        assert!(matches!(lcm(&[big, other]), Err(RuntimeError::MathRange { .. })));
    }

    #[test]
    fn base_conversion_of_zero() {
        assert_eq!(to_base("hex", &[Value::Number(0.0)]).unwrap(), Value::from("0x0"));
    }

    #[test]
    fn base_conversion_rejects_text() {
        assert!(matches!(to_base("bin", &[Value::from("0xff")]),
                         Err(RuntimeError::UnsupportedOperand { .. })));
    }
}
