use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, utils::check_float},
        value::core::Value,
    },
};

/// Computes a logarithm of the single argument.
///
/// `name` selects the base: `"log"` is base 10, `"log2"` base 2 and `"ln"`
/// the natural logarithm. Zero and negative arguments are domain errors
/// rather than `-inf` or NaN.
///
/// # Example
/// ```
/// use figya::{
///     error::RuntimeError,
///     interpreter::{evaluator::function::log::log, value::core::Value},
/// };
///
/// assert_eq!(log("log", &[Value::Number(1000.0)]).unwrap(), Value::Number(3.0));
/// assert_eq!(log("log2", &[Value::Number(8.0)]).unwrap(), Value::Number(3.0));
/// assert!(matches!(log("ln", &[Value::Number(0.0)]),
///                  Err(RuntimeError::MathDomain { .. })));
/// ```
pub fn log(name: &str, args: &[Value]) -> EvalResult<Value> {
    let x = args[0].as_number(name)?;
    if x <= 0.0 {
        return Err(RuntimeError::MathDomain { function: name.to_string() });
    }
    let result = match name {
        "log" => x.log10(),
        "log2" => x.log2(),
        _ => x.ln(),
    };
    Ok(Value::Number(check_float(name, &[x], result)?))
}
