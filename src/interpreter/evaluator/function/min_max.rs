use crate::interpreter::{evaluator::core::EvalResult, value::core::Value};

/// Computes the minimum or maximum of one or more numeric values.
///
/// The operation is selected by the `name` parameter, which must be `"min"`
/// or `"max"`. The first argument is the starting candidate and is replaced
/// only by a strictly smaller (or larger) one, so ties keep the earliest
/// argument and a NaN in first position is never replaced.
///
/// # Parameters
/// - `name`: Either `"min"` or `"max"`.
/// - `args`: Slice containing at least one argument.
///
/// # Example
/// ```
/// use figya::interpreter::{evaluator::function::min_max::min_max, value::core::Value};
///
/// let args = [Value::Number(3.0), Value::Number(7.0), Value::Number(-1.0)];
/// assert_eq!(min_max("min", &args).unwrap(), Value::Number(-1.0));
/// assert_eq!(min_max("max", &args).unwrap(), Value::Number(7.0));
/// ```
pub fn min_max(name: &str, args: &[Value]) -> EvalResult<Value> {
    let mut best = args[0].as_number(name)?;
    for arg in &args[1..] {
        let candidate = arg.as_number(name)?;
        let better = if name == "min" {
            candidate < best
        } else {
            candidate > best
        };
        if better {
            best = candidate;
        }
    }
    Ok(Value::Number(best))
}
