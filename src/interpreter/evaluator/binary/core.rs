use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::floor_divmod,
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// Addition, subtraction and multiplication follow IEEE semantics and may
    /// overflow to infinity. Division, floor division and modulo reject a
    /// zero divisor. Power calls [`Context::eval_pow`].
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use figya::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_binary(BinaryOperator::Mod,
    ///                                   &Value::Number(-7.0),
    ///                                   &Value::Number(3.0));
    /// assert_eq!(result.unwrap(), Value::Number(2.0));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, FloorDiv, Mod, Mul, Pow, Sub};

        let symbol = op.to_string();
        let a = left.as_number(&symbol)?;
        let b = right.as_number(&symbol)?;

        let result = match op {
            Add => a + b,
            Sub => a - b,
            Mul => a * b,
            Div => {
                Self::check_divisor(b)?;
                a / b
            },
            FloorDiv => {
                Self::check_divisor(b)?;
                floor_divmod(a, b).0
            },
            Mod => {
                Self::check_divisor(b)?;
                floor_divmod(a, b).1
            },
            Pow => Self::eval_pow(a, b)?,
        };

        Ok(Value::Number(result))
    }

    fn check_divisor(b: f64) -> EvalResult<()> {
        if b == 0.0 {
            return Err(RuntimeError::DivisionByZero);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(op: BinaryOperator, a: f64, b: f64) -> EvalResult<Value> {
        Context::eval_binary(op, &Value::Number(a), &Value::Number(b))
    }

    #[test]
    fn floor_division_rounds_down() {
        assert_eq!(eval(BinaryOperator::FloorDiv, 7.0, 2.0).unwrap(), Value::Number(3.0));
        assert_eq!(eval(BinaryOperator::FloorDiv, -7.0, 2.0).unwrap(), Value::Number(-4.0));
    }

    #[test]
    fn modulo_takes_sign_of_divisor() {
        assert_eq!(eval(BinaryOperator::Mod, 7.0, -3.0).unwrap(), Value::Number(-2.0));
        assert_eq!(eval(BinaryOperator::Mod, 7.5, 2.0).unwrap(), Value::Number(1.5));
    }

    #[test]
    fn zero_divisor_is_an_error() {
        for op in [BinaryOperator::Div, BinaryOperator::FloorDiv, BinaryOperator::Mod] {
            assert_eq!(eval(op, 1.0, 0.0).unwrap_err(), RuntimeError::DivisionByZero);
        }
    }

    #[test]
    fn text_operand_names_the_operator() {
        let err = Context::eval_binary(BinaryOperator::Add,
                                       &Value::from("0xff"),
                                       &Value::Number(1.0)).unwrap_err();
        assert_eq!(err,
                   RuntimeError::UnsupportedOperand { operation: "+".to_string(),
                                                      operand:   "0xff".to_string(), });
    }

    #[test]
    fn multiplication_overflows_to_infinity() {
        assert_eq!(eval(BinaryOperator::Mul, 1e308, 10.0).unwrap(),
                   Value::Number(f64::INFINITY));
    }
}
