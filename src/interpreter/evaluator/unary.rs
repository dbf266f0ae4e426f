use crate::{
    ast::UnaryOperator,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Both operators require a number; text operands are rejected.
    ///
    /// # Example
    /// ```
    /// use figya::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Number(5.0)).unwrap();
    /// assert_eq!(v, Value::Number(-5.0));
    ///
    /// assert!(Context::eval_unary(UnaryOperator::Plus, &Value::from("0xff")).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
        let x = value.as_number(&op.to_string())?;
        match op {
            UnaryOperator::Negate => Ok(Value::Number(-x)),
            UnaryOperator::Plus => Ok(Value::Number(x)),
        }
    }
}
