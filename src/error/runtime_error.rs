use thiserror::Error;

/// Represents all errors that can occur during evaluation.
///
/// `UndefinedName` and `UndefinedFunction` mark lookups outside the
/// whitelist of constants and functions. Every other variant is an
/// evaluation failure whose message carries the underlying cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Referenced a name that is neither a constant nor a function.
    #[error("name '{name}' is not defined")]
    UndefinedName {
        /// The name as written.
        name: String,
    },
    /// Called a function that is not in the builtin table.
    #[error("function '{name}' is not defined")]
    UndefinedFunction {
        /// The function name as written.
        name: String,
    },
    /// A builtin was called with an unsupported number of arguments.
    #[error("{function}() takes {expected} ({found} given)")]
    ArgumentCount {
        /// The builtin that was called.
        function: String,
        /// Human readable arity, e.g. `exactly 1 argument`.
        expected: String,
        /// Number of arguments actually supplied.
        found:    usize,
    },
    /// Division or modulo with a zero right-hand side.
    #[error("division by zero")]
    DivisionByZero,
    /// The argument lies outside the domain of the operation.
    #[error("math domain error in {function}()")]
    MathDomain {
        /// The function or operator that failed.
        function: String,
    },
    /// The exact result is finite but not representable as a float.
    #[error("numerical result out of range in {function}()")]
    MathRange {
        /// The function or operator that failed.
        function: String,
    },
    /// An integer argument was required but something else was found.
    #[error("{function}() requires integer arguments, found {found}")]
    ExpectedInteger {
        /// The builtin that was called.
        function: String,
        /// The rejected argument, as text.
        found:    String,
    },
    /// An operator or function received a text value.
    #[error("unsupported operand for {operation}: '{operand}'")]
    UnsupportedOperand {
        /// The operator symbol or function name.
        operation: String,
        /// The rejected operand, as text.
        operand:   String,
    },
}
