use std::fmt;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{builtin, integer, log, min_max},
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values whose length has
/// already been checked against its [`Arity`].
type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means `n` or more arguments.
/// - `Any` places no constraint at all.
#[derive(Debug, Clone, Copy)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
    Any,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every callable builtin.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sin"       => { arity: Arity::Exact(1), func: builtin::sin },
    "cos"       => { arity: Arity::Exact(1), func: builtin::cos },
    "tan"       => { arity: Arity::Exact(1), func: builtin::tan },
    "asin"      => { arity: Arity::Exact(1), func: builtin::asin },
    "acos"      => { arity: Arity::Exact(1), func: builtin::acos },
    "atan"      => { arity: Arity::Exact(1), func: builtin::atan },
    "sqrt"      => { arity: Arity::Exact(1), func: builtin::sqrt },
    "exp"       => { arity: Arity::Exact(1), func: builtin::exp },
    "abs"       => { arity: Arity::Exact(1), func: builtin::abs },
    "degrees"   => { arity: Arity::Exact(1), func: builtin::degrees },
    "radians"   => { arity: Arity::Exact(1), func: builtin::radians },
    "log"       => { arity: Arity::Exact(1), func: |args| log::log("log", args) },
    "log2"      => { arity: Arity::Exact(1), func: |args| log::log("log2", args) },
    "ln"        => { arity: Arity::Exact(1), func: |args| log::log("ln", args) },
    "round"     => { arity: Arity::OneOf(&[1, 2]), func: builtin::round },
    "floor"     => { arity: Arity::Exact(1), func: |args| builtin::unary_round("floor", args) },
    "ceil"      => { arity: Arity::Exact(1), func: |args| builtin::unary_round("ceil", args) },
    "factorial" => { arity: Arity::Exact(1), func: integer::factorial },
    "gcd"       => { arity: Arity::Any, func: integer::gcd },
    "lcm"       => { arity: Arity::Any, func: integer::lcm },
    "hex"       => { arity: Arity::Exact(1), func: |args| integer::to_base("hex", args) },
    "oct"       => { arity: Arity::Exact(1), func: |args| integer::to_base("oct", args) },
    "bin"       => { arity: Arity::Exact(1), func: |args| integer::to_base("bin", args) },
    "min"       => { arity: Arity::AtLeast(1), func: |args| min_max::min_max("min", args) },
    "max"       => { arity: Arity::AtLeast(1), func: |args| min_max::min_max("max", args) },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
            Self::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = |n: usize| if n == 1 { "argument" } else { "arguments" };
        match self {
            Self::Exact(n) => write!(f, "exactly {n} {}", noun(*n)),
            Self::OneOf(counts) => {
                let last = counts.last().copied().unwrap_or_default();
                let rest: Vec<String> = counts.iter()
                                              .take(counts.len().saturating_sub(1))
                                              .map(ToString::to_string)
                                              .collect();
                if rest.is_empty() {
                    write!(f, "{last} {}", noun(last))
                } else {
                    write!(f, "{} or {last} {}", rest.join(", "), noun(last))
                }
            },
            Self::AtLeast(n) => write!(f, "at least {n} {}", noun(*n)),
            Self::Any => write!(f, "any number of arguments"),
        }
    }
}

impl Context {
    /// Evaluates a function call.
    ///
    /// The name is looked up before the arguments are evaluated. Arguments
    /// are then evaluated left to right and their count is checked against
    /// the builtin's arity.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `arguments`: Unevaluated argument expressions.
    ///
    /// # Returns
    /// The function result or an error if lookup, arity or the builtin fails.
    pub(crate) fn eval_function_call(&self, name: &str, arguments: &[Expr]) -> EvalResult<Value> {
        let builtin = BUILTIN_TABLE.iter()
                                   .find(|b| b.name == name)
                                   .ok_or_else(|| RuntimeError::UndefinedFunction { name:
                                                                                        name.to_string() })?;

        let arg_vals = arguments.iter()
                                .map(|arg| self.eval(arg))
                                .collect::<EvalResult<Vec<_>>>()?;

        if !builtin.arity.check(arg_vals.len()) {
            return Err(RuntimeError::ArgumentCount { function: name.to_string(),
                                                     expected: builtin.arity.to_string(),
                                                     found:    arg_vals.len(), });
        }

        (builtin.func)(&arg_vals)
    }
}
