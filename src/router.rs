use std::{fmt, sync::LazyLock};

use regex::Regex;
use tracing::debug;

use crate::{
    conversion::{self, Conversion},
    error::{CalcResult, Error},
    format::format_value,
    interpreter::{self, value::core::Value},
    preprocess::preprocess,
    units::{UnitRegistry, UnitSystem},
    variables::VariableStore,
};

static ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$([^\s=]*)\s*=(.*)$").expect("assignment pattern is valid"));

static ASSIGNABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*$").expect("name pattern is valid"));

/// A stored result, ready to be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The name the value was stored under, `$` included.
    pub name:    String,
    /// The stored value.
    pub value:   Value,
    /// The value as shown to the user. For conversions this carries the
    /// unit symbol, which the stored value does not.
    pub display: String,
}

impl Evaluation {
    fn new(name: String, value: Value) -> Self {
        let display = format_value(&value);
        Self { name,
               value,
               display }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.display)
    }
}

/// Routes an input line to assignment, unit conversion or arithmetic.
///
/// The calculator holds no session state of its own; results go into the
/// [`VariableStore`] handed to [`Calculator::evaluate`].
#[derive(Debug, Clone, Default)]
pub struct Calculator<U = UnitRegistry> {
    units: U,
}

impl Calculator {
    /// A calculator backed by the built-in unit registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { units: UnitRegistry::new() }
    }
}

impl<U: UnitSystem> Calculator<U> {
    /// A calculator backed by another unit system.
    pub const fn with_units(units: U) -> Self {
        Self { units }
    }

    /// Evaluates one input line and stores its result.
    ///
    /// Lines are handled in this order:
    /// 1. Blank lines produce nothing.
    /// 2. `$name = expr` evaluates `expr` as arithmetic and stores it under
    ///    `$name`.
    /// 3. `<quantity> in <unit>` is tried as a unit conversion; the converted
    ///    magnitude gets the next auto-name.
    /// 4. Anything else is arithmetic, after `$` substitution and
    ///    preprocessing; the result gets the next auto-name.
    ///
    /// The store is only written once a value exists, so a failing line
    /// leaves it untouched.
    ///
    /// # Errors
    /// Syntax, runtime and variable errors of the line, and
    /// `MalformedAssignmentTarget` for targets like `$1 = 2` or `$ = 2`.
    ///
    /// # Example
    /// ```
    /// use figya::{router::Calculator, variables::VariableStore};
    ///
    /// let calc = Calculator::new();
    /// let mut store = VariableStore::new();
    ///
    /// let first = calc.evaluate("2 + 2", &mut store).unwrap().unwrap();
    /// assert_eq!(first.to_string(), "$1 = 4");
    ///
    /// let rate = calc.evaluate("$rate = $1 * 1.5", &mut store).unwrap().unwrap();
    /// assert_eq!(rate.to_string(), "$rate = 6");
    ///
    /// let miles = calc.evaluate("10 km in miles", &mut store).unwrap().unwrap();
    /// assert_eq!(miles.to_string(), "$2 = 6.213711922 mi");
    ///
    /// assert!(calc.evaluate("   ", &mut store).unwrap().is_none());
    /// ```
    pub fn evaluate(&self, line: &str, store: &mut VariableStore) -> CalcResult<Option<Evaluation>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        if let Some(caps) = ASSIGNMENT.captures(line) {
            let target = &caps[1];
            if target == "_" || !ASSIGNABLE.is_match(target) {
                return Err(Error::MalformedAssignmentTarget { target: format!("${target}") });
            }
            let value = arithmetic(&caps[2], store)?;
            let name = format!("${target}");
            debug!(%name, "assigning variable");
            store.set(&name, value.clone());
            return Ok(Some(Evaluation::new(name, value)));
        }

        if let Ok(substituted) = store.substitute(line)
           && let Conversion::Converted { magnitude, display } = conversion::resolve(&self.units, &substituted)
        {
            let value = Value::Number(magnitude);
            let name = store.add_result(value.clone());
            return Ok(Some(Evaluation { name,
                                        value,
                                        display }));
        }

        let value = arithmetic(line, store)?;
        let name = store.add_result(value.clone());
        Ok(Some(Evaluation::new(name, value)))
    }
}

/// Substitutes, preprocesses and evaluates `expr`.
fn arithmetic(expr: &str, store: &VariableStore) -> CalcResult<Value> {
    let substituted = store.substitute(expr)?;
    interpreter::evaluate(&preprocess(&substituted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, RuntimeError, VariableError};

    fn run(lines: &[&str]) -> (VariableStore, Vec<CalcResult<Option<Evaluation>>>) {
        let calc = Calculator::new();
        let mut store = VariableStore::new();
        let results = lines.iter().map(|line| calc.evaluate(line, &mut store)).collect();
        (store, results)
    }

    #[test]
    fn results_get_auto_names() {
        let (store, results) = run(&["1 + 1", "$1 * 10"]);
        assert_eq!(results[1].as_ref().unwrap().as_ref().unwrap().to_string(), "$2 = 20");
        assert_eq!(store.get("$_"), Some(&Value::Number(20.0)));
        assert_eq!(store.counter(), 2);
    }

    #[test]
    fn assignment_does_not_advance_the_counter() {
        let (store, _) = run(&["$x = 3", "$x ^ 2"]);
        assert_eq!(store.get("$x"), Some(&Value::Number(3.0)));
        assert_eq!(store.get("$1"), Some(&Value::Number(9.0)));
        assert_eq!(store.counter(), 1);
    }

    #[test]
    fn malformed_targets() {
        for line in ["$1 = 2", "$_ = 2", "$ = 2", "$a-b = 2"] {
            let (store, results) = run(&[line]);
            assert!(matches!(results[0], Err(Error::MalformedAssignmentTarget { .. })), "{line}");
            assert!(store.is_empty());
        }
    }

    #[test]
    fn failures_leave_the_store_alone() {
        let (store, results) = run(&["1 / 0", "$nope + 1", "2 +"]);
        assert_eq!(results[0], Err(Error::Runtime(RuntimeError::DivisionByZero)));
        assert_eq!(results[1],
                   Err(Error::Variable(VariableError::UndefinedVariable { name: "$nope".to_string() })));
        assert_eq!(results[2], Err(Error::Parse(ParseError::UnexpectedEndOfInput)));
        assert!(store.is_empty());
        assert_eq!(store.counter(), 0);
    }

    #[test]
    fn conversions_store_the_magnitude() {
        let (store, results) = run(&["2 km in m", "$1 / 4"]);
        let first = results[0].as_ref().unwrap().as_ref().unwrap();
        assert_eq!(first.display, "2,000 m");
        assert_eq!(first.value, Value::Number(2000.0));
        assert_eq!(store.get("$2"), Some(&Value::Number(500.0)));
    }

    #[test]
    fn conversions_see_substituted_variables() {
        let (_, results) = run(&["$d = 3", "$d ft to in"]);
        assert_eq!(results[1].as_ref().unwrap().as_ref().unwrap().display, "36 in");
    }

    #[test]
    fn text_results() {
        let (store, results) = run(&["bin(5)"]);
        assert_eq!(results[0].as_ref().unwrap().as_ref().unwrap().to_string(), "$1 = 0b101");
        assert_eq!(store.get("$1"), Some(&Value::from("0b101")));
    }
}
