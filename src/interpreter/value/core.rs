use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{error::RuntimeError, format::format_value, interpreter::evaluator::core::EvalResult};

/// Represents the result of evaluating an expression.
///
/// Results are numbers almost everywhere. `Text` only comes out of `hex`,
/// `oct` and `bin`, and is stored and displayed verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A double precision floating-point number.
    Number(f64),
    /// Output of a base conversion, such as `0xff`.
    Text(String),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl Value {
    /// Returns the numeric content, or an error naming `operation` if the
    /// value is text.
    ///
    /// # Parameters
    /// - `operation`: Operator symbol or function name, for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a number.
    /// - `Err(RuntimeError::UnsupportedOperand)`: If the value is text.
    ///
    /// # Example
    /// ```
    /// use figya::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.5).as_number("+").unwrap(), 2.5);
    /// assert!(Value::from("0xff").as_number("+").is_err());
    /// ```
    pub fn as_number(&self, operation: &str) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(text) => Err(RuntimeError::UnsupportedOperand { operation: operation.to_string(),
                                                                       operand:   text.clone(), }),
        }
    }

    /// Returns the number, if this value is one.
    #[must_use]
    pub const fn number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Text spliced into an expression in place of a `$` reference.
    ///
    /// Finite numbers use the shortest decimal form that reads back to the
    /// same float, without exponent notation, so the lexer always sees a
    /// plain literal. Negative numbers are parenthesized to keep `2^$x` and
    /// `$a - $b` meaning what they look like.
    ///
    /// # Example
    /// ```
    /// use figya::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(0.1).substitution_text(), "0.1");
    /// assert_eq!(Value::Number(-3.0).substitution_text(), "(-3)");
    /// assert_eq!(Value::Number(1e20).substitution_text(), "100000000000000000000");
    /// assert_eq!(Value::Number(f64::NEG_INFINITY).substitution_text(), "(-inf)");
    /// assert_eq!(Value::from("0b101").substitution_text(), "0b101");
    /// ```
    #[must_use]
    pub fn substitution_text(&self) -> String {
        match self {
            Self::Number(n) if *n < 0.0 => format!("({n})"),
            Self::Number(n) => n.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_value(self))
    }
}

/// On-disk shape of a value.
///
/// JSON has no literal for infinities or NaN, so non-finite numbers are
/// written as the strings `"inf"`, `"-inf"` and `"NaN"` and turned back into
/// numbers on load.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StoredValue {
    Number(f64),
    Text(String),
}

const NON_FINITE: [(&str, f64); 3] = [("inf", f64::INFINITY),
                                      ("-inf", f64::NEG_INFINITY),
                                      ("NaN", f64::NAN)];

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let stored = match self {
            Self::Number(n) if n.is_nan() => StoredValue::Text("NaN".to_string()),
            Self::Number(n) if n.is_infinite() => {
                StoredValue::Text(if *n > 0.0 { "inf" } else { "-inf" }.to_string())
            },
            Self::Number(n) => StoredValue::Number(*n),
            Self::Text(text) => StoredValue::Text(text.clone()),
        };
        stored.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match StoredValue::deserialize(deserializer)? {
               StoredValue::Number(n) => Self::Number(n),
               StoredValue::Text(text) => {
                   match NON_FINITE.iter().find(|(name, _)| *name == text) {
                       Some((_, n)) => Self::Number(*n),
                       None => Self::Text(text),
                   }
               },
           })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_numbers_survive_json() {
        let values = vec![Value::Number(f64::INFINITY),
                          Value::Number(f64::NEG_INFINITY),
                          Value::Number(2.5),
                          Value::from("0x1f")];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"["inf","-inf",2.5,"0x1f"]"#);

        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn nan_is_stored_as_text() {
        let json = serde_json::to_string(&Value::Number(f64::NAN)).unwrap();
        assert_eq!(json, r#""NaN""#);
        let back: Value = serde_json::from_str(&json).unwrap();
        assert!(back.number().is_some_and(f64::is_nan));
    }

    #[test]
    fn integers_in_json_load_as_numbers() {
        let back: Value = serde_json::from_str("42").unwrap();
        assert_eq!(back, Value::Number(42.0));
    }

    #[test]
    fn text_operand_is_rejected() {
        let err = Value::from("0o17").as_number("sqrt").unwrap_err();
        assert_eq!(err,
                   RuntimeError::UnsupportedOperand { operation: "sqrt".to_string(),
                                                      operand:   "0o17".to_string(), });
    }
}
