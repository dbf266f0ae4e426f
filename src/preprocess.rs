use std::sync::LazyLock;

use regex::Regex;

static FACTORIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)!").expect("factorial pattern is valid"));

static DIGIT_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)([a-zA-Z])").expect("digit-letter pattern is valid"));

static CLOSE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)\(").expect("paren pattern is valid"));

static CLOSE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)([a-zA-Z])").expect("paren-letter pattern is valid"));

/// Rewrites calculator shorthand into plain arithmetic.
///
/// Runs [`factorial`] and then [`implicit_multiplication`].
///
/// # Example
/// ```
/// use figya::preprocess::preprocess;
///
/// assert_eq!(preprocess("5! + 2pi"), "factorial(5) + 2*pi");
/// assert_eq!(preprocess("(1+2)(3+4)"), "(1+2)*(3+4)");
/// ```
#[must_use]
pub fn preprocess(expr: &str) -> String {
    implicit_multiplication(&factorial(expr))
}

/// Rewrites `N!` as `factorial(N)` for a run of digits `N`.
///
/// Only the digits directly before `!` are taken, so `2.5!` becomes
/// `2.factorial(5)`, which does not parse.
///
/// # Example
/// ```
/// use figya::preprocess::factorial;
///
/// assert_eq!(factorial("10!"), "factorial(10)");
/// assert_eq!(factorial("2.5!"), "2.factorial(5)");
/// ```
#[must_use]
pub fn factorial(expr: &str) -> String {
    FACTORIAL.replace_all(expr, "factorial(${1})").into_owned()
}

/// Inserts `*` where multiplication is implied.
///
/// Three juxtapositions are recognised: a digit followed by a letter (`2pi`),
/// a closing parenthesis followed by an opening one (`)(`) and a closing
/// parenthesis followed by a letter (`)x`). The rewrite is purely textual, so
/// exponent notation is split too: `1e3` becomes `1*e3`.
///
/// # Example
/// ```
/// use figya::preprocess::implicit_multiplication;
///
/// assert_eq!(implicit_multiplication("3sqrt(4)"), "3*sqrt(4)");
/// assert_eq!(implicit_multiplication("(2)pi"), "(2)*pi");
/// assert_eq!(implicit_multiplication("1e5 + 2e"), "1*e5 + 2*e");
/// ```
#[must_use]
pub fn implicit_multiplication(expr: &str) -> String {
    let digit_letter = DIGIT_LETTER.replace_all(expr, "${1}*${2}");
    let close_open = CLOSE_OPEN.replace_all(&digit_letter, ")*(");
    CLOSE_LETTER.replace_all(&close_open, ")*${1}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_of_each_run() {
        assert_eq!(factorial("3! * 4!"), "factorial(3) * factorial(4)");
        assert_eq!(factorial("x!"), "x!");
    }

    #[test]
    fn exponent_notation_is_split() {
        assert_eq!(implicit_multiplication("1e3 + 1"), "1*e3 + 1");
        assert_eq!(implicit_multiplication("2.5E-3"), "2.5*E-3");
        assert_eq!(implicit_multiplication("6e+23"), "6*e+23");
    }

    #[test]
    fn euler_after_digit_is_multiplied() {
        assert_eq!(implicit_multiplication("2e"), "2*e");
        assert_eq!(implicit_multiplication("2e-x"), "2*e-x");
        assert_eq!(implicit_multiplication("3exp(1)"), "3*exp(1)");
    }

    #[test]
    fn parentheses_juxtaposed() {
        assert_eq!(implicit_multiplication("(1)(2)(3)"), "(1)*(2)*(3)");
        assert_eq!(implicit_multiplication("(2)sin(0)"), "(2)*sin(0)");
    }

    #[test]
    fn function_names_with_digits_are_left_alone() {
        assert_eq!(preprocess("log2(8)"), "log2(8)");
    }

    #[test]
    fn both_rewrites_together() {
        assert_eq!(preprocess("2pi + 4!"), "2*pi + factorial(4)");
    }
}
