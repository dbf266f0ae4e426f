use crate::interpreter::value::core::Value;

/// Significant digits shown for non-integral numbers.
const SIGNIFICANT_DIGITS: i32 = 10;

/// Integral values below this magnitude are shown in full.
const INTEGER_LIMIT: f64 = 1e15;

/// Returns the display text of a value.
///
/// Text is returned unchanged; numbers go through [`format_number`].
///
/// # Example
/// ```
/// use figya::{format::format_value, interpreter::value::core::Value};
///
/// assert_eq!(format_value(&Value::Number(1234567.0)), "1,234,567");
/// assert_eq!(format_value(&Value::from("0b11")), "0b11");
/// ```
#[must_use]
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        Value::Text(text) => text.clone(),
    }
}

/// Formats a number for display.
///
/// - Infinities and NaN render as `inf`, `-inf` and `NaN`.
/// - Integral values below `10^15` in magnitude render as grouped integers.
/// - Everything else is rounded to 10 significant digits. The result uses
///   positional notation when the decimal exponent is between `-4` and `9`,
///   and scientific notation with a signed exponent of at least two digits
///   otherwise. Trailing zeros are dropped, and the integer part is grouped
///   in thousands.
///
/// # Example
/// ```
/// use figya::format::format_number;
///
/// assert_eq!(format_number(-1234.0), "-1,234");
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(1234.5678), "1,234.5678");
/// assert_eq!(format_number(1e15), "1e+15");
/// assert_eq!(format_number(0.00001), "1e-05");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
/// ```
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.fract() == 0.0 && n.abs() < INTEGER_LIMIT {
        #[allow(clippy::cast_possible_truncation)]
        let int = n as i64;
        let sign = if int < 0 { "-" } else { "" };
        return format!("{sign}{}", group_thousands(&int.unsigned_abs().to_string()));
    }
    format_general(n)
}

/// Renders `n` with the `g` presentation at 10 significant digits.
fn format_general(n: f64) -> String {
    let precision = usize::try_from(SIGNIFICANT_DIGITS - 1).unwrap_or_default();
    let scientific = format!("{n:.precision$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_zeros(mantissa), exponent.unsigned_abs());
    }

    let decimals = usize::try_from(SIGNIFICANT_DIGITS - 1 - exponent).unwrap_or_default();
    let fixed = format!("{n:.decimals$}");
    let fixed = trim_zeros(&fixed);

    let (sign, digits) = fixed.strip_prefix('-').map_or(("", fixed), |rest| ("-", rest));
    match digits.split_once('.') {
        Some((int, frac)) => format!("{sign}{}.{frac}", group_thousands(int)),
        None => format!("{sign}{}", group_thousands(digits)),
    }
}

/// Drops trailing zeros after a decimal point, and the point itself if
/// nothing remains behind it.
fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Inserts a comma between every group of three digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
