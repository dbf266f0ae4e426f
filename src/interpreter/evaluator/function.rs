/// Floating-point builtins: trigonometry, roots, exponentials and rounding.
pub mod builtin;
/// Integer builtins: `factorial`, `gcd`, `lcm` and the base conversions.
pub mod integer;
/// Logarithm function implementations.
///
/// `log` is base 10, `log2` base 2 and `ln` the natural logarithm.
pub mod log;
/// `min` and `max` function implementations.
///
/// Returns the minimum or maximum value from a list of arguments.
pub mod min_max;

/// The builtin table and call dispatch.
pub mod core;
