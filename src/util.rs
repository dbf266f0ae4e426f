/// Numeric conversion helpers.
///
/// Safe conversions between `f64` and the integer types used by the integer
/// builtins (`factorial`, `gcd`, `lcm`, `hex`, `oct`, `bin`). Every function
/// returns a `Result` that is `Ok` only if the conversion is lossless.
pub mod num;
