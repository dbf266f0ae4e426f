/// The `Value` enum and its conversions.
///
/// A value is either a number or the text produced by the base conversion
/// builtins. This module also defines how values are written to and read
/// from workspace files.
pub mod core;
