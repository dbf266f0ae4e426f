/// Dispatch of binary operators.
pub mod core;
/// Exponentiation.
pub mod power;
