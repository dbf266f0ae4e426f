/// Binary operator parsing.
///
/// Implements the additive, multiplicative and power precedence levels.
pub mod binary;
/// Entry points of the parser.
pub mod core;
/// Prefix operators and primary expressions: literals, names, calls and
/// parenthesized groups.
pub mod unary;
/// Shared helpers, such as comma separated argument lists.
pub mod utils;
