use thiserror::Error;

/// Failures raised while substituting `$` references.
///
/// Both `CircularReference` and `SubstitutionLimit` describe a reference
/// cycle; the second is the bound on substitution rounds tripping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    /// The expression refers to a variable that was never stored.
    #[error("undefined variable: {name}")]
    UndefinedVariable {
        /// The reference, including its `$` prefix.
        name: String,
    },
    /// A reference resolved back to itself.
    #[error("circular reference: {name}")]
    CircularReference {
        /// The reference seen twice, including its `$` prefix.
        name: String,
    },
    /// Substitution did not reach a fixpoint within the round limit.
    #[error("circular reference detected after {rounds} substitution rounds")]
    SubstitutionLimit {
        /// The number of rounds performed.
        rounds: usize,
    },
}
