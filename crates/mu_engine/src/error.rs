use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Evaluation reached a variable with no definition bound.
    #[error("variable x{0} has no definition")]
    Unbound(u32),

    /// A cyclic term met an interpretation with no bottom element to
    /// seed iteration from.
    #[error("interpretation has no bottom element to seed fixpoint iteration")]
    NoBottom,

    /// Fixpoint iteration hit its ceiling without converging.
    #[error("fixpoint iteration did not converge within {iterations} iterations")]
    NoConvergence { iterations: usize },

    /// An internal invariant was violated.
    #[error("internal evaluator error: {0}")]
    Internal(&'static str),
}
