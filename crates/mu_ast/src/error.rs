use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermError {
    /// `define` was called on a node that is not a variable.
    #[error("cannot bind a definition to a non-variable node")]
    NotAVariable,
}
