//! Generic evaluation over the term DAG.
//!
//! The [`Algebra`] trait is the contract every interpretation
//! implements; [`eval`] maps a term into any such interpretation,
//! solving recursive definitions by bounded fixpoint iteration over
//! their strongly connected components; [`alpha_equivalent`] decides
//! structural equality of possibly-cyclic terms up to renaming of
//! recursion variables.

pub mod algebra;
pub mod alpha;
pub mod error;
pub mod eval;

pub use algebra::Algebra;
pub use alpha::{alpha_equivalent, alpha_equivalent_in};
pub use error::EvalError;
pub use eval::{eval, eval_initial, eval_with_options, EvalOptions, DEFAULT_MAX_ITERATIONS};
