//! The interpretation contract.
//!
//! An [`Algebra`] picks a carrier type and gives every operator of the
//! signature a meaning over it. The evaluator in [`crate::eval`] is
//! then the unique homomorphism from the term DAG into that carrier.
//!
//! Interpretations that can solve recursive definitions additionally
//! override [`Algebra::bottom`] and [`Algebra::converged`]; with the
//! defaults in place, evaluating a term that actually closes a cycle
//! fails with [`NoBottom`](crate::EvalError::NoBottom).

use mu_ast::{BinaryOp, UnaryOp};

/// An interpretation of the fixed signature over the carrier `Value`.
pub trait Algebra {
    type Value: Clone;

    /// Inject a real constant into the carrier.
    fn num(&self, value: f64) -> Self::Value;

    fn abs(&self, a: &Self::Value) -> Self::Value;

    fn add(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;
    fn sub(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;
    fn mul(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;
    fn div(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;
    fn modulo(&self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// Dispatch a unary operator tag to its method.
    fn unary(&self, op: UnaryOp, a: &Self::Value) -> Self::Value {
        match op {
            UnaryOp::Abs => self.abs(a),
        }
    }

    /// Dispatch a binary operator tag to its method.
    fn binary(&self, op: BinaryOp, a: &Self::Value, b: &Self::Value) -> Self::Value {
        match op {
            BinaryOp::Add => self.add(a, b),
            BinaryOp::Sub => self.sub(a, b),
            BinaryOp::Mul => self.mul(a, b),
            BinaryOp::Div => self.div(a, b),
            BinaryOp::Mod => self.modulo(a, b),
        }
    }

    /// Least informative element, used to seed fixpoint iteration.
    ///
    /// `None` (the default) declares the interpretation unable to solve
    /// recursive definitions; acyclic terms still evaluate normally.
    fn bottom(&self) -> Option<Self::Value> {
        None
    }

    /// Termination predicate for fixpoint iteration.
    ///
    /// Must be reflexive and symmetric, or iteration may spin until its
    /// ceiling. Only consulted when [`Algebra::bottom`] is overridden.
    fn converged(&self, _previous: &Self::Value, _current: &Self::Value) -> bool {
        false
    }
}
