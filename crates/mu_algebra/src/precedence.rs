//! Interpretation computing only the binding strength of a term's head.
//!
//! A deliberately tiny carrier: useful on its own for layout decisions,
//! and as the simplest demonstration that the evaluator is generic in
//! the interpretation.

use mu_engine::Algebra;

/// Maps every term to the binding strength of its outermost operator.
///
/// Has no bottom element, so recursive definitions are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrecedenceAlgebra;

impl Algebra for PrecedenceAlgebra {
    type Value = u8;

    fn num(&self, _value: f64) -> u8 {
        100
    }

    fn abs(&self, _a: &u8) -> u8 {
        100
    }

    fn add(&self, _a: &u8, _b: &u8) -> u8 {
        10
    }

    fn sub(&self, _a: &u8, _b: &u8) -> u8 {
        10
    }

    fn mul(&self, _a: &u8, _b: &u8) -> u8 {
        50
    }

    fn div(&self, _a: &u8, _b: &u8) -> u8 {
        50
    }

    fn modulo(&self, _a: &u8, _b: &u8) -> u8 {
        50
    }
}
