//! Precedence-aware rendering interpretation.
//!
//! Values are rendered text paired with the binding strength of the
//! outermost operator, which is all the information a parent needs to
//! decide whether its operand must be parenthesised.

use std::cell::Cell;

use mu_engine::Algebra;

/// Binding strength of atoms (constants, calls, variable names).
const ATOM: u8 = 100;
/// Binding strength of multiplicative operators.
const FACTOR: u8 = 50;
/// Binding strength of additive operators.
const TERM: u8 = 10;

/// A rendered sub-term and the binding strength of its head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub strength: u8,
}

impl Fragment {
    fn new(text: String, strength: u8) -> Self {
        Fragment { text, strength }
    }

    /// The text, parenthesised when the head binds weaker than `floor`.
    fn at_least(&self, floor: u8) -> String {
        if self.strength < floor {
            format!("({})", self.text)
        } else {
            self.text.clone()
        }
    }

    /// Like [`Fragment::at_least`] but also parenthesises equal
    /// strength, for right operands of non-associative operators.
    fn above(&self, floor: u8) -> String {
        if self.strength <= floor {
            format!("({})", self.text)
        } else {
            self.text.clone()
        }
    }
}

/// Renders terms as infix strings with minimal parentheses.
///
/// Recursive definitions render through the fixpoint machinery: the
/// seed for a variable is a fresh symbolic name and every iteration is
/// accepted, so a recursive variable shows one unfolding of its body
/// around the symbolic name.
#[derive(Debug, Default)]
pub struct PrettyAlgebra {
    fresh: Cell<u32>,
}

impl PrettyAlgebra {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Algebra for PrettyAlgebra {
    type Value = Fragment;

    fn num(&self, value: f64) -> Fragment {
        Fragment::new(format!("{value}"), ATOM)
    }

    fn abs(&self, a: &Fragment) -> Fragment {
        Fragment::new(format!("abs({})", a.text), ATOM)
    }

    fn add(&self, a: &Fragment, b: &Fragment) -> Fragment {
        Fragment::new(format!("{} + {}", a.text, b.text), TERM)
    }

    fn sub(&self, a: &Fragment, b: &Fragment) -> Fragment {
        Fragment::new(format!("{} - {}", a.text, b.above(TERM)), TERM)
    }

    fn mul(&self, a: &Fragment, b: &Fragment) -> Fragment {
        Fragment::new(
            format!("{} * {}", a.at_least(FACTOR), b.at_least(FACTOR)),
            FACTOR,
        )
    }

    fn div(&self, a: &Fragment, b: &Fragment) -> Fragment {
        Fragment::new(
            format!("{} / {}", a.at_least(FACTOR), b.above(FACTOR)),
            FACTOR,
        )
    }

    fn modulo(&self, a: &Fragment, b: &Fragment) -> Fragment {
        Fragment::new(
            format!("{} % {}", a.at_least(FACTOR), b.above(FACTOR)),
            FACTOR,
        )
    }

    fn bottom(&self) -> Option<Fragment> {
        let n = self.fresh.get() + 1;
        self.fresh.set(n);
        Some(Fragment::new(format!("x{n}"), ATOM))
    }

    fn converged(&self, _previous: &Fragment, _current: &Fragment) -> bool {
        true
    }
}
