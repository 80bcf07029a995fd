//! Concrete interpretations of the arithmetic signature.
//!
//! Each type here implements [`mu_engine::Algebra`] over its own
//! carrier: [`NumericAlgebra`] computes `f64` values,
//! [`IntervalAlgebra`] computes guaranteed bounds, [`PrettyAlgebra`]
//! renders infix text, and [`PrecedenceAlgebra`] reports binding
//! strength alone.

pub mod interval;
pub mod numeric;
pub mod precedence;
pub mod pretty;

pub use interval::{Interval, IntervalAlgebra};
pub use numeric::NumericAlgebra;
pub use precedence::PrecedenceAlgebra;
pub use pretty::{Fragment, PrettyAlgebra};
