//! Universal algebra over a fixed arithmetic signature.
//!
//! One canonical term algebra — a hash-consed expression DAG with
//! recursive variable definitions — and a family of interpretations of
//! its terms. Given a term and an interpretation, the evaluator
//! computes the unique value the term denotes, solving recursive
//! definitions by bounded fixpoint iteration; α-equivalence decides
//! whether two possibly-cyclic terms denote the same rational tree up
//! to renaming of recursion variables.
//!
//! ```
//! use mualg::{eval, Context, NumericAlgebra, PrettyAlgebra};
//!
//! let mut ctx = Context::new();
//! let two = ctx.num(2.0);
//! let three = ctx.num(3.0);
//! let four = ctx.num(4.0);
//! let prod = ctx.mul(three, four);
//! let term = ctx.add(two, prod);
//!
//! assert_eq!(eval(&ctx, term, &NumericAlgebra), Ok(14.0));
//! assert_eq!(eval(&ctx, term, &PrettyAlgebra::new()).unwrap().text, "2 + 3 * 4");
//! ```
//!
//! Recursive definitions tie a variable to a body that may mention the
//! variable itself:
//!
//! ```
//! use mualg::{eval, Context, NumericAlgebra};
//!
//! let mut ctx = Context::new();
//! let x = ctx.fresh_var();
//! let two = ctx.num(2.0);
//! let one = ctx.num(1.0);
//! let half = ctx.div(x, two);
//! let body = ctx.add(half, one);
//! ctx.define(x, body).unwrap();
//!
//! // x = x / 2 + 1 has the least fixpoint 2.
//! let value = eval(&ctx, x, &NumericAlgebra).unwrap();
//! assert!((value - 2.0).abs() < 1e-6);
//! ```

pub use mu_ast::{
    collect_variables, count_reachable, has_cycle, BinaryOp, Context, DisplayTerm, Node, NodeId,
    TermError, UnaryOp,
};
pub use mu_engine::{
    alpha_equivalent, alpha_equivalent_in, eval, eval_initial, eval_with_options, Algebra,
    EvalError, EvalOptions, DEFAULT_MAX_ITERATIONS,
};
pub use mu_algebra::{
    Fragment, Interval, IntervalAlgebra, NumericAlgebra, PrecedenceAlgebra, PrettyAlgebra,
};
