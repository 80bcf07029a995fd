//! Raw term rendering for diagnostics.
//!
//! Fully parenthesised, with variables shown as `x{index}` and
//! definitions left folded, so cyclic terms print in finite space. The
//! precedence-aware form is an interpretation concern and lives with
//! the other interpretations.

use std::fmt;

use crate::context::Context;
use crate::node::{Node, NodeId};

/// Borrowing wrapper tying a node id to its context for `Display`.
pub struct DisplayTerm<'a> {
    ctx: &'a Context,
    id: NodeId,
}

impl Context {
    /// Render `id` for diagnostics.
    pub fn display(&self, id: NodeId) -> DisplayTerm<'_> {
        DisplayTerm { ctx: self, id }
    }
}

impl fmt::Display for DisplayTerm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ctx.get(self.id) {
            Node::Num(value) => write!(f, "{value}"),
            Node::Var(index) => write!(f, "x{index}"),
            Node::Unary(op, a) => {
                write!(f, "{op}({})", self.ctx.display(a))
            }
            Node::Binary(op, a, b) => {
                write!(f, "({} {op} {})", self.ctx.display(a), self.ctx.display(b))
            }
        }
    }
}
