//! α-equivalence of possibly-cyclic terms.
//!
//! Two terms are α-equivalent when their unfoldings — the rational
//! trees obtained by expanding variable definitions forever — are the
//! same tree modulo a consistent renaming of recursion variables.
//!
//! The decision procedure is a memoised pairwise walk. A pair is
//! tentatively recorded as equivalent while its comparison is in
//! flight, so a cycle that leads back to the pair cannot refute what it
//! is part of proving; the record is corrected once the comparison
//! finishes. Variables are paired into a bijection as they are first
//! met, and a pairing that would break the bijection refutes the whole
//! comparison. Termination is guaranteed because every recursive step
//! either hits the id-equality fast path, hits the memo, or consumes a
//! previously unseen pair, of which there are finitely many.
//!
//! Operators are not treated as commutative: `a + b` and `b + a` are
//! distinct terms here. Semantic equalities belong to interpretations.

use mu_ast::{Context, Node, NodeId};
use rustc_hash::FxHashMap;

/// Decide α-equivalence of two terms of the same context.
pub fn alpha_equivalent(ctx: &Context, a: NodeId, b: NodeId) -> bool {
    Alpha::new(ctx, ctx).equiv(a, b)
}

/// Decide α-equivalence of terms living in two different contexts.
///
/// Useful for checking that [`Context::import`] preserved a term. The
/// contexts may in fact be the same object, in which case this is
/// [`alpha_equivalent`].
pub fn alpha_equivalent_in(left: &Context, a: NodeId, right: &Context, b: NodeId) -> bool {
    Alpha::new(left, right).equiv(a, b)
}

/// Per-call comparison state.
struct Alpha<'a> {
    left: &'a Context,
    right: &'a Context,
    /// Both sides live in one context: id equality is term equality and
    /// memo entries can be stored symmetrically.
    shared: bool,
    memo: FxHashMap<(NodeId, NodeId), bool>,
    /// Partial bijection from left variables to right variables.
    forward: FxHashMap<NodeId, NodeId>,
    backward: FxHashMap<NodeId, NodeId>,
}

impl<'a> Alpha<'a> {
    fn new(left: &'a Context, right: &'a Context) -> Self {
        Self {
            left,
            right,
            shared: std::ptr::eq(left, right),
            memo: FxHashMap::default(),
            forward: FxHashMap::default(),
            backward: FxHashMap::default(),
        }
    }

    fn equiv(&mut self, a: NodeId, b: NodeId) -> bool {
        if self.shared && a == b {
            return true;
        }
        if let Some(&known) = self.memo.get(&(a, b)) {
            return known;
        }
        self.record(a, b, true);
        let result = self.equiv_nodes(a, b);
        self.record(a, b, result);
        result
    }

    fn record(&mut self, a: NodeId, b: NodeId, result: bool) {
        self.memo.insert((a, b), result);
        if self.shared {
            self.memo.insert((b, a), result);
        }
    }

    fn equiv_nodes(&mut self, a: NodeId, b: NodeId) -> bool {
        match (self.left.get(a), self.right.get(b)) {
            (Node::Num(x), Node::Num(y)) => x.to_bits() == y.to_bits(),
            (Node::Unary(op_a, ca), Node::Unary(op_b, cb)) => op_a == op_b && self.equiv(ca, cb),
            (Node::Binary(op_a, la, ra), Node::Binary(op_b, lb, rb)) => {
                op_a == op_b && self.equiv(la, lb) && self.equiv(ra, rb)
            }
            (Node::Var(_), Node::Var(_)) => self.equiv_vars(a, b),
            _ => false,
        }
    }

    fn equiv_vars(&mut self, a: NodeId, b: NodeId) -> bool {
        if let Some(&image) = self.forward.get(&a) {
            return image == b;
        }
        if self.backward.contains_key(&b) {
            // Some other variable already renames to `b`.
            return false;
        }
        self.forward.insert(a, b);
        self.backward.insert(b, a);
        match (self.left.definition(a), self.right.definition(b)) {
            (None, None) => true,
            (Some(da), Some(db)) => self.equiv(da, db),
            _ => false,
        }
    }
}
