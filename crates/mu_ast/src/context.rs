//! Term arena and builder.
//!
//! A [`Context`] owns every node it creates. All construction goes
//! through the builder methods (`num`, `add`, `fresh_var`, ...), which
//! intern each candidate: structurally identical terms share a single
//! [`NodeId`], so terms form a DAG with maximal sharing.
//!
//! # Sharing invariant
//!
//! Two builder calls return the same id iff the nodes are structurally
//! equal, where children compare by id (sound because the children are
//! themselves maximally shared) and variables compare by index only.
//! Constants compare by bit pattern: `+0.0` and `-0.0` intern
//! separately, and bit-identical NaNs share one node.
//!
//! Ids from one context must never be fed to another; two contexts do
//! not share interned nodes. Use [`Context::import`] to move a term
//! between contexts.

use rustc_hash::FxHashMap;

use crate::error::TermError;
use crate::node::{Node, NodeId};
use crate::ops::{BinaryOp, UnaryOp};

/// Interning key: the node shape with the constant replaced by its bit
/// pattern so the key can be `Eq + Hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NodeKey {
    Num(u64),
    Unary(UnaryOp, NodeId),
    Binary(BinaryOp, NodeId, NodeId),
    Var(u32),
}

impl NodeKey {
    fn of(node: Node) -> Self {
        match node {
            Node::Num(value) => NodeKey::Num(value.to_bits()),
            Node::Unary(op, a) => NodeKey::Unary(op, a),
            Node::Binary(op, a, b) => NodeKey::Binary(op, a, b),
            Node::Var(index) => NodeKey::Var(index),
        }
    }
}

/// Arena, interning table and variable bindings for one term DAG.
#[derive(Default)]
pub struct Context {
    nodes: Vec<Node>,
    interned: FxHashMap<NodeKey, NodeId>,
    /// Variable bodies, keyed by variable index. A sibling table rather
    /// than a field of `Node::Var` so definitions stay invisible to
    /// hashing and equality.
    definitions: FxHashMap<u32, NodeId>,
    next_var: u32,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node named by `id`.
    ///
    /// Panics if `id` was not created by this context.
    pub fn get(&self, id: NodeId) -> Node {
        self.nodes[id.index()]
    }

    /// Whether `id` names a node of this context.
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Number of distinct interned nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn intern(&mut self, node: Node) -> NodeId {
        let key = NodeKey::of(node);
        if let Some(&id) = self.interned.get(&key) {
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.interned.insert(key, id);
        id
    }

    /// Intern a constant.
    pub fn num(&mut self, value: f64) -> NodeId {
        self.intern(Node::Num(value))
    }

    pub fn abs(&mut self, a: NodeId) -> NodeId {
        self.intern(Node::Unary(UnaryOp::Abs, a))
    }

    pub fn add(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.intern(Node::Binary(BinaryOp::Add, a, b))
    }

    pub fn sub(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.intern(Node::Binary(BinaryOp::Sub, a, b))
    }

    pub fn mul(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.intern(Node::Binary(BinaryOp::Mul, a, b))
    }

    pub fn div(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.intern(Node::Binary(BinaryOp::Div, a, b))
    }

    pub fn modulo(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.intern(Node::Binary(BinaryOp::Mod, a, b))
    }

    /// Apply a unary operator by tag.
    pub fn unary(&mut self, op: UnaryOp, a: NodeId) -> NodeId {
        self.intern(Node::Unary(op, a))
    }

    /// Apply a binary operator by tag.
    pub fn binary(&mut self, op: BinaryOp, a: NodeId, b: NodeId) -> NodeId {
        self.intern(Node::Binary(op, a, b))
    }

    /// Allocate a variable with a previously unused index.
    pub fn fresh_var(&mut self) -> NodeId {
        self.next_var += 1;
        self.intern(Node::Var(self.next_var))
    }

    /// Intern the variable with the given index.
    ///
    /// Also raises the fresh-variable counter past `index`, so
    /// [`Context::fresh_var`] can never collide with a variable created
    /// this way.
    pub fn var(&mut self, index: u32) -> NodeId {
        self.next_var = self.next_var.max(index);
        self.intern(Node::Var(index))
    }

    /// Bind `body` as the definition of `var`, returning `var`.
    ///
    /// The body may mention `var` itself (or other variables), which is
    /// how cyclic terms are tied. Binding again overwrites: evaluation
    /// caches are per-call, so the next evaluation sees the new body.
    pub fn define(&mut self, var: NodeId, body: NodeId) -> Result<NodeId, TermError> {
        match self.get(var) {
            Node::Var(index) => {
                self.definitions.insert(index, body);
                Ok(var)
            }
            _ => Err(TermError::NotAVariable),
        }
    }

    /// The definition bound to `var`, if `var` is a bound variable.
    pub fn definition(&self, var: NodeId) -> Option<NodeId> {
        match self.get(var) {
            Node::Var(index) => self.definitions.get(&index).copied(),
            _ => None,
        }
    }

    /// The index of `id` if it is a variable.
    pub fn var_index(&self, id: NodeId) -> Option<u32> {
        match self.get(id) {
            Node::Var(index) => Some(index),
            _ => None,
        }
    }

    /// Copy the term rooted at `root` in `src` into this context,
    /// returning the corresponding root here.
    ///
    /// Variable indices and definitions are preserved; cycles are
    /// handled by mapping each variable before walking its body.
    pub fn import(&mut self, src: &Context, root: NodeId) -> NodeId {
        let mut mapped = FxHashMap::default();
        self.import_rec(src, root, &mut mapped)
    }

    fn import_rec(
        &mut self,
        src: &Context,
        id: NodeId,
        mapped: &mut FxHashMap<NodeId, NodeId>,
    ) -> NodeId {
        if let Some(&done) = mapped.get(&id) {
            return done;
        }
        let out = match src.get(id) {
            Node::Num(value) => self.num(value),
            Node::Unary(op, a) => {
                let a = self.import_rec(src, a, mapped);
                self.unary(op, a)
            }
            Node::Binary(op, a, b) => {
                let a = self.import_rec(src, a, mapped);
                let b = self.import_rec(src, b, mapped);
                self.binary(op, a, b)
            }
            Node::Var(index) => {
                let var = self.var(index);
                // Map before walking the body so a back-edge to this
                // variable terminates.
                mapped.insert(id, var);
                if let Some(body) = src.definition(id) {
                    let body = self.import_rec(src, body, mapped);
                    self.definitions.insert(index, body);
                }
                return var;
            }
        };
        mapped.insert(id, out);
        out
    }
}
