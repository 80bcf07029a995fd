//! Canonical term traversal utilities.
//!
//! Iterative walks with explicit stacks, safe for any DAG depth.
//! Variables are followed into their definitions under a visited set,
//! so every function here terminates on cyclic terms too.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::context::Context;
use crate::node::{Node, NodeId};

/// Count the distinct nodes reachable from `root`, definitions
/// included.
pub fn count_reachable(ctx: &Context, root: NodeId) -> usize {
    let mut seen = FxHashSet::default();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        match ctx.get(id) {
            Node::Num(_) => {}
            Node::Unary(_, a) => stack.push(a),
            Node::Binary(_, a, b) => {
                stack.push(a);
                stack.push(b);
            }
            Node::Var(_) => {
                if let Some(body) = ctx.definition(id) {
                    stack.push(body);
                }
            }
        }
    }
    seen.len()
}

/// Collect the variables reachable from `root`, definitions included,
/// in first-visit order.
pub fn collect_variables(ctx: &Context, root: NodeId) -> Vec<NodeId> {
    let mut seen = FxHashSet::default();
    let mut found = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        match ctx.get(id) {
            Node::Num(_) => {}
            Node::Unary(_, a) => stack.push(a),
            Node::Binary(_, a, b) => {
                // Left child on top for left-to-right visit order.
                stack.push(b);
                stack.push(a);
            }
            Node::Var(_) => {
                found.push(id);
                if let Some(body) = ctx.definition(id) {
                    stack.push(body);
                }
            }
        }
    }
    found
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    InProgress,
    Done,
}

/// Whether the term rooted at `root` closes a cycle through some
/// variable's definition.
///
/// Sharing alone is not a cycle: a diamond-shaped DAG reports `false`.
pub fn has_cycle(ctx: &Context, root: NodeId) -> bool {
    let mut marks: FxHashMap<NodeId, Mark> = FxHashMap::default();
    // (node, children already expanded)
    let mut stack = vec![(root, false)];
    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            marks.insert(id, Mark::Done);
            continue;
        }
        match marks.get(&id) {
            Some(Mark::Done) => continue,
            // Reached again while its own subterm walk is still open.
            Some(Mark::InProgress) => return true,
            None => {}
        }
        marks.insert(id, Mark::InProgress);
        stack.push((id, true));
        match ctx.get(id) {
            Node::Num(_) => {}
            Node::Unary(_, a) => stack.push((a, false)),
            Node::Binary(_, a, b) => {
                stack.push((a, false));
                stack.push((b, false));
            }
            Node::Var(_) => {
                if let Some(body) = ctx.definition(id) {
                    stack.push((body, false));
                }
            }
        }
    }
    false
}
