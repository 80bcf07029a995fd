//! The generic evaluator.
//!
//! [`eval`] maps a term to its value in any interpretation by
//! structural recursion, with two complications the plain homomorphism
//! does not have:
//!
//! - **Sharing.** The DAG is maximally shared, so values are memoised
//!   per node. A value that does not depend on any live hypothesis goes
//!   into a call-wide `definitive` table; one that does is only valid
//!   while its hypotheses are, and is scoped to their frame.
//! - **Recursion.** A variable defined in terms of itself (directly or
//!   through other variables) is solved by Kleene iteration from the
//!   interpretation's bottom element. The set of variables that must be
//!   solved together — the strongly connected component — is discovered
//!   online: each variable opens a hypothesis frame when first entered,
//!   and a back-edge to a stacked variable merges every frame above it
//!   into that variable's frame. Iteration runs only once the innermost
//!   frame is provably a whole SCC.
//!
//! All state lives in an [`EvalState`] owned by the single `eval` call;
//! nothing is retained across calls, so redefining a variable between
//! calls cannot leave stale memo entries behind.

use mu_ast::{Context, Node, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::algebra::Algebra;
use crate::error::EvalError;

/// Default ceiling on Kleene iterations per SCC.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Evaluator knobs.
#[derive(Debug, Clone, Copy)]
pub struct EvalOptions {
    /// Hard ceiling on fixpoint iterations for one SCC; exceeding it
    /// fails with [`EvalError::NoConvergence`].
    pub max_iterations: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Evaluate `root` in `algebra` with default options.
pub fn eval<A: Algebra>(ctx: &Context, root: NodeId, algebra: &A) -> Result<A::Value, EvalError> {
    eval_with_options(ctx, root, algebra, EvalOptions::default())
}

/// Evaluate `root` in `algebra`.
pub fn eval_with_options<A: Algebra>(
    ctx: &Context,
    root: NodeId,
    algebra: &A,
    options: EvalOptions,
) -> Result<A::Value, EvalError> {
    let mut state = EvalState {
        ctx,
        algebra,
        options,
        definitive: FxHashMap::default(),
        stack: Vec::new(),
        current: FxHashMap::default(),
    };
    let (value, deps) = state.eval_rec(root)?;
    debug_assert!(deps.is_empty() && state.stack.is_empty());
    Ok(value)
}

/// Evaluate `root` into the term DAG itself.
///
/// The same-builder homomorphism is the identity on node ids: every
/// operator application re-interns to the node it was built from, and a
/// recursive variable is its own least fixpoint (seeding iteration with
/// the variable makes the first step a no-op). The result is therefore
/// α-equivalent to — indeed identical to — the input.
pub fn eval_initial(ctx: &Context, root: NodeId) -> NodeId {
    debug_assert!(ctx.contains(root));
    root
}

/// Variables on the hypothesis stack that a value depends on. A value
/// with no dependencies is final for the whole call.
type Deps = FxHashSet<NodeId>;

/// One speculated SCC: the variables currently assumed mutually
/// recursive, and the memo entries that are only valid while their
/// approximations hold.
struct Frame<V> {
    members: FxHashSet<NodeId>,
    scratch: FxHashMap<NodeId, V>,
}

struct EvalState<'a, A: Algebra> {
    ctx: &'a Context,
    algebra: &'a A,
    options: EvalOptions,
    /// Values independent of every live hypothesis.
    definitive: FxHashMap<NodeId, A::Value>,
    /// Hypothesis frames, innermost last.
    stack: Vec<Frame<A::Value>>,
    /// Current approximation of each variable on the stack.
    current: FxHashMap<NodeId, A::Value>,
}

impl<'a, A: Algebra> EvalState<'a, A> {
    fn eval_rec(&mut self, id: NodeId) -> Result<(A::Value, Deps), EvalError> {
        if let Some(value) = self.definitive.get(&id) {
            return Ok((value.clone(), Deps::default()));
        }
        if let Some(frame) = self.stack.last() {
            if let Some(value) = frame.scratch.get(&id) {
                return Ok((value.clone(), frame.members.clone()));
            }
        }
        match self.ctx.get(id) {
            Node::Num(value) => {
                let value = self.algebra.num(value);
                self.definitive.insert(id, value.clone());
                Ok((value, Deps::default()))
            }
            Node::Unary(op, a) => {
                let (va, deps) = self.eval_rec(a)?;
                let value = self.algebra.unary(op, &va);
                self.memoize(id, value.clone(), &deps);
                Ok((value, deps))
            }
            Node::Binary(op, a, b) => {
                let (va, mut deps) = self.eval_rec(a)?;
                let (vb, deps_b) = self.eval_rec(b)?;
                deps.extend(deps_b);
                let value = self.algebra.binary(op, &va, &vb);
                self.memoize(id, value.clone(), &deps);
                Ok((value, deps))
            }
            Node::Var(index) => self.eval_var(id, index),
        }
    }

    /// Empty deps mean the value is final; otherwise it only holds
    /// under the innermost frame's hypotheses and dies with that frame.
    fn memoize(&mut self, id: NodeId, value: A::Value, deps: &Deps) {
        if deps.is_empty() {
            self.definitive.insert(id, value);
        } else if let Some(frame) = self.stack.last_mut() {
            frame.scratch.insert(id, value);
        }
    }

    fn eval_var(&mut self, var: NodeId, index: u32) -> Result<(A::Value, Deps), EvalError> {
        // Back-edge: `var` is already being solved below us. Everything
        // between its frame and the top is jointly recursive with it,
        // so merge those frames and answer with the approximation.
        if let Some(position) = self.frame_of(var) {
            self.merge_frames(position);
            let value = match self.current.get(&var) {
                Some(value) => value.clone(),
                None => {
                    let seed = self.algebra.bottom().ok_or(EvalError::NoBottom)?;
                    self.current.insert(var, seed.clone());
                    seed
                }
            };
            let members = self.stack[position].members.clone();
            return Ok((value, members));
        }

        let body = self.ctx.definition(var).ok_or(EvalError::Unbound(index))?;

        // First entry: open a hypothesis frame for `var`. The seed is
        // written lazily where possible so that an interpretation
        // without a bottom element still evaluates acyclic definitions
        // and only fails when a back-edge actually needs it.
        let depth = self.stack.len();
        let mut members = FxHashSet::default();
        members.insert(var);
        self.stack.push(Frame {
            members,
            scratch: FxHashMap::default(),
        });
        if let Some(seed) = self.algebra.bottom() {
            self.current.insert(var, seed);
        }
        tracing::trace!(target: "eval", var = index, depth, "hypothesis opened");

        let (value, deps) = self.eval_rec(body)?;
        self.current.insert(var, value.clone());

        if self.stack.len() == depth + 1 {
            if deps.is_empty() {
                // Plain definition: nothing on the stack was consulted,
                // so the value is final. Drop the frame.
                self.definitive.insert(var, value.clone());
                self.stack.pop();
                self.current.remove(&var);
                return Ok((value, Deps::default()));
            }
            // Our frame is still the innermost one, so the SCC it holds
            // is closed: solve it here.
            return self.solve_scc(var, depth);
        }

        // Our frame was merged into an enclosing one; the SCC is still
        // open and that frame's owner will iterate it.
        match self.stack.last() {
            Some(frame) => Ok((value, frame.members.clone())),
            None => Err(EvalError::Internal("hypothesis stack underflow")),
        }
    }

    fn frame_of(&self, var: NodeId) -> Option<usize> {
        self.stack.iter().rposition(|frame| frame.members.contains(&var))
    }

    /// Collapse frames `position..` into the frame at `position`,
    /// unioning members and scratch memos.
    fn merge_frames(&mut self, position: usize) {
        if position + 1 >= self.stack.len() {
            return;
        }
        tracing::trace!(
            target: "eval",
            absorbed = self.stack.len() - position - 1,
            "frames merged"
        );
        let absorbed = self.stack.split_off(position + 1);
        let base = &mut self.stack[position];
        for frame in absorbed {
            base.members.extend(frame.members);
            base.scratch.extend(frame.scratch);
        }
    }

    /// Kleene iteration over the closed SCC held by the frame at
    /// `depth` (the innermost frame), entered with the discovery-pass
    /// values already in `current`.
    fn solve_scc(&mut self, var: NodeId, depth: usize) -> Result<(A::Value, Deps), EvalError> {
        // Stable member order for the whole solve.
        let mut members: SmallVec<[NodeId; 4]> =
            self.stack[depth].members.iter().copied().collect();
        members.sort_unstable();

        let mut bodies: SmallVec<[NodeId; 4]> = SmallVec::with_capacity(members.len());
        for &member in &members {
            let body = self
                .ctx
                .definition(member)
                .ok_or(EvalError::Internal("recursive variable lost its definition"))?;
            bodies.push(body);
        }

        tracing::debug!(target: "eval", members = members.len(), "fixpoint start");

        let mut iterations = 0;
        loop {
            if iterations == self.options.max_iterations {
                tracing::warn!(target: "eval", iterations, "fixpoint ceiling hit");
                return Err(EvalError::NoConvergence { iterations });
            }
            iterations += 1;

            let previous: SmallVec<[A::Value; 4]> =
                members.iter().map(|m| self.current[m].clone()).collect();

            for (slot, &member) in members.iter().enumerate() {
                // Sub-expression memos were taken under approximations
                // that have since changed; drop them before re-reading.
                let Frame { members: live, scratch } = &mut self.stack[depth];
                scratch.retain(|key, _| live.contains(key));

                let (value, _deps) = self.eval_rec(bodies[slot])?;
                self.current.insert(member, value);
            }

            let done = members
                .iter()
                .enumerate()
                .all(|(slot, m)| self.algebra.converged(&previous[slot], &self.current[m]));
            if done {
                break;
            }
            tracing::trace!(target: "eval", iterations, "fixpoint step");
        }

        tracing::debug!(target: "eval", iterations, "fixpoint converged");

        // Promote: the frame's memos and the solved approximations are
        // now final.
        let frame = self
            .stack
            .pop()
            .ok_or(EvalError::Internal("hypothesis stack underflow"))?;
        self.definitive.extend(frame.scratch);
        for &member in &members {
            let value = self.current[&member].clone();
            self.definitive.insert(member, value);
            self.current.remove(&member);
        }
        let value = self.definitive[&var].clone();
        Ok((value, Deps::default()))
    }
}
