//! End-to-end evaluation scenarios: plain terms, variable chains,
//! recursive systems, and the ways evaluation can fail.

use mualg::{
    alpha_equivalent, eval, eval_initial, eval_with_options, Context, EvalError, EvalOptions,
    IntervalAlgebra, NodeId, NumericAlgebra, PrecedenceAlgebra, PrettyAlgebra,
};

#[test]
fn test_simple_eval() {
    let mut ctx = Context::new();
    let two = ctx.num(2.0);
    let three = ctx.num(3.0);
    let term = ctx.add(two, three);
    assert_eq!(eval(&ctx, term, &NumericAlgebra), Ok(5.0));
}

#[test]
fn test_simple_variable_eval() {
    let mut ctx = Context::new();
    let v = ctx.fresh_var();
    let forty_two = ctx.num(42.0);
    ctx.define(v, forty_two).unwrap();
    assert_eq!(eval(&ctx, v, &NumericAlgebra), Ok(42.0));
}

#[test]
fn test_non_recursive_variable() {
    // v = 2 * 3 + 1 = 7
    let mut ctx = Context::new();
    let v = ctx.fresh_var();
    let two = ctx.num(2.0);
    let three = ctx.num(3.0);
    let one = ctx.num(1.0);
    let prod = ctx.mul(two, three);
    let body = ctx.add(prod, one);
    ctx.define(v, body).unwrap();
    assert_eq!(eval(&ctx, v, &NumericAlgebra), Ok(7.0));
}

#[test]
fn test_variable_chain() {
    // a = 10, b = a + 5, term = b * 2
    let mut ctx = Context::new();
    let a = ctx.fresh_var();
    let b = ctx.fresh_var();
    let ten = ctx.num(10.0);
    let five = ctx.num(5.0);
    let two = ctx.num(2.0);
    ctx.define(a, ten).unwrap();
    let body = ctx.add(a, five);
    ctx.define(b, body).unwrap();
    let term = ctx.mul(b, two);

    assert_eq!(eval(&ctx, a, &NumericAlgebra), Ok(10.0));
    assert_eq!(eval(&ctx, b, &NumericAlgebra), Ok(15.0));
    assert_eq!(eval(&ctx, term, &NumericAlgebra), Ok(30.0));
}

#[test]
fn test_deeper_variable_chain() {
    // a = 3, b = a * 2, c = b + a, term = (c - b) * a = 9
    let mut ctx = Context::new();
    let a = ctx.fresh_var();
    let b = ctx.fresh_var();
    let c = ctx.fresh_var();
    let three = ctx.num(3.0);
    let two = ctx.num(2.0);
    ctx.define(a, three).unwrap();
    let ba = ctx.mul(a, two);
    ctx.define(b, ba).unwrap();
    let ca = ctx.add(b, a);
    ctx.define(c, ca).unwrap();
    let diff = ctx.sub(c, b);
    let term = ctx.mul(diff, a);
    assert_eq!(eval(&ctx, term, &NumericAlgebra), Ok(9.0));
}

#[test]
fn test_rebinding_is_seen_by_next_call() {
    let mut ctx = Context::new();
    let a = ctx.fresh_var();
    let b = ctx.fresh_var();
    let ten = ctx.num(10.0);
    let twenty = ctx.num(20.0);
    ctx.define(a, ten).unwrap();
    ctx.define(b, twenty).unwrap();
    let term = ctx.add(a, b);
    assert_eq!(eval(&ctx, term, &NumericAlgebra), Ok(30.0));

    let fifteen = ctx.num(15.0);
    ctx.define(a, fifteen).unwrap();
    assert_eq!(eval(&ctx, term, &NumericAlgebra), Ok(35.0));
}

#[test]
fn test_unbound_variable_fails() {
    let mut ctx = Context::new();
    let v = ctx.fresh_var();
    let one = ctx.num(1.0);
    let term = ctx.add(v, one);
    assert!(matches!(
        eval(&ctx, term, &NumericAlgebra),
        Err(EvalError::Unbound(_))
    ));
}

#[test]
fn test_divergent_recursion_fails() {
    // x = x + 1 has no fixpoint in the reals.
    let mut ctx = Context::new();
    let x = ctx.fresh_var();
    let one = ctx.num(1.0);
    let body = ctx.add(x, one);
    ctx.define(x, body).unwrap();
    assert!(matches!(
        eval(&ctx, x, &NumericAlgebra),
        Err(EvalError::NoConvergence { .. })
    ));
}

#[test]
fn test_iteration_ceiling_is_configurable() {
    let mut ctx = Context::new();
    let x = ctx.fresh_var();
    let one = ctx.num(1.0);
    let body = ctx.add(x, one);
    ctx.define(x, body).unwrap();
    assert_eq!(
        eval_with_options(&ctx, x, &NumericAlgebra, EvalOptions { max_iterations: 7 }),
        Err(EvalError::NoConvergence { iterations: 7 })
    );
}

#[test]
fn test_cycle_without_bottom_fails() {
    let mut ctx = Context::new();
    let x = ctx.fresh_var();
    let one = ctx.num(1.0);
    let body = ctx.add(x, one);
    ctx.define(x, body).unwrap();
    assert_eq!(eval(&ctx, x, &PrecedenceAlgebra), Err(EvalError::NoBottom));
}

#[test]
fn test_acyclic_term_does_not_need_bottom() {
    let mut ctx = Context::new();
    let v = ctx.fresh_var();
    let two = ctx.num(2.0);
    let three = ctx.num(3.0);
    let body = ctx.mul(two, three);
    ctx.define(v, body).unwrap();
    let one = ctx.num(1.0);
    let term = ctx.add(v, one);
    assert_eq!(eval(&ctx, term, &PrecedenceAlgebra), Ok(10));
}

#[test]
fn test_contracting_recursion() {
    // x = x / 2 + 1 converges to 2 from the numeric bottom.
    let mut ctx = Context::new();
    let x = ctx.fresh_var();
    let two = ctx.num(2.0);
    let one = ctx.num(1.0);
    let half = ctx.div(x, two);
    let body = ctx.add(half, one);
    ctx.define(x, body).unwrap();

    let value = eval(&ctx, x, &NumericAlgebra).unwrap();
    assert!((value - 2.0).abs() < 1e-6);
    // And it is a fixpoint of the body, not just close to one.
    assert!((value / 2.0 + 1.0 - value).abs() < 1e-6);

    // The interval interpretation pins the same fixpoint as bounds.
    let bounds = eval(&ctx, x, &IntervalAlgebra).unwrap();
    assert!(bounds.contains(2.0));
    assert!(bounds.width() < 1e-6);
}

#[test]
fn test_recursive_definition_renders_symbolically() {
    let mut ctx = Context::new();
    let x = ctx.fresh_var();
    let one = ctx.num(1.0);
    let body = ctx.add(x, one);
    ctx.define(x, body).unwrap();
    let fragment = eval(&ctx, x, &PrettyAlgebra::new()).unwrap();
    assert_eq!(fragment.text, "x1 + 1 + 1");
}

/// The mutually recursive showcase system
/// `x = y + z + 1, y = x * 2 - z, z = x + y - 3`
/// with root `(x + y) * (z - 5)`.
fn showcase_system(ctx: &mut Context) -> NodeId {
    let x = ctx.fresh_var();
    let y = ctx.fresh_var();
    let z = ctx.fresh_var();
    let one = ctx.num(1.0);
    let two = ctx.num(2.0);
    let three = ctx.num(3.0);
    let five = ctx.num(5.0);

    let yz = ctx.add(y, z);
    let bx = ctx.add(yz, one);
    ctx.define(x, bx).unwrap();

    let x2 = ctx.mul(x, two);
    let by = ctx.sub(x2, z);
    ctx.define(y, by).unwrap();

    let xy = ctx.add(x, y);
    let bz = ctx.sub(xy, three);
    ctx.define(z, bz).unwrap();

    let left = ctx.add(x, y);
    let right = ctx.sub(z, five);
    ctx.mul(left, right)
}

#[test]
fn test_grand_equivalence() {
    // Evaluating into the term algebra itself gives back a term
    // α-equivalent to the input, cycles included.
    let mut ctx = Context::new();
    let root = showcase_system(&mut ctx);
    let evaluated = eval_initial(&ctx, root);
    assert!(alpha_equivalent(&ctx, root, evaluated));
}

#[test]
fn test_mutual_system_renders_symbolically() {
    let mut ctx = Context::new();
    let root = showcase_system(&mut ctx);
    let fragment = eval(&ctx, root, &PrettyAlgebra::new()).unwrap();
    // The system is cyclic, so the rendering must fall back on at
    // least one symbolic seed name.
    assert!(fragment.text.contains('x'), "got {}", fragment.text);
}

#[test]
fn test_expansive_system_overflows_to_nan() {
    // The showcase system's iteration matrix is expansive: iterates
    // overflow to infinity, differences become NaN, and the iteration
    // settles on the NaN fixpoint instead of a finite value.
    let mut ctx = Context::new();
    let root = showcase_system(&mut ctx);
    let value = eval(&ctx, root, &NumericAlgebra).unwrap();
    assert!(value.is_nan());
}

#[test]
fn test_mutual_contracting_system() {
    // a = b / 2, b = a / 2 + 1  =>  a = 2/3, b = 4/3
    let mut ctx = Context::new();
    let a = ctx.fresh_var();
    let b = ctx.fresh_var();
    let two = ctx.num(2.0);
    let one = ctx.num(1.0);
    let half_b = ctx.div(b, two);
    ctx.define(a, half_b).unwrap();
    let half_a = ctx.div(a, two);
    let body_b = ctx.add(half_a, one);
    ctx.define(b, body_b).unwrap();

    let va = eval(&ctx, a, &NumericAlgebra).unwrap();
    let vb = eval(&ctx, b, &NumericAlgebra).unwrap();
    assert!((va - 2.0 / 3.0).abs() < 1e-6);
    assert!((vb - 4.0 / 3.0).abs() < 1e-6);
}

#[test]
fn test_import_preserves_value() {
    let mut src = Context::new();
    let a = src.fresh_var();
    let b = src.fresh_var();
    let two = src.num(2.0);
    let one = src.num(1.0);
    let half_b = src.div(b, two);
    src.define(a, half_b).unwrap();
    let half_a = src.div(a, two);
    let body_b = src.add(half_a, one);
    src.define(b, body_b).unwrap();
    let term = src.add(a, b);

    let mut dst = Context::new();
    let copied = dst.import(&src, term);

    let original = eval(&src, term, &NumericAlgebra).unwrap();
    let imported = eval(&dst, copied, &NumericAlgebra).unwrap();
    assert_eq!(original.to_bits(), imported.to_bits());
}
