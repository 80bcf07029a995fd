//! Scripted tour of the framework: builds a few showcase terms and
//! evaluates each of them in every interpretation.
//!
//! Run with `RUST_LOG=eval=trace` to watch the fixpoint engine work.

use std::error::Error;

use mu_algebra::{IntervalAlgebra, NumericAlgebra, PrettyAlgebra};
use mu_ast::{collect_variables, count_reachable, has_cycle, Context, NodeId};
use mu_engine::{alpha_equivalent, eval, eval_initial};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut ctx = Context::new();

    println!("=== Hash-consing ===");
    let first = showcase(&mut ctx);
    let second = showcase(&mut ctx);
    println!("first build:  {first:?}");
    println!("second build: {second:?}");
    println!("shared: {}", first == second);

    println!();
    println!("=== Interpretations of one term ===");
    let pretty = eval(&ctx, first, &PrettyAlgebra::new())?;
    println!("pretty:   {}", pretty.text);
    println!("numeric:  {}", eval(&ctx, first, &NumericAlgebra)?);
    println!("interval: {}", eval(&ctx, first, &IntervalAlgebra)?);

    println!();
    println!("=== Recursive definition: x = x / 2 + 1 ===");
    let x = ctx.fresh_var();
    let two = ctx.num(2.0);
    let one = ctx.num(1.0);
    let half = ctx.div(x, two);
    let body = ctx.add(half, one);
    ctx.define(x, body)?;
    println!("numeric fixpoint:  {}", eval(&ctx, x, &NumericAlgebra)?);
    println!("interval fixpoint: {}", eval(&ctx, x, &IntervalAlgebra)?);
    let unfolded = eval(&ctx, x, &PrettyAlgebra::new())?;
    println!("symbolic:          x = {}", unfolded.text);

    println!();
    println!("=== Divergent definition: y = y + 1 ===");
    let y = ctx.fresh_var();
    let grow = ctx.add(y, one);
    ctx.define(y, grow)?;
    match eval(&ctx, y, &NumericAlgebra) {
        Ok(value) => println!("unexpected value {value}"),
        Err(error) => println!("fails as it must: {error}"),
    }

    println!();
    println!("=== Grand equivalence on a mutual system ===");
    let root = mutual_system(&mut ctx)?;
    println!("nodes reachable: {}", count_reachable(&ctx, root));
    println!("variables:       {}", collect_variables(&ctx, root).len());
    println!("cyclic:          {}", has_cycle(&ctx, root));
    let evaluated = eval_initial(&ctx, root);
    println!(
        "alpha-equivalent to its own evaluation: {}",
        alpha_equivalent(&ctx, root, evaluated)
    );

    Ok(())
}

/// `abs(2 * (5 + 3)) / (8 - 1)`, the classic demo expression.
fn showcase(ctx: &mut Context) -> NodeId {
    let two = ctx.num(2.0);
    let five = ctx.num(5.0);
    let three = ctx.num(3.0);
    let eight = ctx.num(8.0);
    let one = ctx.num(1.0);
    let sum = ctx.add(five, three);
    let prod = ctx.mul(two, sum);
    let magnitude = ctx.abs(prod);
    let denom = ctx.sub(eight, one);
    ctx.div(magnitude, denom)
}

/// `p = q + r + 1, q = p * 2 - r, r = p + q - 3` with root
/// `(p + q) * (r - 5)`.
fn mutual_system(ctx: &mut Context) -> Result<NodeId, Box<dyn Error>> {
    let p = ctx.fresh_var();
    let q = ctx.fresh_var();
    let r = ctx.fresh_var();
    let one = ctx.num(1.0);
    let two = ctx.num(2.0);
    let three = ctx.num(3.0);
    let five = ctx.num(5.0);

    let qr = ctx.add(q, r);
    let bp = ctx.add(qr, one);
    ctx.define(p, bp)?;
    let p2 = ctx.mul(p, two);
    let bq = ctx.sub(p2, r);
    ctx.define(q, bq)?;
    let pq = ctx.add(p, q);
    let br = ctx.sub(pq, three);
    ctx.define(r, br)?;

    let left = ctx.add(p, q);
    let right = ctx.sub(r, five);
    Ok(ctx.mul(left, right))
}
