//! Module to simplify expressions.
//!
//! Simplification works bottom-up in a single pass. The operands of an operation are simplified
//! first; then:
//!
//! - if every simplified operand is a constant, the operation is folded into a single constant
//!   holding its value (no identity rules are tried),
//! - otherwise, the identity rules of the operation are tried in order (see [`rules`]), and the
//!   first one that applies replaces the operation,
//! - if none applies, the operation is rebuilt with its simplified operands.
//!
//! The result is always a new tree, and simplifying it again returns an equal tree.

pub mod rules;
pub mod step;

use crate::{expr::Expr, step_collector::StepCollector};
use log::trace;
use step::Step;

impl Expr {
    /// Returns a simplified copy of this expression. See [`simplify()`].
    pub fn simplify(&self) -> Expr {
        simplify(self)
    }
}

/// Base implementation of the simplification algorithm.
fn inner_simplify(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let Expr::Op(op) = expr else {
        return expr.clone();
    };

    let args = op.args()
        .iter()
        .map(|arg| inner_simplify(arg, step_collector))
        .collect::<Vec<_>>();

    if let Some(values) = args.iter().map(Expr::as_const).collect::<Option<Vec<_>>>() {
        step_collector.push(Step::FoldConstants);
        return Expr::Const(op.kind().eval(&values));
    }

    match rules::all(op.kind(), &args, step_collector) {
        Some(rewritten) => {
            trace!("applied identity rule of `{}`", op.kind());
            rewritten
        },
        None => Expr::op(op.kind(), args),
    }
}

/// Simplify the given expression.
pub fn simplify(expr: &Expr) -> Expr {
    inner_simplify(expr, &mut ())
}

/// Simplify the given expression. The steps taken by the simplifier will also be collected and
/// returned, in the order they were applied. This is useful for debugging, and also for
/// displaying the steps taken to the user.
pub fn simplify_with_steps(expr: &Expr) -> (Expr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = inner_simplify(expr, &mut steps);
    (expr, steps)
}
