//! The identity rules of each operation.
//!
//! Each rule in this module is a function that takes the simplified operands of an operation, at
//! least one of which is not a constant, and returns `Some(expr)` with the rewritten expression if
//! the rule applies, or `None` if it does not. Constants are compared with exact equality (see
//! [`Expr::is_const`]).

use crate::{expr::Expr, op::OpKind, step_collector::StepCollector};
use super::step::Step;

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let [a, b] = args else { return None };
    let result = if a.is_zero() {
        b
    } else if b.is_zero() {
        a
    } else {
        return None;
    };

    step_collector.push(Step::AddZero);
    Some(result.clone())
}

/// `0-a = -a`
pub fn subtract_from_zero(args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match args {
        [a, b] if a.is_zero() => {
            step_collector.push(Step::SubtractFromZero);
            Some(Expr::negate(b.clone()))
        },
        _ => None,
    }
}

/// `a-0 = a`
pub fn subtract_zero(args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match args {
        [a, b] if b.is_zero() => {
            step_collector.push(Step::SubtractZero);
            Some(a.clone())
        },
        _ => None,
    }
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    if args.iter().any(Expr::is_zero) {
        step_collector.push(Step::MultiplyZero);
        Some(Expr::Const(0.0))
    } else {
        None
    }
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let [a, b] = args else { return None };
    let result = if a.is_one() {
        b
    } else if b.is_one() {
        a
    } else {
        return None;
    };

    step_collector.push(Step::MultiplyOne);
    Some(result.clone())
}

/// `0/a = 0`
pub fn divide_zero(args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match args {
        [a, _] if a.is_zero() => {
            step_collector.push(Step::DivideZero);
            Some(Expr::Const(0.0))
        },
        _ => None,
    }
}

/// `a/1 = a`
pub fn divide_one(args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match args {
        [a, b] if b.is_one() => {
            step_collector.push(Step::DivideOne);
            Some(a.clone())
        },
        _ => None,
    }
}

/// `-0 = 0`
pub fn negate_zero(args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match args {
        [a] if a.is_zero() => {
            step_collector.push(Step::NegateZero);
            Some(Expr::Const(0.0))
        },
        _ => None,
    }
}

/// `0^a = 0`
pub fn power_zero_left(args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match args {
        [base, _] if base.is_zero() => {
            step_collector.push(Step::PowerZeroLeft);
            Some(Expr::Const(0.0))
        },
        _ => None,
    }
}

/// `1^a = 1`
pub fn power_one_left(args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match args {
        [base, _] if base.is_one() => {
            step_collector.push(Step::PowerOneLeft);
            Some(Expr::Const(1.0))
        },
        _ => None,
    }
}

/// `a^0 = 1`
pub fn power_zero(args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match args {
        [_, exponent] if exponent.is_zero() => {
            step_collector.push(Step::PowerZero);
            Some(Expr::Const(1.0))
        },
        _ => None,
    }
}

/// `log(a, 1) = 1`
///
/// This is not mathematically correct (`log(a, 1) = 0`), see [`Step::LogOfOne`].
pub fn log_of_one(args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match args {
        [_, value] if value.is_one() => {
            step_collector.push(Step::LogOfOne);
            Some(Expr::Const(1.0))
        },
        _ => None,
    }
}

/// Applies the rules of the given operation, in order, stopping at the first one that applies.
///
/// Operations without identity rules are only simplified by constant folding.
pub fn all(kind: OpKind, args: &[Expr], step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match kind {
        OpKind::Add => add_zero(args, step_collector),
        OpKind::Sub => subtract_from_zero(args, step_collector)
            .or_else(|| subtract_zero(args, step_collector)),
        OpKind::Mul => multiply_zero(args, step_collector)
            .or_else(|| multiply_one(args, step_collector)),
        OpKind::Div => divide_zero(args, step_collector)
            .or_else(|| divide_one(args, step_collector)),
        OpKind::Negate => negate_zero(args, step_collector),
        OpKind::Pow => power_zero_left(args, step_collector)
            .or_else(|| power_one_left(args, step_collector))
            .or_else(|| power_zero(args, step_collector)),
        OpKind::Log => log_of_one(args, step_collector),
        OpKind::Ln | OpKind::Sinh | OpKind::Cosh | OpKind::SumExp | OpKind::Softmax => None,
    }
}
