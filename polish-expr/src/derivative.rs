//! Symbolic differentiation.
//!
//! Each operation has its own differentiation rule, applied directly to the operands without any
//! simplification. The resulting trees are large and full of `0 * a` and `a * 1` terms; pass them
//! through [`Expr::simplify`] to clean them up.

use crate::{expr::{Expr, Var}, op::OpKind};

impl Expr {
    /// Returns the derivative of this expression with respect to the given variable.
    ///
    /// Differentiation never fails. The `pow` rule assumes a positive base, as it contains the
    /// term `ln(base)`.
    pub fn differentiate(&self, with: Var) -> Expr {
        derivative(self, with)
    }
}

/// Produces the derivative of the given expression.
pub fn derivative(f: &Expr, with: Var) -> Expr {
    match f {
        Expr::Const(_) => Expr::Const(0.0),
        Expr::Var(var) => Expr::Const(if *var == with { 1.0 } else { 0.0 }),
        Expr::Op(op) => op_derivative(op.kind(), op.args(), with),
    }
}

/// Computes the derivative of an operation applied to the given operands.
fn op_derivative(kind: OpKind, args: &[Expr], with: Var) -> Expr {
    match (kind, args) {
        // (f + g)' = f' + g'
        (OpKind::Add, [f, g]) => derivative(f, with) + derivative(g, with),

        // (f - g)' = f' - g'
        (OpKind::Sub, [f, g]) => derivative(f, with) - derivative(g, with),

        // (-f)' = -f'
        (OpKind::Negate, [f]) => -derivative(f, with),

        (OpKind::Mul, [f, g]) => product_rule(f, g, with),
        (OpKind::Div, [f, g]) => quotient_rule(f, g, with),

        // sinh(f)' = cosh(f) * f'
        (OpKind::Sinh, [f]) => Expr::cosh(f.clone()) * derivative(f, with),

        // cosh(f)' = sinh(f) * f'
        (OpKind::Cosh, [f]) => Expr::sinh(f.clone()) * derivative(f, with),

        // ln(f)' = f' / f
        (OpKind::Ln, [f]) => derivative(f, with) / f.clone(),

        // log(a, b) = ln(b) / ln(a)
        (OpKind::Log, [base, value]) => quotient_rule(
            &Expr::ln(value.clone()),
            &Expr::ln(base.clone()),
            with,
        ),

        (OpKind::Pow, [base, exponent]) => power_rule(base, exponent, with),
        (OpKind::SumExp, args) => sum_exp_rule(args, with),
        (OpKind::Softmax, [_, ..]) => softmax_rule(args, with),
        _ => unreachable!("`{}` applied to {} operand(s)", kind, args.len()),
    }
}

/// `(f * g)' = f' * g + f * g'`
fn product_rule(f: &Expr, g: &Expr, with: Var) -> Expr {
    derivative(f, with) * g.clone() + f.clone() * derivative(g, with)
}

/// `(f / g)' = (f' * g - f * g') / (g * g)`
fn quotient_rule(f: &Expr, g: &Expr, with: Var) -> Expr {
    (derivative(f, with) * g.clone() - f.clone() * derivative(g, with)) / (g.clone() * g.clone())
}

/// `(f ^ g)' = (f ^ (g - 1) * g) * f' + (f ^ g * g') * ln(f)`
///
/// Valid for `f > 0`.
fn power_rule(f: &Expr, g: &Expr, with: Var) -> Expr {
    let power_term = Expr::pow(f.clone(), g.clone() - Expr::Const(1.0)) * g.clone()
        * derivative(f, with);
    let exponential_term = Expr::pow(f.clone(), g.clone()) * derivative(g, with)
        * Expr::ln(f.clone());
    power_term + exponential_term
}

/// `sumexp(f1, f2, ...)' = 0 + e^f1 * f1' + e^f2 * f2' + ...`
fn sum_exp_rule(args: &[Expr], with: Var) -> Expr {
    args.iter().fold(Expr::Const(0.0), |acc, arg| {
        acc + Expr::exp(arg.clone()) * derivative(arg, with)
    })
}

/// The quotient rule applied to `e^f1 / sumexp(f1, f2, ...)`:
///
/// `softmax(f1, f2, ...)' = (S * (e^f1 * f1') - e^f1 * S') / (S * S)`, where
/// `S = sumexp(f1, f2, ...)`.
fn softmax_rule(args: &[Expr], with: Var) -> Expr {
    let first = &args[0];
    let numerator = Expr::exp(first.clone());
    let denominator = Expr::op(OpKind::SumExp, args.to_vec());

    (denominator.clone() * (numerator.clone() * derivative(first, with))
        - numerator * sum_exp_rule(args, with))
        / (denominator.clone() * denominator)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::Var(Var::X)
    }

    fn y() -> Expr {
        Expr::Var(Var::Y)
    }

    fn num(value: f64) -> Expr {
        Expr::Const(value)
    }

    /// The point all numeric checks are done at.
    const AT: [f64; 3] = [1.3, 0.7, 2.1];

    /// Approximates the derivative of `f` with respect to `x` at [`AT`] with a central difference.
    fn numeric_derivative(f: &Expr) -> f64 {
        let h = 1e-6;
        let [x, y, z] = AT;
        (f.evaluate(x + h, y, z) - f.evaluate(x - h, y, z)) / (2.0 * h)
    }

    /// Checks the symbolic derivative of `f` against a numeric approximation.
    fn check(f: Expr) {
        let symbolic = f.differentiate(Var::X).evaluate_with(AT);
        assert_float_relative_eq!(symbolic, numeric_derivative(&f), 1e-5);

        // simplification must not change the value
        let simplified = f.differentiate(Var::X).simplify().evaluate_with(AT);
        assert_float_relative_eq!(simplified, symbolic, 1e-9);
    }

    #[test]
    fn leaves() {
        assert_eq!(num(4.0).differentiate(Var::X), num(0.0));
        assert_eq!(x().differentiate(Var::X), num(1.0));
        assert_eq!(y().differentiate(Var::X), num(0.0));
        assert_eq!(y().differentiate(Var::Y), num(1.0));
    }

    #[test]
    fn unsimplified_product_rule() {
        let f = x() * y();
        assert_eq!(f.differentiate(Var::X), num(1.0) * y() + x() * num(0.0));
    }

    #[test]
    fn unsimplified_quotient_rule() {
        let f = x() / num(2.0);
        assert_eq!(
            f.differentiate(Var::X),
            (num(1.0) * num(2.0) - x() * num(0.0)) / (num(2.0) * num(2.0)),
        );
    }

    #[test]
    fn unsimplified_sum_exp_rule() {
        let f = Expr::try_op(OpKind::SumExp, vec![x(), y()]).unwrap();
        assert_eq!(
            f.differentiate(Var::X),
            num(0.0) + Expr::exp(x()) * num(1.0) + Expr::exp(y()) * num(0.0),
        );
    }

    #[test]
    fn arithmetic() {
        check(x() * (x() - num(2.0)) * x() + num(1.0));
        check(-(x() * y()) / (x() + num(3.0)));
    }

    #[test]
    fn hyperbolic() {
        check(Expr::sinh(x() * x()));
        check(Expr::cosh(num(2.0) * x()));
    }

    #[test]
    fn logarithms() {
        check(Expr::ln(x() * x() + num(1.0)));
        check(Expr::log(num(2.0), x()));
        check(Expr::log(x(), num(10.0)));
        check(Expr::log(x() + num(1.0), x() * x()));
    }

    #[test]
    fn powers() {
        check(Expr::pow(x(), num(3.0)));
        check(Expr::pow(num(2.0), x()));
        check(Expr::pow(x(), x()));
        check(Expr::pow(x() + y(), Expr::sinh(x())));
    }

    #[test]
    fn variadic() {
        check(Expr::try_op(OpKind::SumExp, vec![x(), x() * x(), y()]).unwrap());
        check(Expr::try_op(OpKind::Softmax, vec![x(), y(), num(2.0) * x()]).unwrap());
        check(Expr::try_op(OpKind::Softmax, vec![y(), x()]).unwrap());
    }

    #[test]
    fn linearity() {
        let a = Expr::pow(x(), num(2.0)) * y();
        let b = Expr::sinh(x()) / (y() + num(1.0));
        let whole = (a.clone() + b.clone()).differentiate(Var::X);
        let parts = a.differentiate(Var::X) + b.differentiate(Var::X);

        for at in [[0.5, 1.0, 0.0], [2.0, -0.3, 7.0], AT] {
            assert_eq!(whole.evaluate_with(at), parts.evaluate_with(at));
        }
    }

    #[test]
    fn other_variable() {
        let f = Expr::pow(x(), num(2.0)) * y() + Expr::cosh(y());
        let df = f.differentiate(Var::Y);
        let [x, y, _] = AT;
        assert_float_relative_eq!(df.evaluate_with(AT), x * x + y.sinh());
    }
}
