//! The expression tree.
//!
//! An [`Expr`] is one of three kinds of node:
//!
//! - [`Expr::Const`], a numeric literal,
//! - [`Expr::Var`], one of the three variables `x`, `y`, or `z`,
//! - [`Expr::Op`], an operation applied to an ordered list of operands.
//!
//! Trees are immutable values: every transformation ([`Expr::differentiate`],
//! [`Expr::simplify`]) builds and returns a new tree, and nodes are never shared between trees.
//!
//! # Structural equality
//!
//! The [`PartialEq`] implementation for [`Expr`] implements **structural equality**: two trees are
//! equal if they have the same node kinds and operation kinds, with equal operands in the same
//! order. Operand order matters even for commutative operations, so `(+ x y)` and `(+ y x)` are
//! not equal. Constants compare with `==` on `f64`, so a tree containing `NaN` is not equal to
//! itself.

mod iter;

use crate::op::OpKind;
pub use iter::ExprIter;
use std::{fmt, ops::{Add, Div, Mul, Neg, Sub}, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the variables that can appear in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Var {
    X,
    Y,
    Z,
}

impl Var {
    /// Every variable, ordered by [`Var::index`].
    pub const ALL: [Var; 3] = [Self::X, Self::Y, Self::Z];

    /// Returns the position of this variable's value in an evaluation binding `[x, y, z]`.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Returns the name of the variable.
    pub fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The given name is not one of `x`, `y`, or `z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariable(pub String);

impl fmt::Display for UnknownVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variable `{}`, expected one of `x`, `y`, `z`", self.0)
    }
}

impl std::error::Error for UnknownVariable {}

impl FromStr for Var {
    type Err = UnknownVariable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|var| var.name() == s)
            .ok_or_else(|| UnknownVariable(s.to_string()))
    }
}

/// An operation was given a number of operands its arity does not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArityError {
    /// The operation that was being built.
    pub kind: OpKind,

    /// The number of operands that were given.
    pub given: usize,
}

impl fmt::Display for ArityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` takes {}, but {} were given",
            self.kind,
            self.kind.arity(),
            self.given,
        )
    }
}

impl std::error::Error for ArityError {}

/// An operation applied to its operands.
///
/// The number of operands is always accepted by the kind's [`Arity`](crate::op::Arity). The
/// fields are private so that this cannot be broken after construction, and deserialized
/// operations go through the same check.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawOp"))]
pub struct Op {
    kind: OpKind,
    args: Vec<Expr>,
}

/// The unchecked form of [`Op`] read by the deserializer.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawOp {
    kind: OpKind,
    args: Vec<Expr>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawOp> for Op {
    type Error = ArityError;

    fn try_from(raw: RawOp) -> Result<Self, Self::Error> {
        Op::new(raw.kind, raw.args)
    }
}

impl Op {
    /// Applies an operation to the given operands, checking that their number is accepted by the
    /// kind's arity.
    pub fn new(kind: OpKind, args: Vec<Expr>) -> Result<Self, ArityError> {
        if kind.arity().accepts(args.len()) {
            Ok(Self { kind, args })
        } else {
            Err(ArityError { kind, given: args.len() })
        }
    }

    /// Returns the kind of operation.
    pub fn kind(&self) -> OpKind {
        self.kind
    }

    /// Returns the operands, in order.
    pub fn args(&self) -> &[Expr] {
        &self.args
    }

    /// Consumes the operation, returning its operands.
    pub fn into_args(self) -> Vec<Expr> {
        self.args
    }
}

/// A node of an expression tree.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A numeric literal.
    Const(f64),

    /// A variable.
    Var(Var),

    /// An operation.
    Op(Op),
}

impl Expr {
    /// Builds an operation node, checking that `args` is accepted by the kind's arity.
    pub fn try_op(kind: OpKind, args: Vec<Expr>) -> Result<Self, ArityError> {
        Op::new(kind, args).map(Self::Op)
    }

    /// Builds an operation node from operands whose count is known to be valid.
    pub(crate) fn op(kind: OpKind, args: Vec<Expr>) -> Self {
        debug_assert!(kind.arity().accepts(args.len()), "bad arity for `{}`", kind);
        Self::Op(Op { kind, args })
    }

    /// `(negate a)`
    pub fn negate(a: Expr) -> Self {
        Self::op(OpKind::Negate, vec![a])
    }

    /// `(pow base exponent)`
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Self::op(OpKind::Pow, vec![base, exponent])
    }

    /// `(log base value)`
    pub fn log(base: Expr, value: Expr) -> Self {
        Self::op(OpKind::Log, vec![base, value])
    }

    /// `(ln a)`
    pub fn ln(a: Expr) -> Self {
        Self::op(OpKind::Ln, vec![a])
    }

    /// `(sinh a)`
    pub fn sinh(a: Expr) -> Self {
        Self::op(OpKind::Sinh, vec![a])
    }

    /// `(cosh a)`
    pub fn cosh(a: Expr) -> Self {
        Self::op(OpKind::Cosh, vec![a])
    }

    /// `(sumexp a)`, which is `e^a`.
    pub fn exp(a: Expr) -> Self {
        Self::op(OpKind::SumExp, vec![a])
    }

    /// Returns the value of this node if it is a constant.
    pub fn as_const(&self) -> Option<f64> {
        match self {
            Self::Const(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if this node is a constant exactly equal to `value`.
    ///
    /// This is exact floating-point equality, not a tolerance check. A constant produced by
    /// folding a chain of operations may miss by a rounding error and will not match.
    pub fn is_const(&self, value: f64) -> bool {
        self.as_const() == Some(value)
    }

    /// Returns true if this node is the constant `0`.
    pub fn is_zero(&self) -> bool {
        self.is_const(0.0)
    }

    /// Returns true if this node is the constant `1`.
    pub fn is_one(&self) -> bool {
        self.is_const(1.0)
    }

    /// Returns the operation node, if this is one.
    pub fn as_op(&self) -> Option<&Op> {
        match self {
            Self::Op(op) => Some(op),
            _ => None,
        }
    }

    /// Returns an iterator that traverses the tree in left-to-right post-order: every operand is
    /// yielded before the operation it belongs to.
    pub fn post_order_iter(&self) -> ExprIter<'_> {
        ExprIter::new(self)
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.post_order_iter().count()
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Const(value)
    }
}

impl From<Var> for Expr {
    fn from(var: Var) -> Self {
        Self::Var(var)
    }
}

/// Implements a binary operator on [`Expr`] by wrapping both operands in an operation node. No
/// simplification is done.
macro_rules! binary_op {
    ($($trait:ident $method:ident => $kind:ident),* $(,)?) => {
        $(
            impl $trait for Expr {
                type Output = Expr;

                fn $method(self, rhs: Self) -> Self::Output {
                    Expr::op(OpKind::$kind, vec![self, rhs])
                }
            }
        )*
    };
}

binary_op!(
    Add add => Add,
    Sub sub => Sub,
    Mul mul => Mul,
    Div div => Div,
);

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        Expr::negate(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::Var(Var::X)
    }

    #[test]
    fn variable_names() {
        assert_eq!("y".parse::<Var>(), Ok(Var::Y));
        assert_eq!("w".parse::<Var>(), Err(UnknownVariable("w".to_string())));
        assert_eq!(Var::Z.index(), 2);
        assert_eq!(Var::X.to_string(), "x");
    }

    #[test]
    fn operators_build_nodes() {
        let expr = x() * Expr::Const(2.0) + -x();
        assert_eq!(expr, Expr::op(OpKind::Add, vec![
            Expr::op(OpKind::Mul, vec![x(), Expr::Const(2.0)]),
            Expr::op(OpKind::Negate, vec![x()]),
        ]));
    }

    #[test]
    fn checked_construction() {
        assert!(Expr::try_op(OpKind::Add, vec![x(), x()]).is_ok());
        assert!(Expr::try_op(OpKind::Softmax, vec![x(), x(), x()]).is_ok());

        let err = Expr::try_op(OpKind::Add, vec![x()]).unwrap_err();
        assert_eq!(err, ArityError { kind: OpKind::Add, given: 1 });
        assert_eq!(err.to_string(), "`+` takes exactly 2 arguments, but 1 were given");

        assert!(Expr::try_op(OpKind::SumExp, vec![]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_checks_arity() {
        let expr = serde_json::from_str::<Expr>(r#"{"Op":{"kind":"Add","args":[{"Const":1.0},{"Var":"X"}]}}"#).unwrap();
        assert_eq!(expr, Expr::Const(1.0) + x());

        let err = serde_json::from_str::<Expr>(r#"{"Op":{"kind":"Add","args":[{"Const":1.0}]}}"#).unwrap_err();
        assert!(err.to_string().contains("`+` takes exactly 2 arguments, but 1 were given"));

        let err = serde_json::from_str::<Expr>(r#"{"Op":{"kind":"SumExp","args":[]}}"#);
        assert!(err.is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialize_round_trip() {
        let expr = Expr::try_op(OpKind::Softmax, vec![x(), -Expr::Var(Var::Z)]).unwrap();
        let json = serde_json::to_string(&expr).unwrap();
        assert_eq!(serde_json::from_str::<Expr>(&json).unwrap(), expr);
    }

    #[test]
    fn structural_equality_is_ordered() {
        assert_ne!(x() + Expr::Var(Var::Y), Expr::Var(Var::Y) + x());
        assert_eq!(x() + Expr::Const(1.0), x() + Expr::Const(1.0));
    }

    #[test]
    fn exact_constant_predicates() {
        assert!(Expr::Const(0.0).is_zero());
        assert!(Expr::Const(-0.0).is_zero());
        assert!(Expr::Const(1.0).is_one());
        assert!(!Expr::Const(0.1 + 0.2 - 0.3).is_zero());
        assert!(!x().is_zero());
    }

    #[test]
    fn post_order() {
        // (+ (* x 2) (negate y))
        let expr = x() * Expr::Const(2.0) + -Expr::Var(Var::Y);
        let visited = expr.post_order_iter()
            .map(|node| match node {
                Expr::Const(c) => c.to_string(),
                Expr::Var(var) => var.to_string(),
                Expr::Op(op) => op.kind().to_string(),
            })
            .collect::<Vec<_>>();
        assert_eq!(visited, ["x", "2", "*", "y", "negate", "+"]);
        assert_eq!(expr.node_count(), 6);
    }
}
