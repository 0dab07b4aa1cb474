//! Serialization of expression trees into text.
//!
//! Three formats are supported:
//!
//! - prefix, `(op arg1 arg2 ...)`,
//! - postfix, `(arg1 arg2 ... op)`,
//! - the default format used by [`Display`], `arg1 arg2 ... op`, which is postfix without any
//!   parentheses.
//!
//! Leaves are written bare in every format: constants use the shortest decimal representation
//! that round-trips (`5`, `-3`, `0.25`), and variables use their name.

use crate::expr::Expr;
use std::fmt::{Display, Formatter, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether the operator of a parenthesized operation is written before or after its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Notation {
    /// `(op arg1 arg2 ...)`
    Prefix,

    /// `(arg1 arg2 ... op)`
    Postfix,
}

/// A wrapper type that implements [`Display`] for an [`Expr`] in the given [`Notation`].
///
/// This type is created by [`Expr::display`].
pub struct NotationFormatter<'a> {
    expr: &'a Expr,
    notation: Notation,
}

impl Display for NotationFormatter<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self.expr {
            Expr::Op(op) => {
                write!(f, "(")?;
                if self.notation == Notation::Prefix {
                    write!(f, "{}", op.kind())?;
                }
                for (i, arg) in op.args().iter().enumerate() {
                    if self.notation == Notation::Prefix || i > 0 {
                        write!(f, " ")?;
                    }
                    arg.display(self.notation).fmt(f)?;
                }
                if self.notation == Notation::Postfix {
                    write!(f, " {}", op.kind())?;
                }
                write!(f, ")")
            },
            leaf => leaf.fmt(f),
        }
    }
}

impl Expr {
    /// Wraps the expression in a [`NotationFormatter`], which implements [`Display`].
    pub fn display(&self, notation: Notation) -> NotationFormatter<'_> {
        NotationFormatter { expr: self, notation }
    }

    /// Formats the expression in prefix notation, `(op arg1 arg2 ...)`.
    pub fn to_prefix_string(&self) -> String {
        self.display(Notation::Prefix).to_string()
    }

    /// Formats the expression in postfix notation, `(arg1 arg2 ... op)`.
    pub fn to_postfix_string(&self) -> String {
        self.display(Notation::Postfix).to_string()
    }

    /// Formats the expression in the default format, `arg1 arg2 ... op`. This is the same as
    /// the [`Display`] implementation.
    pub fn to_default_string(&self) -> String {
        self.to_string()
    }
}

/// Formats the expression in the default format, `arg1 arg2 ... op`, without parentheses.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Const(value) => write!(f, "{}", value),
            Self::Var(var) => write!(f, "{}", var),
            Self::Op(op) => {
                for arg in op.args() {
                    write!(f, "{} ", arg)?;
                }
                write!(f, "{}", op.kind())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{expr::Var, op::OpKind};
    use super::*;

    fn x() -> Expr {
        Expr::Var(Var::X)
    }

    fn num(value: f64) -> Expr {
        Expr::Const(value)
    }

    #[test]
    fn leaves() {
        assert_eq!(num(5.0).to_prefix_string(), "5");
        assert_eq!(num(-3.0).to_postfix_string(), "-3");
        assert_eq!(num(0.25).to_string(), "0.25");
        assert_eq!(x().to_prefix_string(), "x");
    }

    #[test]
    fn nested() {
        // x * (x - 2) * x + 1
        let expr = x() * (x() - num(2.0)) * x() + num(1.0);
        assert_eq!(expr.to_prefix_string(), "(+ (* (* x (- x 2)) x) 1)");
        assert_eq!(expr.to_postfix_string(), "(((x (x 2 -) *) x *) 1 +)");
        assert_eq!(expr.to_string(), "x x 2 - * x * 1 +");
    }

    #[test]
    fn functions() {
        let expr = Expr::try_op(OpKind::Softmax, vec![x(), Expr::negate(num(-1.0)), num(2.0)]).unwrap();
        assert_eq!(expr.to_prefix_string(), "(softmax x (negate -1) 2)");
        assert_eq!(expr.to_postfix_string(), "(x (-1 negate) 2 softmax)");
        assert_eq!(expr.to_string(), "x -1 negate 2 softmax");
    }
}
