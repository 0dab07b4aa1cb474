//! Expression trees for arithmetic written in prefix or postfix notation.
//!
//! An [`Expr`] is an immutable tree of constants, the variables `x`, `y`, and `z`, and operations
//! drawn from a fixed set of [`OpKind`]s. Trees can be:
//!
//! - evaluated at a point with [`Expr::evaluate`],
//! - differentiated with respect to a variable with [`Expr::differentiate`],
//! - simplified with [`Expr::simplify`] (or [`simplify_with_steps`] to see which rules fired),
//! - written back to text with [`Expr::to_prefix_string`], [`Expr::to_postfix_string`], and
//!   [`Display`](std::fmt::Display).
//!
//! Parsing text into trees is done by the `polish-parser` crate, which looks up operator tokens
//! in the read-only [`Registry`].
//!
//! ```
//! use polish_expr::{Expr, Var};
//!
//! let x = Expr::Var(Var::X);
//! let f = x.clone() * x + Expr::Const(3.0);
//!
//! assert_eq!(f.evaluate(2.0, 0.0, 0.0), 7.0);
//! assert_eq!(f.differentiate(Var::X).simplify().to_prefix_string(), "(+ x x)");
//! ```

pub mod derivative;
pub mod eval;
pub mod expr;
pub mod fmt;
pub mod op;
pub mod simplify;
pub mod step_collector;

pub use expr::{ArityError, Expr, Op, UnknownVariable, Var};
pub use fmt::Notation;
pub use op::{Arity, OpKind, Registry};
pub use simplify::{simplify, simplify_with_steps, step::Step};
pub use step_collector::StepCollector;
