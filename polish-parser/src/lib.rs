//! Parser for arithmetic expressions written in prefix, postfix, or stack notation.
//!
//! Each notation builds a [`polish_expr::Expr`]:
//!
//! - [`parse_prefix`] reads `(op arg1 arg2 ...)`,
//! - [`parse_postfix`] reads `(arg1 arg2 ... op)`,
//! - [`parse_default`] reads `arg1 arg2 ... op` without parentheses, the format written by
//!   `Expr`'s `Display` implementation.
//!
//! Operands are integer literals with an optional leading `-` (`4`, `-12`), the variables `x`,
//! `y`, and `z`, or nested operations. Operators are matched against a
//! [`Registry`](polish_expr::Registry); use [`Parser::with_registry`] to restrict the operators
//! that are recognized.
//!
//! ```
//! use polish_parser::{parse_postfix, parse_prefix};
//!
//! let expr = parse_prefix("(+ (* x x) 3)").unwrap();
//! assert_eq!(expr.evaluate(2.0, 0.0, 0.0), 7.0);
//! assert_eq!(expr.to_postfix_string(), "((x x *) 3 +)");
//!
//! let err = parse_postfix("(x y)").unwrap_err();
//! assert_eq!(err.position(), 4);
//! ```
//!
//! Parsing stops at the first error. An [`Error`] carries the character offset of the failure,
//! what was expected there, and what was found, and can be rendered as a report pointing into
//! the source with [`Error::render`].

pub mod parser;
pub mod tokenizer;

pub use parser::{error::{Error, Found}, Parser};
pub use polish_expr::Notation;

use polish_expr::Expr;

/// Parses an expression in the given notation.
pub fn parse(source: &str, notation: Notation) -> Result<Expr, Error> {
    Parser::new(source).try_parse_full(notation)
}

/// Parses an expression in prefix notation, `(op arg1 arg2 ...)`.
pub fn parse_prefix(source: &str) -> Result<Expr, Error> {
    parse(source, Notation::Prefix)
}

/// Parses an expression in postfix notation, `(arg1 arg2 ... op)`.
pub fn parse_postfix(source: &str) -> Result<Expr, Error> {
    parse(source, Notation::Postfix)
}

/// Parses an expression in stack notation, `arg1 arg2 ... op`, as written by `Expr`'s `Display`
/// implementation.
///
/// A variadic operator consumes every value parsed before it, so only trees whose variadic
/// operations are not preceded by unrelated operands read back unchanged.
pub fn parse_default(source: &str) -> Result<Expr, Error> {
    Parser::new(source).try_parse_stack_full()
}
