//! Parser for the default notation produced by [`Expr`]'s `Display` implementation: operands and
//! operators separated by whitespace, `arg1 arg2 ... op`, with no parentheses.
//!
//! The input is read left to right with a stack of values. Numbers and variables are pushed onto
//! the stack. An operator pops as many values as its arity requires and pushes the operation
//! built from them; a variadic operator pops **every** value on the stack. Exactly one value must
//! remain at the end.

use log::debug;
use polish_expr::{Arity, Expr};
use super::{error::{kind, Error}, Parser};

/// What a token in stack notation can be.
const TERM: &str = "a number, a variable, or an operator";

impl Parser<'_> {
    /// Parses a single expression in stack notation. All the tokens must be consumed by the
    /// parser; if not, an error is returned.
    pub fn try_parse_stack_full(&mut self) -> Result<Expr, Error> {
        debug!("parsing {:?} in stack notation", self.source);

        let mut stack = Vec::new();
        while self.current_token().is_some() {
            let Some((op, op_span)) = self.next_operator() else {
                stack.push(self.parse_leaf(TERM)?);
                continue;
            };

            let count = match op.arity() {
                Arity::Fixed(n) => n.min(stack.len()),
                Arity::Variadic => stack.len(),
            };
            let args = stack.split_off(stack.len() - count);
            let expr = Expr::try_op(op, args)
                .map_err(|err| self.wrong_arg_count(op_span, err))?;
            stack.push(expr);
        }

        if stack.len() > 1 {
            return Err(self.error(kind::UnusedOperands { count: stack.len() - 1 }));
        }

        let expr = stack.pop().ok_or_else(|| self.error(kind::EmptyInput))?;
        debug!("parsed {} nodes", expr.node_count());
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::error::Found;
    use polish_expr::{OpKind, Var};
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

    fn stack(source: &str) -> Result<Expr, Error> {
        Parser::new(source).try_parse_stack_full()
    }

    #[test]
    fn polynomial() {
        let expr = stack("x x 2 - * x * 1 +").unwrap();
        assert_eq!(expr, x() * (x() - num(2.0)) * x() + num(1.0));
        assert_eq!(expr.evaluate(3.0, 0.0, 0.0), 10.0);
    }

    #[test]
    fn negative_numbers() {
        assert_eq!(stack("x -3 +").unwrap(), x() + num(-3.0));
        assert_eq!(stack("-3 negate").unwrap(), -num(-3.0));
    }

    #[test]
    fn default_round_trip() {
        let trees = [
            num(4.0),
            Expr::pow(x() / y(), Expr::ln(num(-1.0))) - Expr::cosh(y()),
            Expr::log(num(2.0), Expr::sinh(x())),
            Expr::try_op(OpKind::SumExp, vec![x(), y()]).unwrap() * num(2.0),
        ];

        for tree in trees {
            assert_eq!(stack(&tree.to_string()).unwrap(), tree);
        }
    }

    #[test]
    fn variadic_consumes_whole_stack() {
        let expr = stack("x y 1 softmax").unwrap();
        assert_eq!(expr, Expr::try_op(OpKind::Softmax, vec![x(), y(), num(1.0)]).unwrap());

        // `sumexp` takes `z x y`, leaving nothing for `+`
        let err = stack("z x y sumexp +").unwrap_err();
        assert_eq!(err.to_string(), "at position 13: expected exactly 2 arguments for `+`, found `+`");
    }

    #[test]
    fn underflow() {
        let err = stack("x +").unwrap_err();
        assert_eq!(err.position(), 2);
        assert_eq!(err.expected(), "exactly 2 arguments for `+`");

        let err = stack("sumexp").unwrap_err();
        assert_eq!(err.expected(), "at least 1 argument for `sumexp`");
    }

    #[test]
    fn unused_operands() {
        let err = stack("x y").unwrap_err();
        assert_eq!(err.to_string(), "at position 3: expected an operator, found end of input");
    }

    #[test]
    fn unknown_token() {
        let err = stack("x (y) +").unwrap_err();
        assert_eq!(err.position(), 2);
        assert_eq!(err.found(), &Found::Text("(".to_string()));
        assert_eq!(err.expected(), TERM);
    }

    #[test]
    fn empty_input() {
        let err = stack("   ").unwrap_err();
        assert_eq!(err.to_string(), "at position 3: expected an expression, found end of input");
    }
}
