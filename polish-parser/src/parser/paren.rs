use polish_expr::{Expr, Notation, OpKind, Var};
use super::{error::{kind, Error, Found}, Parser};
use crate::tokenizer::TokenKind;

/// What a leaf in prefix or postfix notation can be.
const OPERAND: &str = "a number, a variable, or a parenthesized expression";

impl Parser<'_> {
    /// Parses an argument: either a parenthesized operation, or a leaf.
    pub(crate) fn parse_store(&mut self, notation: Notation) -> Result<Expr, Error> {
        match self.current_kind() {
            Some(TokenKind::OpenParen) => self.parse_paren(notation),
            _ => self.parse_leaf(OPERAND),
        }
    }

    /// Parses a parenthesized operation, `(op arg1 arg2 ...)` in prefix notation or
    /// `(arg1 arg2 ... op)` in postfix notation.
    fn parse_paren(&mut self, notation: Notation) -> Result<Expr, Error> {
        let open_span = self.span();
        self.cursor += 1;

        let (op_span, expr) = match notation {
            Notation::Prefix => {
                let (op, op_span) = self.expect_operator()?;
                let args = self.parse_args(notation, Some(op))?;
                (op_span, Expr::try_op(op, args))
            },
            Notation::Postfix => {
                let args = self.parse_args(notation, None)?;
                let (op, op_span) = self.expect_operator()?;
                (op_span, Expr::try_op(op, args))
            },
        };
        let expr = expr.map_err(|err| self.wrong_arg_count(op_span, err))?;

        if self.current_kind() == Some(TokenKind::CloseParen) {
            self.cursor += 1;
            Ok(expr)
        } else {
            Err(self.error_at(
                &[self.span(), open_span],
                self.found(),
                kind::UnclosedParenthesis { opening: true },
            ))
        }
    }

    /// Parses arguments until a closing parenthesis or the end of the input.
    ///
    /// In prefix notation, `operator` is the operator the arguments belong to, and finding
    /// another operator is an error. In postfix notation, an operator ends the arguments.
    fn parse_args(&mut self, notation: Notation, operator: Option<OpKind>) -> Result<Vec<Expr>, Error> {
        let mut args = Vec::new();

        loop {
            match self.current_kind() {
                None | Some(TokenKind::CloseParen) => break,
                _ => (),
            }

            if self.peek_operator().is_some() {
                match operator {
                    Some(operator) => return Err(self.error(kind::ExpectedArgument { operator })),
                    None => break,
                }
            }

            if notation == Notation::Postfix && self.at_unknown_operator() {
                break;
            }

            args.push(self.parse_store(notation)?);
        }

        Ok(args)
    }

    /// Returns true if the current token is a word that is not a variable, right before a `)` or
    /// the end of the input. In postfix notation, this is where the operator belongs, so the word
    /// is reported as an unknown operator instead of an unknown operand.
    fn at_unknown_operator(&self) -> bool {
        let Some(token) = self.current_token() else {
            return false;
        };

        token.kind == TokenKind::Name
            && token.lexeme.parse::<Var>().is_err()
            && self.tokens
                .get(self.cursor + 1)
                .map_or(true, |next| next.kind == TokenKind::CloseParen)
    }

    /// Parses a number, `-`? digit+, or one of the variables `x`, `y`, `z`.
    ///
    /// The leaf must end on a token boundary, so `x2` and `3y` are rejected as a whole rather than
    /// read as two leaves.
    pub(crate) fn parse_leaf(&mut self, expected: &'static str) -> Result<Expr, Error> {
        let leaf_error = |parser: &Self| parser.error(kind::ExpectedLeaf { expected });
        let Some(token) = self.current_token() else {
            return Err(leaf_error(self));
        };
        let start = token.span.start;

        let (expr, len) = match token.kind {
            TokenKind::Int => (Expr::Const(self.parse_number(token.span.clone())?), 1),
            TokenKind::Symbol if token.lexeme == "-" => match self.tokens.get(self.cursor + 1) {
                Some(digits) if digits.kind == TokenKind::Int && digits.is_adjacent_to(token) => {
                    (Expr::Const(self.parse_number(start..digits.span.end)?), 2)
                },
                _ => return Err(leaf_error(self)),
            },
            TokenKind::Name => match token.lexeme.parse::<Var>() {
                Ok(var) => (Expr::Var(var), 1),
                Err(_) => return Err(leaf_error(self)),
            },
            _ => return Err(leaf_error(self)),
        };

        let last = &self.tokens[self.cursor + len - 1];
        if let Some(next) = self.tokens.get(self.cursor + len) {
            if next.kind.continues_word() && next.is_adjacent_to(last) {
                let span = start..next.span.end;
                let found = Found::Text(self.source[span.clone()].to_string());
                return Err(self.error_at(&[span], found, kind::ExpectedLeaf { expected }));
            }
        }

        self.cursor += len;
        Ok(expr)
    }

    /// Parses the given span of the source code as a number.
    fn parse_number(&self, span: std::ops::Range<usize>) -> Result<f64, Error> {
        let text = &self.source[span.clone()];
        text.parse::<f64>().map_err(|_| {
            self.error_at(&[span], Found::Text(text.to_string()), kind::ExpectedLeaf {
                expected: "an integer",
            })
        })
    }
}
