pub mod error;
mod paren;
mod stack;

use error::{kind, Error, Found};
use log::debug;
use polish_error::ErrorKind;
use polish_expr::{ArityError, Expr, Notation, OpKind, Registry};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A parser for expressions in prefix, postfix, or stack notation.
///
/// Whitespace is dropped when the parser is created; tokens keep their spans, so whether two
/// tokens touch can still be checked with [`Token::is_adjacent_to`].
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The source code being parsed.
    source: &'source str,

    /// The non-whitespace tokens of the source code.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The operators that can be recognized.
    registry: &'source Registry,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source, recognizing every operator in
    /// [`Registry::standard`].
    pub fn new(source: &'source str) -> Self {
        Self::with_registry(source, Registry::standard())
    }

    /// Create a new parser for the given source, recognizing only the operators in the given
    /// registry.
    pub fn with_registry(source: &'source str, registry: &'source Registry) -> Self {
        let tokens = tokenize_complete(source)
            .into_vec()
            .into_iter()
            .filter(|token| !token.is_whitespace())
            .collect();

        Self {
            source,
            tokens,
            cursor: 0,
            registry,
        }
    }

    /// Converts a byte offset into the source code into a character offset.
    fn char_offset(&self, byte: usize) -> usize {
        self.source[..byte].chars().count()
    }

    /// Converts a span of bytes into a span of characters.
    fn char_span(&self, span: &Range<usize>) -> Range<usize> {
        self.char_offset(span.start)..self.char_offset(span.end)
    }

    /// Returns a span pointing at the end of the source code, in bytes.
    pub fn eof_span(&self) -> Range<usize> {
        self.source.len()..self.source.len()
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream, in bytes.
    pub fn span(&self) -> Range<usize> {
        self.current_token()
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns what the cursor is pointing at, for use in an error.
    fn found(&self) -> Found {
        self.current_token()
            .map_or(Found::EndOfInput, |token| Found::Text(token.lexeme.to_string()))
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        self.error_at(&[self.span()], self.found(), kind)
    }

    /// Creates an error that points at the given byte spans.
    pub fn error_at(
        &self,
        spans: &[Range<usize>],
        found: Found,
        kind: impl ErrorKind + 'static,
    ) -> Error {
        let spans = spans.iter().map(|span| self.char_span(span)).collect();
        Error::new(spans, found, kind)
    }

    /// Creates an error for an operator given the wrong number of arguments. The error points at
    /// the operator.
    fn wrong_arg_count(&self, op_span: Range<usize>, err: ArityError) -> Error {
        let found = Found::Text(self.source[op_span.clone()].to_string());
        self.error_at(&[op_span], found, kind::WrongArgCount {
            operator: err.kind,
            arity: err.kind.arity(),
            given: err.given,
        })
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the kind of the current token, or [`None`] at the end of the stream.
    fn current_kind(&self) -> Option<TokenKind> {
        self.current_token().map(|token| token.kind)
    }

    /// Checks if an operator starts at the current token, without moving the cursor. Returns the
    /// operator and its span in bytes.
    ///
    /// Operators are matched directly against the source text, so the longest registered token
    /// that ends on a token boundary wins, regardless of how the tokenizer split the text.
    pub fn peek_operator(&self) -> Option<(OpKind, Range<usize>)> {
        let start = self.current_token()?.span.start;
        self.registry
            .match_at(&self.source[start..])
            .map(|(op, len)| (op, start..start + len))
    }

    /// Parses an operator at the current token, advancing the cursor past every token it covers.
    pub fn next_operator(&mut self) -> Option<(OpKind, Range<usize>)> {
        let (op, span) = self.peek_operator()?;
        while self.current_token().is_some_and(|token| token.span.end <= span.end) {
            self.cursor += 1;
        }
        Some((op, span))
    }

    /// Parses an operator at the current token, or returns an error suggesting similar operators.
    fn expect_operator(&mut self) -> Result<(OpKind, Range<usize>), Error> {
        self.next_operator().ok_or_else(|| {
            let suggestions = self.current_token()
                .map(|token| self.registry.similar(token.lexeme))
                .unwrap_or_default();
            self.error(kind::ExpectedOperator { suggestions })
        })
    }

    /// Parses a single expression in the given notation. All the tokens must be consumed by the
    /// parser; if not, an error is returned.
    pub fn try_parse_full(&mut self, notation: Notation) -> Result<Expr, Error> {
        debug!("parsing {:?} in {:?} notation", self.source, notation);

        if self.tokens.is_empty() {
            return Err(self.error(kind::EmptyInput));
        }

        let expr = self.parse_store(notation)?;
        match self.current_kind() {
            None => {
                debug!("parsed {} nodes", expr.node_count());
                Ok(expr)
            },
            Some(TokenKind::CloseParen) => Err(self.error(kind::UnclosedParenthesis { opening: false })),
            Some(_) => Err(self.error(kind::ExpectedEof)),
        }
    }
}
