use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
///
/// Operators are not tokens of their own. Operator text such as `+` or `softmax` is lexed as
/// [`TokenKind::Symbol`] or [`TokenKind::Name`], and the parser matches it against the operator
/// registry, so that the set of operators is not baked into the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"\s+")]
    Whitespace,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[a-zA-Z]+")]
    Name,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token kind represents whitespace.
    pub fn is_whitespace(self) -> bool {
        self == TokenKind::Whitespace
    }

    /// Returns true if a token of this kind continues a word, meaning that a number, variable, or
    /// operator immediately before it does not end on a token boundary.
    pub fn continues_word(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Name)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from, in bytes.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }

    /// Returns true if this token starts exactly where the given token ends, with no whitespace
    /// in between.
    pub fn is_adjacent_to(&self, previous: &Token) -> bool {
        previous.span.end == self.span.start
    }
}
