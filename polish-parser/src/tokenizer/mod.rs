pub mod token;

use log::trace;
use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack and look ahead while parsing.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(Ok(kind)) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    trace!("tokenized {} bytes into {} tokens", input.len(), tokens.len());
    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn prefix_expr() {
        compare_tokens(
            "(+ x -12)",
            [
                (TokenKind::OpenParen, "("),
                (TokenKind::Symbol, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "-"),
                (TokenKind::Int, "12"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn postfix_expr() {
        compare_tokens(
            "(x\t(y z sumexp)\n softmax)",
            [
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, "\t"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "y"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "z"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "sumexp"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Whitespace, "\n "),
                (TokenKind::Name, "softmax"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn unknown_symbols() {
        compare_tokens(
            "2x$ ^",
            [
                (TokenKind::Int, "2"),
                (TokenKind::Name, "x"),
                (TokenKind::Symbol, "$"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "^"),
            ],
        );
    }

    #[test]
    fn unicode_whitespace() {
        compare_tokens(
            "(+ x\u{000C}y\u{00A0}\u{000B}1)",
            [
                (TokenKind::OpenParen, "("),
                (TokenKind::Symbol, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, "\u{000C}"),
                (TokenKind::Name, "y"),
                (TokenKind::Whitespace, "\u{00A0}\u{000B}"),
                (TokenKind::Int, "1"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn complete() {
        let tokens = tokenize_complete("(ln x)");
        let spans = tokens.iter().map(|token| token.span.clone()).collect::<Vec<_>>();
        assert_eq!(spans, [0..1, 1..3, 3..4, 4..5, 5..6]);
        assert!(tokens[2].is_whitespace());
        assert!(tokens[4].is_adjacent_to(&tokens[3]));
        assert!(!tokens[3].is_adjacent_to(&tokens[1]));
    }
}
