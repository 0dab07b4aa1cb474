//! The fixed set of operations that can appear in an expression tree, and the registry that maps
//! operator tokens to them.
//!
//! Every operation is described by an [`OpKind`]. The kind knows its token text, its
//! [`Arity`], and how to evaluate itself on numeric operands. The rules for differentiating and
//! simplifying each kind live in [`crate::derivative`] and [`crate::simplify`], as `match` arms
//! over [`OpKind`].
//!
//! The [`Registry`] is the read-only lookup table used by the parser to recognize operator
//! tokens. [`Registry::standard`] returns the registry containing every [`OpKind`], built once on
//! first use.

use levenshtein::levenshtein;
use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of operands an operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Arity {
    /// Exactly this many operands.
    Fixed(usize),

    /// One or more operands, with no upper bound.
    Variadic,
}

impl Arity {
    /// Returns true if an operation with this arity can be applied to `count` operands.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Fixed(n) => count == n,
            Self::Variadic => count >= 1,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(1) => write!(f, "exactly 1 argument"),
            Self::Fixed(n) => write!(f, "exactly {} arguments", n),
            Self::Variadic => write!(f, "at least 1 argument"),
        }
    }
}

/// The kind of an operation node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpKind {
    /// `a + b`
    Add,

    /// `a - b`
    Sub,

    /// `a * b`
    Mul,

    /// `a / b`
    Div,

    /// `-a`
    Negate,

    /// `a` raised to the power of `b`.
    Pow,

    /// Logarithm of `b` in base `a`, computed as `ln|b| / ln|a|`.
    Log,

    /// Natural logarithm of `|a|`.
    Ln,

    /// Hyperbolic sine.
    Sinh,

    /// Hyperbolic cosine.
    Cosh,

    /// Sum of `e^a` over every operand.
    SumExp,

    /// `e^a0` divided by the sum of `e^a` over every operand.
    Softmax,
}

impl OpKind {
    /// Every operation kind, in registration order.
    pub const ALL: [OpKind; 12] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Negate,
        Self::Pow,
        Self::Log,
        Self::Ln,
        Self::Sinh,
        Self::Cosh,
        Self::SumExp,
        Self::Softmax,
    ];

    /// Returns the token used to write this operation in source text.
    pub fn token(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Negate => "negate",
            Self::Pow => "pow",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::SumExp => "sumexp",
            Self::Softmax => "softmax",
        }
    }

    /// Returns the number of operands this operation requires.
    pub fn arity(self) -> Arity {
        match self {
            Self::Negate | Self::Ln | Self::Sinh | Self::Cosh => Arity::Fixed(1),
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Pow | Self::Log => Arity::Fixed(2),
            Self::SumExp | Self::Softmax => Arity::Variadic,
        }
    }

    /// Applies this operation to already-evaluated operands.
    ///
    /// IEEE-754 semantics apply: division by zero, the logarithm of zero, and similar cases
    /// produce infinities or `NaN` rather than errors.
    ///
    /// # Panics
    ///
    /// Panics if the number of operands is not accepted by [`OpKind::arity`]. Operation nodes
    /// uphold this invariant on construction.
    pub fn eval(self, args: &[f64]) -> f64 {
        match (self, args) {
            (Self::Add, [a, b]) => a + b,
            (Self::Sub, [a, b]) => a - b,
            (Self::Mul, [a, b]) => a * b,
            (Self::Div, [a, b]) => a / b,
            (Self::Negate, [a]) => -a,
            (Self::Pow, [a, b]) => a.powf(*b),
            (Self::Log, [a, b]) => b.abs().ln() / a.abs().ln(),
            (Self::Ln, [a]) => a.abs().ln(),
            (Self::Sinh, [a]) => a.sinh(),
            (Self::Cosh, [a]) => a.cosh(),
            (Self::SumExp, args) if !args.is_empty() => sum_exp(args),
            (Self::Softmax, [first, ..]) => first.exp() / sum_exp(args),
            _ => unreachable!("`{}` applied to {} operand(s)", self.token(), args.len()),
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// `e^a0 + e^a1 + ...`
fn sum_exp(args: &[f64]) -> f64 {
    args.iter().map(|a| a.exp()).sum()
}

/// Returns true if `c` would continue an identifier or number, so that a token ending right before
/// it does not end on a token boundary.
fn continues_word(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// The standard registry, containing every [`OpKind`].
static STANDARD: Lazy<Registry> = Lazy::new(Registry::default);

/// A read-only table mapping operator tokens to operation kinds.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Lookup from exact token text.
    ops: HashMap<&'static str, OpKind>,

    /// Every registered token, longest first.
    tokens: Vec<&'static str>,
}

impl Registry {
    /// Creates a registry containing the given operation kinds.
    pub fn new(kinds: impl IntoIterator<Item = OpKind>) -> Self {
        let ops = kinds
            .into_iter()
            .map(|kind| (kind.token(), kind))
            .collect::<HashMap<_, _>>();
        let mut tokens = ops.keys().copied().collect::<Vec<_>>();

        // longest first, ties broken alphabetically so the order is deterministic
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Self { ops, tokens }
    }

    /// Returns the registry containing every [`OpKind`].
    pub fn standard() -> &'static Registry {
        &STANDARD
    }

    /// Returns the operation registered under exactly this token.
    pub fn get(&self, token: &str) -> Option<OpKind> {
        self.ops.get(token).copied()
    }

    /// Returns every registered token, longest first.
    pub fn tokens(&self) -> &[&'static str] {
        &self.tokens
    }

    /// Matches an operator token at the start of `input`.
    ///
    /// The longest registered token that is a prefix of `input` **and** ends on a token boundary
    /// wins. A token ends on a boundary if it is at the end of `input` or is not immediately
    /// followed by an ASCII letter or digit, so `-` does not match in `-5` and `ln` does not match
    /// in `lnx`.
    ///
    /// Returns the operation kind and the length of the matched token in bytes.
    pub fn match_at(&self, input: &str) -> Option<(OpKind, usize)> {
        self.tokens
            .iter()
            .find(|token| {
                input.starts_with(*token)
                    && !input[token.len()..].chars().next().is_some_and(continues_word)
            })
            .map(|token| (self.ops[token], token.len()))
    }

    /// Returns the registered tokens that are similar to the given word, for suggestions in error
    /// messages. A token is similar if it is one edit away from the word.
    pub fn similar(&self, word: &str) -> Vec<&'static str> {
        self.tokens
            .iter()
            .copied()
            .filter(|token| token.len() > 1 && levenshtein(token, word) < 2)
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(OpKind::ALL)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use super::*;

    #[test]
    fn every_kind_is_registered() {
        let registry = Registry::standard();
        for kind in OpKind::ALL {
            assert_eq!(registry.get(kind.token()), Some(kind));
        }
        assert_eq!(registry.get("exp"), None);
    }

    #[test]
    fn arity_table() {
        assert_eq!(OpKind::Add.arity(), Arity::Fixed(2));
        assert_eq!(OpKind::Negate.arity(), Arity::Fixed(1));
        assert_eq!(OpKind::SumExp.arity(), Arity::Variadic);
        assert!(Arity::Variadic.accepts(3));
        assert!(!Arity::Variadic.accepts(0));
        assert!(!Arity::Fixed(2).accepts(1));
    }

    #[test]
    fn eval_table() {
        assert_eq!(OpKind::Sub.eval(&[7.0, 2.0]), 5.0);
        assert_eq!(OpKind::Div.eval(&[1.0, 0.0]), f64::INFINITY);
        assert_eq!(OpKind::Pow.eval(&[2.0, 10.0]), 1024.0);
        assert_float_relative_eq!(OpKind::Log.eval(&[2.0, -8.0]), 3.0);
        assert_eq!(OpKind::Ln.eval(&[-1.0]), 0.0);
        assert_eq!(OpKind::SumExp.eval(&[0.0, 0.0, 0.0]), 3.0);
        assert_eq!(OpKind::Softmax.eval(&[0.0, 0.0]), 0.5);
        assert!(OpKind::Ln.eval(&[0.0]).is_infinite());
    }

    #[test]
    fn match_respects_boundary() {
        let registry = Registry::standard();
        assert_eq!(registry.match_at("+ x y)"), Some((OpKind::Add, 1)));
        assert_eq!(registry.match_at("-)"), Some((OpKind::Sub, 1)));
        assert_eq!(registry.match_at("-5"), None);
        assert_eq!(registry.match_at("negate x"), Some((OpKind::Negate, 6)));
        assert_eq!(registry.match_at("negatex"), None);
        assert_eq!(registry.match_at("ln2"), None);
        assert_eq!(registry.match_at("sumexp"), Some((OpKind::SumExp, 6)));
        assert_eq!(registry.match_at("x"), None);
    }

    #[test]
    fn tokens_sorted_longest_first() {
        // matching tries tokens in this order, so a longer token would win over its own prefix
        let registry = Registry::new([OpKind::Sinh, OpKind::Ln, OpKind::Log]);
        assert_eq!(registry.tokens(), &["sinh", "log", "ln"]);
        assert_eq!(registry.match_at("sinh(x)"), Some((OpKind::Sinh, 4)));
        assert_eq!(registry.match_at("sin x"), None);
    }

    #[test]
    fn similar_tokens() {
        let registry = Registry::standard();
        assert_eq!(registry.similar("sinn"), vec!["sinh"]);
        assert!(registry.similar("softmx").contains(&"softmax"));
        assert!(registry.similar("qqqqqqqq").is_empty());

        // single characters are not close to any word operator
        assert!(registry.similar("x").is_empty());
        assert!(registry.similar(")").is_empty());
        assert!(registry.similar("lg").contains(&"log"));
    }
}
