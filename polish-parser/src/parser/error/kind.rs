use ariadne::Fmt;
use polish_attrs::ErrorKind;
use polish_error::{ErrorKind, EXPR};
use polish_expr::{Arity, OpKind};

/// The source code was empty or contained only whitespace.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty input",
    labels = [format!("add an {} here", "expression".fg(EXPR))],
    expected = "an expression",
)]
pub struct EmptyInput;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "an input holds exactly one expression; wrap several in an operation to combine them",
    expected = "end of input",
)]
pub struct ExpectedEof;

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = if *opening {
        vec!["expected `)` here", "this parenthesis is not closed"]
    } else {
        vec!["this parenthesis is not opened"]
    },
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
    expected = if *opening { "`)`" } else { "end of input" },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    ///
    /// For an opening parenthesis, the error has two spans: where the `)` was expected, then the
    /// `(` itself.
    pub opening: bool,
}

/// An operator token was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected an operator",
    labels = ["I expected to see an operator here"],
    help = if suggestions.is_empty() {
        format!("the operators are: {}", OpKind::ALL.iter().map(|kind| format!("`{}`", kind)).collect::<Vec<_>>().join(", "))
    } else {
        format!("did you mean: {}?", suggestions.iter().map(|s| format!("`{}`", s.fg(EXPR))).collect::<Vec<_>>().join(", "))
    },
    expected = "an operator",
)]
pub struct ExpectedOperator {
    /// Registered operators whose tokens are similar to what was found.
    pub suggestions: Vec<&'static str>,
}

/// An operator was found where an argument of another operator was expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected an argument of `{}`", operator),
    labels = ["this operator cannot be used as an argument on its own"],
    help = format!("wrap it in parentheses with its own arguments to use it as an {}", "expression".fg(EXPR)),
    expected = format!("an argument of `{}`", operator),
)]
pub struct ExpectedArgument {
    /// The operator whose arguments were being parsed.
    pub operator: OpKind,
}

/// An operator was applied to a number of arguments its arity does not accept.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments for `{}`", operator),
    labels = [format!("this operator takes {}, but {} were given", arity, given)],
    expected = format!("{} for `{}`", arity, operator),
)]
pub struct WrongArgCount {
    /// The operator.
    pub operator: OpKind,

    /// The number of arguments the operator accepts.
    pub arity: Arity,

    /// The number of arguments that were given.
    pub given: usize,
}

/// Expected a number, a variable, or some other operand here.
///
/// The `expected` field should also contain the word "a" or "an" at the beginning to make the
/// error grammatically correct.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected {}", expected),
    labels = [format!("I expected to see {} here", expected)],
    help = "the variables are `x`, `y`, and `z`; numbers are integers such as `4` or `-12`",
    expected = expected,
)]
pub struct ExpectedLeaf {
    /// The kind of operand that was expected.
    pub expected: &'static str,
}

/// Operands were left over after the last operator in stack notation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unused operands",
    labels = [format!("{} operand(s) were not consumed by an operator", count)],
    help = "every value must be consumed by an operator, except the final result",
    expected = "an operator",
)]
pub struct UnusedOperands {
    /// The number of operands that were left over, not counting the final result.
    pub count: usize,
}
