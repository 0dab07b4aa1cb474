pub mod kind;

use ariadne::Report;
use polish_error::{render_report, ErrorKind};
use std::{fmt, ops::Range};

/// What the parser found at the position of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    /// The text of the offending token.
    Text(String),

    /// The input ended.
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "`{}`", text),
            Self::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A general parsing error.
///
/// Spans are measured in characters, not bytes, so the first span's start is the 0-based
/// character offset of the failure.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from. The first span is where
    /// parsing failed.
    pub spans: Vec<Range<usize>>,

    /// What was found where parsing failed.
    pub found: Found,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, found: Found, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, found, kind: Box::new(kind) }
    }

    /// The 0-based character offset at which parsing failed.
    pub fn position(&self) -> usize {
        self.spans.first().map_or(0, |span| span.start)
    }

    /// A short description of what the parser expected to find.
    pub fn expected(&self) -> String {
        self.kind.expected()
    }

    /// What the parser found instead.
    pub fn found(&self) -> &Found {
        &self.found
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders this error as a report annotating the given source code, with markers pointing at
    /// each span. The output contains ANSI color codes.
    pub fn render(&self, source: &str) -> String {
        render_report(&self.build_report("input"), "input", source)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "at position {}: expected {}, found {}",
            self.position(),
            self.expected(),
            self.found,
        )
    }
}

impl std::error::Error for Error {}
