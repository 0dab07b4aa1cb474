//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

// lets `#[derive(ErrorKind)]` resolve `polish_error::` paths in this crate's own tests
#[cfg(test)]
extern crate self as polish_error;

use ariadne::{Color, Report, Source};
use std::{fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;

    /// A short description of what was expected at the location of the error, such as
    /// `"an operator"`.
    fn expected(&self) -> String {
        String::from("a valid expression")
    }
}

/// Writes the given report into a [`String`], annotating the given source code.
///
/// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so the report
/// is written into a byte buffer first. The output contains ANSI color codes.
pub fn render_report<'a>(
    report: &Report<(&'a str, Range<usize>)>,
    src_id: &'a str,
    source: &str,
) -> String {
    let mut buf = Vec::new();

    // writing into a `Vec` never fails
    let _ = report.write((src_id, Source::from(source)), &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
