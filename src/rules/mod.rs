//! Rule contract and the built-in rule catalog.
//!
//! A rule is a stateless check/fix pair over [`FileContent`]. Both halves
//! are total over arbitrary bytes, and `fix` must be idempotent on its own:
//! `fix(fix(c)) == fix(c)`.

use crate::content::FileContent;
use std::borrow::Cow;

mod final_newline;
mod trailing_whitespace;

pub use final_newline::FinalNewline;
pub use trailing_whitespace::TrailingWhitespace;

/// A rule violation positioned in the content it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

pub trait Rule: Send + Sync {
    /// Short stable code, unique within a rule set.
    fn id(&self) -> &'static str;

    /// One-line description for rule listings.
    fn description(&self) -> &'static str;

    /// Findings in ascending `(line, column)` order.
    fn check(&self, content: FileContent<'_>) -> Vec<Finding>;

    /// Corrected content. Borrows the input when nothing changes.
    fn fix<'a>(&self, content: FileContent<'a>) -> Cow<'a, [u8]>;
}

/// Built-in rules in registration order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(TrailingWhitespace), Box::new(FinalNewline)]
}
