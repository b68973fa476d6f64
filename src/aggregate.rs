//! Cross-file issue ordering.
//!
//! Report order is `(file, rule, line, column)` ascending, with the message
//! as a final tie-break so that the order is total and independent of the
//! order in which files were discovered or finished.

use crate::models::Issue;
use std::cmp::Ordering;

fn report_order(a: &Issue, b: &Issue) -> Ordering {
    a.file
        .cmp(&b.file)
        .then_with(|| a.rule.cmp(&b.rule))
        .then_with(|| a.line.cmp(&b.line))
        .then_with(|| a.column.cmp(&b.column))
        .then_with(|| a.message.cmp(&b.message))
}

/// Merge per-file issue lists into one report-ordered list.
pub fn aggregate<I>(per_file: I) -> Vec<Issue>
where
    I: IntoIterator<Item = Vec<Issue>>,
{
    let mut all: Vec<Issue> = per_file.into_iter().flatten().collect();
    all.sort_by(report_order);
    all
}
