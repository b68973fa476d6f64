//! Shared data models for check and write outputs.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single rule violation at a 1-based line/column of the original content.
pub struct Issue {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub rule: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Aggregated check summary used by printers.
pub struct Summary {
    pub files: usize,
    pub issues: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Check results container. `issues` is in report order.
pub struct LintResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Per-file outcome of a write run.
pub struct FormatResult {
    pub file: String,
    /// Issues found before fixing.
    pub issues: usize,
    /// Fixed content was persisted over the original.
    pub wrote: bool,
}
