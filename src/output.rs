//! Output rendering for check and write runs.
//!
//! Supports `compact` (default) and `json` reports on stdout. Compact
//! check output is one `path:line:column: rule: message` line per issue
//! followed by a summary line. Renderers are pure; `print_*` wrappers write
//! them to stdout.

use crate::config::{Mode, ReportFormat};
use crate::lint::RuleSet;
use crate::models::{FormatResult, LintResult, Summary};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write as _};

pub const NO_TEXT_FILES: &str = "No text files found.";

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

/// `error:` prefix for fatal diagnostics on stderr.
pub fn error_prefix() -> String {
    if use_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Compact check report: issues in the order given, then the summary.
pub fn render_lint(res: &LintResult) -> String {
    let mut out = String::new();
    for is in &res.issues {
        let _ = writeln!(
            out,
            "{}:{}:{}: {}: {}",
            is.file, is.line, is.column, is.rule, is.message
        );
    }
    let _ = writeln!(
        out,
        "{} file(s) scanned, {} issue(s).",
        res.summary.files, res.summary.issues
    );
    out
}

/// Compact write report: the sorted list of files that were rewritten.
///
/// Empty when nothing was written.
pub fn render_format(results: &[FormatResult]) -> String {
    let wrote: Vec<&str> = results
        .iter()
        .filter(|r| r.wrote)
        .map(|r| r.file.as_str())
        .collect();
    if wrote.is_empty() {
        return String::new();
    }
    let mut out = format!("Wrote {} file(s):\n", wrote.len());
    for file in wrote {
        out.push_str(file);
        out.push('\n');
    }
    out
}

/// Compact report for a run that found no text files at all.
pub fn render_no_text_files(mode: Mode) -> String {
    let mut out = format!("{NO_TEXT_FILES}\n");
    if mode == Mode::Check {
        out.push_str(&render_lint(&LintResult {
            issues: Vec::new(),
            summary: Summary { files: 0, issues: 0 },
        }));
    }
    out
}

/// `<id>  <description>` per rule, in registration order.
pub fn render_rules(rules: &RuleSet) -> String {
    let mut out = String::new();
    for rule in rules.iter() {
        let _ = writeln!(out, "{}  {}", rule.id(), rule.description());
    }
    out
}

/// Compose check JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    json!({
        "issues": res.issues,
        "summary": res.summary,
    })
}

/// Compose write JSON object (pure) for testing/snapshot purposes.
pub fn compose_format_json(results: &[FormatResult]) -> JsonVal {
    let wrote: Vec<&str> = results
        .iter()
        .filter(|r| r.wrote)
        .map(|r| r.file.as_str())
        .collect();
    json!({
        "wrote": wrote,
        "summary": {
            "files": results.len(),
            "wrote": wrote.len(),
        },
    })
}

/// Write `text` to `out`. A closed reader (`BrokenPipe`) is not an error.
fn write_report<W: io::Write>(out: &mut W, text: &str) -> io::Result<()> {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Print `text` to stdout without panicking when the pipe is closed.
pub fn emit(text: &str) {
    if let Err(e) = write_report(&mut io::stdout().lock(), text) {
        let _ = writeln!(io::stderr(), "{} {}", error_prefix(), e);
    }
}

fn print_json(value: &JsonVal) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => emit(&format!("{s}\n")),
        Err(e) => {
            let _ = writeln!(io::stderr(), "{} {}", error_prefix(), e);
        }
    }
}

/// Print check results in the requested format.
pub fn print_lint(res: &LintResult, format: ReportFormat) {
    match format {
        ReportFormat::Json => print_json(&compose_lint_json(res)),
        ReportFormat::Compact => emit(&render_lint(res)),
    }
}

/// Print write results in the requested format.
pub fn print_format(results: &[FormatResult], format: ReportFormat) {
    match format {
        ReportFormat::Json => print_json(&compose_format_json(results)),
        ReportFormat::Compact => emit(&render_format(results)),
    }
}

/// Print the report for a run with zero text files.
pub fn print_no_text_files(mode: Mode, format: ReportFormat) {
    match (format, mode) {
        (ReportFormat::Json, Mode::Check) => print_lint(
            &LintResult {
                issues: Vec::new(),
                summary: Summary { files: 0, issues: 0 },
            },
            format,
        ),
        (ReportFormat::Json, Mode::Write) => print_format(&[], format),
        (ReportFormat::Compact, _) => emit(&render_no_text_files(mode)),
    }
}
