//! Rule engine and the check runner.
//!
//! `RuleSet` is an immutable, ordered list of rules built once and shared
//! by reference across worker threads. `run_lint` reads each accepted file
//! in the worker pool, scans it, and aggregates issues into report order.

use crate::aggregate::aggregate;
use crate::content::FileContent;
use crate::error::{Error, Result};
use crate::models::{Issue, LintResult, Summary};
use crate::pool::WorkerPool;
use crate::rules::{builtin_rules, Rule};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Registered rules in fixed registration order. IDs are unique.
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// Build a rule set, rejecting duplicate rule IDs.
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id()) {
                return Err(Error::DuplicateRule(rule.id().to_string()));
            }
        }
        Ok(Self { rules })
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Drop rules whose ID is listed. Unknown IDs are logged and ignored.
    pub fn without(mut self, disabled: &[String]) -> Self {
        for id in disabled {
            if !self.rules.iter().any(|r| r.id() == id) {
                warn!("unknown rule id in disable list: {}", id);
            }
        }
        self.rules.retain(|r| !disabled.iter().any(|id| id == r.id()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// True when no rule reports anything for `content`.
    pub fn is_clean(&self, content: FileContent<'_>) -> bool {
        self.rules.iter().all(|rule| rule.check(content).is_empty())
    }

    /// Run every rule's check over the same content.
    ///
    /// Issues are ordered by `(line, column, rule)`; the rule ID only breaks
    /// ties between rules flagging the same position.
    pub fn scan(&self, file: &str, content: FileContent<'_>) -> Vec<Issue> {
        let mut issues: Vec<Issue> = self
            .rules
            .iter()
            .flat_map(|rule| {
                rule.check(content).into_iter().map(move |f| Issue {
                    file: file.to_string(),
                    line: f.line,
                    column: f.column,
                    rule: rule.id().to_string(),
                    message: f.message,
                })
            })
            .collect();
        issues.sort_by(|a, b| {
            a.line
                .cmp(&b.line)
                .then(a.column.cmp(&b.column))
                .then_with(|| a.rule.cmp(&b.rule))
        });
        issues
    }
}

/// Read and scan one file.
pub(crate) fn scan_file(rules: &RuleSet, path: &Path) -> Result<(String, Vec<u8>, Vec<Issue>)> {
    let file = path.display().to_string();
    let data = fs::read(path).map_err(|e| Error::io(path, e))?;
    let issues = rules.scan(&file, FileContent::new(&data));
    if !issues.is_empty() {
        let ids: BTreeSet<&str> = issues.iter().map(|i| i.rule.as_str()).collect();
        debug!(
            "rules: {} -> {} issue(s): {}",
            file,
            issues.len(),
            ids.into_iter().collect::<Vec<_>>().join(", ")
        );
    }
    Ok((file, data, issues))
}

/// Check every file and return issues in report order.
///
/// Any read failure aborts the run.
pub fn run_lint(files: &[PathBuf], rules: &RuleSet, pool: &WorkerPool) -> Result<LintResult> {
    let per_file = pool.run(files, |path| {
        debug!("Checking {}", path.display());
        scan_file(rules, path).map(|(_, _, issues)| issues)
    })?;
    let issues = aggregate(per_file);
    let summary = Summary {
        files: files.len(),
        issues: issues.len(),
    };
    Ok(LintResult { issues, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Finding;
    use std::borrow::Cow;
    use tempfile::tempdir;

    struct Marker(&'static str);

    impl Rule for Marker {
        fn id(&self) -> &'static str {
            self.0
        }
        fn description(&self) -> &'static str {
            "flags 1:1"
        }
        fn check(&self, _content: FileContent<'_>) -> Vec<Finding> {
            vec![Finding {
                line: 1,
                column: 1,
                message: "marker".into(),
            }]
        }
        fn fix<'a>(&self, content: FileContent<'a>) -> Cow<'a, [u8]> {
            Cow::Borrowed(content.bytes())
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = RuleSet::new(vec![Box::new(Marker("X1")), Box::new(Marker("X1"))])
            .err()
            .unwrap();
        assert!(matches!(err, Error::DuplicateRule(id) if id == "X1"));
    }

    #[test]
    fn test_scan_ties_broken_by_rule_id() {
        let rules = RuleSet::new(vec![Box::new(Marker("ZZ")), Box::new(Marker("AA"))]).unwrap();
        let issues = rules.scan("f", FileContent::new(b"x"));
        let ids: Vec<_> = issues.iter().map(|i| i.rule.as_str()).collect();
        assert_eq!(ids, vec!["AA", "ZZ"]);
    }

    #[test]
    fn test_scan_trailing_space_scenario() {
        let issues = RuleSet::builtin().scan("bad.txt", FileContent::new(b"x  \n"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, "TL010");
        assert_eq!((issues[0].line, issues[0].column), (1, 2));
        assert_eq!(issues[0].file, "bad.txt");
    }

    #[test]
    fn test_scan_orders_by_position_across_rules() {
        let issues = RuleSet::builtin().scan("f", FileContent::new(b"a \nb\n\n"));
        let keys: Vec<_> = issues
            .iter()
            .map(|i| (i.line, i.column, i.rule.as_str()))
            .collect();
        assert_eq!(keys, vec![(1, 2, "TL010"), (3, 1, "TL001")]);
    }

    #[test]
    fn test_without_drops_rules() {
        let rules = RuleSet::builtin().without(&["TL010".to_string(), "NOPE".to_string()]);
        let ids: Vec<_> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["TL001"]);
        assert!(rules.scan("f", FileContent::new(b"x  \n")).is_empty());
    }

    #[test]
    fn test_run_lint_counts_every_file() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "x  \n").unwrap();
        fs::write(&b, "").unwrap();
        let pool = WorkerPool::new(2).unwrap();
        let res = run_lint(&[b.clone(), a.clone()], &RuleSet::builtin(), &pool).unwrap();
        assert_eq!(res.summary, Summary { files: 2, issues: 1 });
        assert_eq!(res.issues[0].file, a.display().to_string());
    }

    #[test]
    fn test_run_lint_read_failure_is_fatal() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("gone.txt");
        let pool = WorkerPool::new(1).unwrap();
        let err = run_lint(&[gone], &RuleSet::builtin(), &pool).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
