//! Fixer: drive content to a fixed point and persist it.
//!
//! Each pass applies every rule's `fix` in registration order, feeding the
//! output of one rule into the next, then re-scans. Rules are only
//! idempotent in isolation, so one pass is not enough in general; the loop
//! stops as soon as a scan comes back empty, or fails after
//! [`MAX_PASSES`]. A failure means the rule set is not confluent and is
//! surfaced as an error instead of writing a file that still has issues.
//!
//! Persisted files are replaced atomically: the new bytes go to a temp file
//! in the same directory which is then renamed over the original.

use crate::content::FileContent;
use crate::error::{Error, Result};
use crate::lint::{scan_file, RuleSet};
use crate::models::FormatResult;
use crate::pool::WorkerPool;
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Pass limit for [`Fixer::resolve`].
pub const MAX_PASSES: usize = 5;

/// The rule set has no fixed point reachable within the pass limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no fixed point after {passes} pass(es), {remaining} issue(s) remain")]
pub struct NotConverged {
    pub passes: usize,
    pub remaining: usize,
}

pub struct Fixer<'r> {
    rules: &'r RuleSet,
    max_passes: usize,
}

impl<'r> Fixer<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self {
            rules,
            max_passes: MAX_PASSES,
        }
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Return content with no issues under this rule set.
    ///
    /// Clean input is returned borrowed and untouched.
    pub fn resolve<'a>(
        &self,
        content: &'a [u8],
    ) -> std::result::Result<Cow<'a, [u8]>, NotConverged> {
        if self.rules.is_clean(FileContent::new(content)) {
            return Ok(Cow::Borrowed(content));
        }
        let mut current = content.to_vec();
        for pass in 1..=self.max_passes {
            current = self.apply(current);
            if self.rules.is_clean(FileContent::new(&current)) {
                debug!("fixed point reached after {} pass(es)", pass);
                return Ok(Cow::Owned(current));
            }
        }
        Err(NotConverged {
            passes: self.max_passes,
            remaining: self.rules.scan("", FileContent::new(&current)).len(),
        })
    }

    /// One pass: every rule's fix, in order.
    fn apply(&self, mut buf: Vec<u8>) -> Vec<u8> {
        for rule in self.rules.iter() {
            let fixed = match rule.fix(FileContent::new(&buf)) {
                Cow::Borrowed(_) => None,
                Cow::Owned(v) => Some(v),
            };
            if let Some(v) = fixed {
                buf = v;
            }
        }
        buf
    }
}

/// Replace `path`'s content with `bytes` so that no partial file is ever
/// visible. The original permissions are kept.
///
/// Symlinks are resolved first: the file they point to is rewritten and the
/// link itself is left in place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let target = fs::canonicalize(path).map_err(|e| Error::io(path, e))?;
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(path, e))?;
    tmp.write_all(bytes).map_err(|e| Error::io(path, e))?;
    tmp.flush().map_err(|e| Error::io(path, e))?;
    let perms = fs::metadata(&target)
        .map_err(|e| Error::io(path, e))?
        .permissions();
    fs::set_permissions(tmp.path(), perms).map_err(|e| Error::io(path, e))?;
    tmp.persist(&target).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// Fix every file that has issues and write it back.
///
/// Results are sorted by file. Read/write failures and convergence
/// failures abort the run.
pub fn run_format(
    files: &[PathBuf],
    rules: &RuleSet,
    pool: &WorkerPool,
) -> Result<Vec<FormatResult>> {
    let fixer = Fixer::new(rules);
    let mut results = pool.run(files, |path| {
        debug!("Writing {}", path.display());
        let (file, data, issues) = scan_file(rules, path)?;
        if issues.is_empty() {
            return Ok(FormatResult {
                file,
                issues: 0,
                wrote: false,
            });
        }
        let fixed = fixer.resolve(&data).map_err(|e| Error::NotConverged {
            path: path.clone(),
            passes: e.passes,
            remaining: e.remaining,
        })?;
        write_atomic(path, &fixed)?;
        debug!("write: applied to {}", file);
        Ok(FormatResult {
            file,
            issues: issues.len(),
            wrote: true,
        })
    })?;
    results.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(results)
}
