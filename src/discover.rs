//! Candidate discovery: expand inputs into text files.
//!
//! Inputs may be files or directories. Directories are walked recursively
//! with `glob`; symlinks met during the walk are skipped. Duplicates (by
//! canonical path) keep their first spelling. Every candidate is then
//! classified in the worker pool.

use crate::classify::{classify, Classification, RejectReason};
use crate::error::{Error, Result};
use crate::pool::WorkerPool;
use glob::{glob_with, MatchOptions, Pattern};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Classified candidates.
#[derive(Debug, Default)]
pub struct Discovered {
    /// Text files, in discovery order.
    pub accepted: Vec<PathBuf>,
    /// Readable files that looked binary.
    pub rejected: BTreeMap<PathBuf, RejectReason>,
}

/// True when some directory between `dir` and `path` is a symlink.
fn below_symlink(dir: &Path, path: &Path) -> bool {
    path.ancestors()
        .skip(1)
        .take_while(|a| *a != dir && !a.as_os_str().is_empty())
        .any(|a| fs::symlink_metadata(a).is_ok_and(|m| m.file_type().is_symlink()))
}

/// Regular files below `dir`, in lexicographic order. Symlinked files and
/// anything reached through a symlinked directory are skipped.
fn walk_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = Path::new(&Pattern::escape(&dir.to_string_lossy())).join("**/*");
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let mut files = Vec::new();
    for entry in glob_with(&pattern.to_string_lossy(), options)? {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            Error::io(path, e.into_error())
        })?;
        let meta = fs::symlink_metadata(&path).map_err(|e| Error::io(&path, e))?;
        if meta.file_type().is_file() && !below_symlink(dir, &path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Expand `paths` into de-duplicated candidate files.
///
/// A path that cannot be stat'ed, or a directory that cannot be walked,
/// is an error.
pub fn candidates(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut out = Vec::new();
    for root in paths {
        let meta = fs::metadata(root).map_err(|e| Error::io(root, e))?;
        let found = if meta.is_file() {
            vec![root.clone()]
        } else if meta.is_dir() {
            walk_dir(root)?
        } else {
            Vec::new()
        };
        for path in found {
            let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if seen.insert(key) {
                out.push(path);
            }
        }
    }
    Ok(out)
}

/// Expand and classify `paths`.
pub fn discover(paths: &[PathBuf], pool: &WorkerPool) -> Result<Discovered> {
    let candidates = candidates(paths)?;
    let verdicts = pool.run(&candidates, |path| Ok(classify(path)))?;
    let mut found = Discovered::default();
    for (path, verdict) in candidates.into_iter().zip(verdicts) {
        match verdict {
            Classification::Accepted => found.accepted.push(path),
            Classification::Rejected(reason) => {
                found.rejected.insert(path, reason);
            }
            Classification::Unreadable => debug!("scanner: unreadable {}", path.display()),
        }
    }
    Ok(found)
}
