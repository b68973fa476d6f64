//! Error types for prosefmt.
//!
//! Rule violations are not errors; they are collected as [`Issue`](crate::models::Issue)s.
//! Everything here is fatal for the current run:
//! - I/O failures while stating, reading, or writing a path
//! - Fixer convergence failures (a rule-set defect)
//! - Invalid configuration or rule registration

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for prosefmt operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading, writing, or stating a path failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be expanded into a traversal pattern.
    #[error("invalid traversal pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// The rule set did not reach a fixed point within the pass limit.
    #[error(
        "{}: fixes did not converge after {passes} pass(es), {remaining} issue(s) remain",
        .path.display()
    )]
    NotConverged {
        path: PathBuf,
        passes: usize,
        remaining: usize,
    },

    /// The worker pool could not be started.
    #[error("worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// Two registered rules share an ID.
    #[error("duplicate rule id: {0}")]
    DuplicateRule(String),

    /// A configuration file exists but cannot be parsed.
    #[error("{}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// The run was cancelled before every file was processed.
    #[error("cancelled before all files were processed")]
    Cancelled,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit status for a run that failed with this error.
    ///
    /// Status 1 is reserved for "check found issues".
    pub fn exit_code(&self) -> u8 {
        2
    }
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
