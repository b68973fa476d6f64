//! prosefmt core library.
//!
//! This crate exposes programmatic APIs for checking and fixing plain-text
//! hygiene defects: trailing whitespace on lines and a missing or repeated
//! final newline. Binary files are detected and skipped.
//!
//! High-level modules:
//! - `classify`: Text/binary classification of a file's leading bytes.
//! - `content`: Byte-exact line view shared by every rule.
//! - `rules`: The `Rule` trait and the built-in rules.
//! - `lint`: `RuleSet` and the check runner.
//! - `format`: Fixed-point fixer and atomic write-back.
//! - `discover`: Input expansion, de-duplication, and classification.
//! - `aggregate`: Deterministic report ordering.
//! - `pool`: Bounded worker pool with cooperative cancellation.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `models`: Report data structs.
//! - `output`: Compact/JSON printers.
pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod config;
pub mod content;
pub mod discover;
pub mod error;
pub mod format;
pub mod lint;
pub mod models;
pub mod output;
pub mod pool;
pub mod rules;

pub use error::{Error, Result};
