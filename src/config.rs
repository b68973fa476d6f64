//! Configuration discovery and effective settings resolution.
//!
//! prosefmt reads `prosefmt.toml|yaml|yml` from the closest directory at or
//! above the start directory, stopping at a `.git` boundary, and merges it
//! with CLI flags into an `Effective` config.
//! Defaults:
//! - `mode`: `check`
//! - `output`: `compact`
//! - `format`: `compact`
//! - `jobs`: 0 (one worker per CPU)
//! - `rules.disable`: empty
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILES: [&str; 3] = ["prosefmt.toml", "prosefmt.yaml", "prosefmt.yml"];

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// What a run does with the issues it finds.
pub enum Mode {
    #[default]
    Check,
    Write,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
/// How much is printed. Ordered from quietest to loudest.
pub enum Verbosity {
    Silent,
    #[default]
    Compact,
    Verbose,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
/// Report encoding on stdout.
pub enum ReportFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Rule selection under `[rules]`.
pub struct RulesCfg {
    #[serde(default)]
    pub disable: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `prosefmt.toml|yaml`.
pub struct ProsefmtConfig {
    pub mode: Option<Mode>,
    pub output: Option<Verbosity>,
    pub format: Option<ReportFormat>,
    pub jobs: Option<usize>,
    #[serde(default)]
    pub rules: Option<RulesCfg>,
}

/// CLI-provided values; `None` defers to the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub mode: Option<Mode>,
    pub output: Option<Verbosity>,
    pub format: Option<ReportFormat>,
    pub jobs: Option<usize>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the run after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    /// Config file that was loaded, if any.
    pub source: Option<PathBuf>,
    pub mode: Mode,
    pub output: Verbosity,
    pub format: ReportFormat,
    pub jobs: usize,
    pub disabled_rules: Vec<String>,
}

/// Walk upward from `start` to the directory that owns configuration.
///
/// Stops when a `prosefmt.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let start = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    let mut cur = start.as_path();
    loop {
        if CONFIG_FILES.iter().any(|name| cur.join(name).is_file()) || cur.join(".git").exists()
        {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start,
        }
    }
}

/// Load the config file in `root`, if there is one. TOML wins over YAML.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, ProsefmtConfig)>> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.is_file() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<ProsefmtConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<ProsefmtConfig>(&s).map_err(|e| e.to_string())
        };
        return match parsed {
            Ok(cfg) => Ok(Some((path, cfg))),
            Err(message) => Err(Error::Config { path, message }),
        };
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Result<Effective> {
    let start = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let root = detect_root(&start);
    let (source, cfg) = match load_config(&root)? {
        Some((path, cfg)) => (Some(path), cfg),
        None => (None, ProsefmtConfig::default()),
    };
    Ok(Effective {
        mode: cli.mode.or(cfg.mode).unwrap_or_default(),
        output: cli.output.or(cfg.output).unwrap_or_default(),
        format: cli.format.or(cfg.format).unwrap_or_default(),
        jobs: cli.jobs.or(cfg.jobs).unwrap_or(0),
        disabled_rules: cfg.rules.map(|r| r.disable).unwrap_or_default(),
        root,
        source,
    })
}
