//! CLI argument parsing via `clap`.

use crate::config::{Mode, Overrides, ReportFormat, Verbosity};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "prosefmt",
    version,
    about = "The simplest text formatter for making your files look correct.",
    long_about = "prosefmt checks text files for trailing whitespace and final-newline defects, or fixes them in place.\n\nBinary files are skipped. Configuration precedence: CLI > prosefmt.toml > defaults.",
    after_help = "Examples:\n  prosefmt docs/ README.md\n  prosefmt --write .\n  prosefmt --verbose --format json notes.txt",
    arg_required_else_help = true,
    args_conflicts_with_subcommands = true
)]
#[command(group(ArgGroup::new("mode").args(["check", "write"])))]
#[command(group(ArgGroup::new("output").args(["silent", "compact", "verbose"])))]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    #[arg(long, help = "Check files and report issues (default)")]
    pub check: bool,
    #[arg(long, help = "Write fixes in place")]
    pub write: bool,

    #[arg(long, help = "No standard output printed")]
    pub silent: bool,
    #[arg(long, help = "Show issues and the summary (default)")]
    pub compact: bool,
    #[arg(long, help = "Print debug output (steps, scanner, rules, timing) to stderr")]
    pub verbose: bool,

    #[arg(long, value_enum, help = "Report format: compact|json (default: compact)")]
    pub format: Option<ReportFormat>,
    #[arg(long, help = "Worker threads (default: one per CPU)")]
    pub jobs: Option<usize>,
    #[arg(long, help = "Directory to start config discovery from (default: current dir)")]
    pub root: Option<PathBuf>,

    #[arg(help = "Files or directories to process")]
    pub paths: Vec<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
/// Informational subcommands.
pub enum Commands {
    /// Print the version number
    Version,
    /// List registered rules
    Rules,
}

impl Cli {
    pub fn mode(&self) -> Option<Mode> {
        if self.write {
            Some(Mode::Write)
        } else if self.check {
            Some(Mode::Check)
        } else {
            None
        }
    }

    pub fn verbosity(&self) -> Option<Verbosity> {
        if self.silent {
            Some(Verbosity::Silent)
        } else if self.verbose {
            Some(Verbosity::Verbose)
        } else if self.compact {
            Some(Verbosity::Compact)
        } else {
            None
        }
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            root: self.root.clone(),
            mode: self.mode(),
            output: self.verbosity(),
            format: self.format,
            jobs: self.jobs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("prosefmt").chain(args.iter().copied()))
    }

    #[test]
    fn test_paths_and_defaults() {
        let cli = parse(&["a.txt", "docs"]).unwrap();
        assert_eq!(cli.paths, vec![PathBuf::from("a.txt"), PathBuf::from("docs")]);
        assert_eq!(cli.mode(), None);
        assert_eq!(cli.verbosity(), None);
        assert!(cli.cmd.is_none());
    }

    #[test]
    fn test_write_and_verbose() {
        let cli = parse(&["--write", "--verbose", "--format", "json", "x"]).unwrap();
        assert_eq!(cli.mode(), Some(Mode::Write));
        assert_eq!(cli.verbosity(), Some(Verbosity::Verbose));
        assert_eq!(cli.format, Some(ReportFormat::Json));
    }

    #[test]
    fn test_check_and_write_conflict() {
        assert!(parse(&["--check", "--write", "x"]).is_err());
        assert!(parse(&["--silent", "--verbose", "x"]).is_err());
    }

    #[test]
    fn test_subcommands() {
        assert_eq!(parse(&["version"]).unwrap().cmd, Some(Commands::Version));
        assert_eq!(parse(&["rules"]).unwrap().cmd, Some(Commands::Rules));
    }
}
