//! prosefmt CLI binary entry point.
//! Resolves configuration, discovers text files, and runs check or write.

use anyhow::Context;
use clap::Parser;
use prosefmt::cli::{Cli, Commands};
use prosefmt::config::{self, Effective, Mode, Verbosity};
use prosefmt::discover::{discover, Discovered};
use prosefmt::lint::{run_lint, RuleSet};
use prosefmt::output;
use prosefmt::pool::WorkerPool;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// How a run that did not fail ended.
enum Outcome {
    Clean,
    IssuesFound,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match real_main(cli) {
        Ok(Outcome::Clean) => ExitCode::SUCCESS,
        Ok(Outcome::IssuesFound) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {:#}", output::error_prefix(), e);
            let code = e
                .downcast_ref::<prosefmt::Error>()
                .map(|e| e.exit_code())
                .unwrap_or(2);
            ExitCode::from(code)
        }
    }
}

fn init_tracing(output: Verbosity) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(match output {
            Verbosity::Silent => "off",
            Verbosity::Compact => "prosefmt=warn",
            Verbosity::Verbose => "prosefmt=debug",
        })
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .with_level(false)
        .init();
}

fn real_main(cli: Cli) -> anyhow::Result<Outcome> {
    match &cli.cmd {
        Some(Commands::Version) => {
            output::emit(concat!(env!("CARGO_PKG_VERSION"), "\n"));
            return Ok(Outcome::Clean);
        }
        Some(Commands::Rules) => {
            output::emit(&output::render_rules(&RuleSet::builtin()));
            return Ok(Outcome::Clean);
        }
        None => {}
    }

    let eff = config::resolve_effective(&cli.overrides()).context("load configuration")?;
    init_tracing(eff.output);
    if cli.paths.is_empty() {
        anyhow::bail!("no paths given");
    }
    run(&eff, &cli.paths)
}

fn log_discovery(found: &Discovered) {
    if found.accepted.is_empty() {
        debug!(
            "No text files found. Scanned 0 text file(s), skipped {} path(s).",
            found.rejected.len()
        );
    } else {
        debug!(
            "Scanned {} text file(s), skipped {} path(s).",
            found.accepted.len(),
            found.rejected.len()
        );
    }
    for (path, reason) in &found.rejected {
        debug!("scanner: rejected {} (reason: {})", path.display(), reason);
    }
    for path in &found.accepted {
        debug!("scanner: accepted {}", path.display());
    }
}

fn run(eff: &Effective, paths: &[std::path::PathBuf]) -> anyhow::Result<Outcome> {
    let started = Instant::now();
    let mode = match eff.mode {
        Mode::Check => "check",
        Mode::Write => "write",
    };
    debug!(
        "Configuration: mode={} paths={}",
        mode,
        paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if let Some(source) = &eff.source {
        debug!("config: {}", source.display());
    }

    let rules = RuleSet::builtin().without(&eff.disabled_rules);
    if rules.is_empty() {
        warn!("every rule is disabled; no issues will be reported");
    }
    let pool = WorkerPool::new(eff.jobs)?;
    let found = discover(paths, &pool)?;
    log_discovery(&found);

    let quiet = eff.output == Verbosity::Silent;
    let outcome = if found.accepted.is_empty() {
        if !quiet {
            output::print_no_text_files(eff.mode, eff.format);
        }
        Outcome::Clean
    } else {
        match eff.mode {
            Mode::Check => {
                let res = run_lint(&found.accepted, &rules, &pool)?;
                if !quiet {
                    output::print_lint(&res, eff.format);
                }
                if res.summary.issues > 0 {
                    Outcome::IssuesFound
                } else {
                    Outcome::Clean
                }
            }
            Mode::Write => {
                let results = prosefmt::format::run_format(&found.accepted, &rules, &pool)?;
                if !quiet {
                    output::print_format(&results, eff.format);
                }
                Outcome::Clean
            }
        }
    };
    debug!("Completed in {}ms", started.elapsed().as_millis());
    Ok(outcome)
}
