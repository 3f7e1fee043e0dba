//! lockcheck CLI
//!
//! Runs every thread ordering of a scenario and prints the narrated log.
//!
//! # Example
//!
//! ```bash
//! # Run the built-in two-thread scenario
//! lockcheck
//!
//! # Run a scenario file, capped at 100 orderings, with a summary line
//! lockcheck scenario.toml --max-permutations 100 --summary
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lockcheck::{ConfigError, Explorer, Scenario};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exhaustive thread-ordering explorer
///
/// Each thread runs to completion in turn; the lock ledger is shared across
/// every ordering and checked for ownership cycles after every action.
#[derive(Parser, Debug)]
#[command(name = "lockcheck")]
#[command(version, about, long_about = None)]
struct Args {
    /// Scenario file (TOML). Runs the built-in two-thread scenario if omitted.
    scenario: Option<PathBuf>,

    /// Stop after this many orderings (overrides the scenario file)
    #[arg(long)]
    max_permutations: Option<u64>,

    /// Print a one-line summary after the log
    #[arg(long)]
    summary: bool,

    /// Print the effective scenario as TOML and exit
    #[arg(long)]
    dump_scenario: bool,
}

fn load(args: &Args) -> Result<Scenario, ConfigError> {
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::canonical(),
    };
    scenario.override_max_permutations(args.max_permutations);
    Ok(scenario)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,lockcheck=info")),
        )
        .init();

    let args = Args::parse();

    let scenario = match load(&args) {
        Ok(scenario) => scenario,
        Err(e) => {
            error!(error = %e, "failed to load scenario");
            eprintln!("lockcheck: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.dump_scenario {
        return match scenario.to_toml() {
            Ok(text) => {
                print!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("lockcheck: {e}");
                ExitCode::FAILURE
            }
        };
    }

    info!(
        source = %args.scenario.as_deref().map_or("<built-in>".into(), |p| p.display().to_string()),
        threads = scenario.threads.len(),
        "loaded scenario"
    );

    let result = Explorer::new()
        .with_max_permutations(scenario.explore.max_permutations)
        .run(scenario.threads());

    for line in result.log.iter() {
        println!("{line}");
    }

    if args.summary {
        println!(
            "explored {} permutation(s), {} deadlock report(s), {} lock(s) still held",
            result.permutations_explored,
            result.deadlocks.len(),
            result.held_at_end.len()
        );
    }

    ExitCode::SUCCESS
}
