//! Command-line driver: load a topology, run the simulation to quiescence,
//! write the event log, then replay it against a freshly loaded network.
//!
//! ```text
//! usage: transit-sim <config.json> [log.json]
//! ```
//!
//! Exit codes: 0 on success, 1 on a verification or liveness failure, 2 on
//! usage or configuration errors.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use transit_event::write_log_file;
use transit_sim::{load_network, Sim, SimError};
use transit_verify::verify;

/// Liveness bound: a topology whose passengers cannot all finish within
/// this window is reported as stalled instead of hanging the process.
const DEADLINE: Duration = Duration::from_secs(60);

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let (Some(config), log_path) = (args.next(), args.next()) else {
        eprintln!("usage: transit-sim <config.json> [log.json]");
        return ExitCode::from(2);
    };
    if args.next().is_some() {
        eprintln!("usage: transit-sim <config.json> [log.json]");
        return ExitCode::from(2);
    }

    let config = PathBuf::from(config);
    let log_path = log_path.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("log.json"));

    match drive(&config, &log_path) {
        Ok(events) => {
            println!("simulation complete: {events} events verified, log at {}", log_path.display());
            ExitCode::SUCCESS
        }
        Err(Failure::Config(msg)) => {
            eprintln!("configuration error: {msg}");
            ExitCode::from(2)
        }
        Err(Failure::Run(msg)) => {
            eprintln!("simulation failed: {msg}");
            ExitCode::from(1)
        }
        Err(Failure::Verify(msg)) => {
            eprintln!("verification failed: {msg}");
            ExitCode::from(1)
        }
    }
}

enum Failure {
    Config(String),
    Run(String),
    Verify(String),
}

fn drive(config: &Path, log_path: &Path) -> Result<usize, Failure> {
    let net = load_network(config).map_err(config_failure)?;

    let outcome = Sim::new(net)
        .map_err(config_failure)?
        .deadline(DEADLINE)
        .run()
        .map_err(|e| Failure::Run(e.to_string()))?;

    write_log_file(log_path, &outcome.events, outcome.network.registry())
        .map_err(|e| Failure::Run(e.to_string()))?;

    // Independent audit: replay the recorded log against a network loaded
    // fresh from the same topology source.
    let mut fresh = load_network(config).map_err(config_failure)?;
    verify(&mut fresh, &outcome.events).map_err(|e| Failure::Verify(e.to_string()))?;

    Ok(outcome.events.len())
}

/// Setup-time failures (bad file, bad JSON, inconsistent topology) all map
/// to the configuration exit code.
fn config_failure(e: SimError) -> Failure {
    Failure::Config(e.to_string())
}
