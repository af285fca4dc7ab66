//! Command-line flags and the interactive fallback prompt (§6, §AMBIENT.3).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::error::SimError;
use crate::time_gen::SimLoad;

const DEFAULT_REQUESTS: usize = 500;
const DEFAULT_LOG_FILE: &str = "simRaymondLog.txt";

#[derive(Debug, Parser)]
#[command(name = "raymond-sim", about = "Discrete-event simulator for Raymond's tree mutual-exclusion algorithm")]
pub struct Cli {
    /// Number of nodes in the tree.
    #[arg(long)]
    pub nodes: Option<u32>,

    /// Workload intensity.
    #[arg(long, value_enum)]
    pub load: Option<SimLoad>,

    /// RNG seed, shared across every node's time generation.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of critical-section requests per node.
    #[arg(long, default_value_t = DEFAULT_REQUESTS)]
    pub requests: usize,

    /// Suppress the per-event trace.
    #[arg(long)]
    pub quiet: bool,

    /// Where to append the run summary.
    #[arg(long, default_value_os_t = PathBuf::from(DEFAULT_LOG_FILE))]
    pub log_file: PathBuf,

    /// Print the run report as JSON instead of the plain-text summary block.
    #[arg(long)]
    pub json: bool,
}

/// The fully-resolved inputs for a run, regardless of whether they came from flags or
/// the interactive prompt.
pub struct ResolvedArgs {
    pub nodes: u32,
    pub load: SimLoad,
    pub seed: u64,
    pub requests: usize,
    pub quiet: bool,
    pub log_file: PathBuf,
    pub json: bool,
}

impl Cli {
    /// Resolves `nodes`/`load` from flags if both are present, otherwise falls back to
    /// the two-question interactive prompt (§6).
    pub fn resolve(self) -> Result<ResolvedArgs, SimError> {
        let (nodes, load) = match (self.nodes, self.load) {
            (Some(n), Some(l)) => (validate_nodes(n)?, l),
            _ => prompt_for_nodes_and_load()?,
        };
        Ok(ResolvedArgs {
            nodes,
            load,
            seed: self.seed,
            requests: self.requests,
            quiet: self.quiet,
            log_file: self.log_file,
            json: self.json,
        })
    }
}

/// Validates a raw node-count string (§6: "an integer >= 1").
pub fn parse_nodes(raw: &str) -> Result<u32, SimError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| SimError::InvalidNodeCount(raw.to_string()))
}

/// Enforces the same `>= 1` rule `parse_nodes` applies to the interactive prompt, but on
/// an already-parsed flag value (§6, §7): `--nodes 0` must be an `InputError`, not a
/// degenerate zero-node run.
fn validate_nodes(n: u32) -> Result<u32, SimError> {
    if n >= 1 {
        Ok(n)
    } else {
        Err(SimError::InvalidNodeCount(n.to_string()))
    }
}

/// Validates a raw load string: `1`/`2`/`3` or the case-insensitive tier name (§6).
pub fn parse_load(raw: &str) -> Result<SimLoad, SimError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "low" => Ok(SimLoad::Low),
        "2" | "med" | "medium" => Ok(SimLoad::Med),
        "3" | "high" => Ok(SimLoad::High),
        _ => Err(SimError::InvalidLoad(raw.to_string())),
    }
}

fn prompt_for_nodes_and_load() -> Result<(u32, SimLoad), SimError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    print!("Please enter the number of nodes: ");
    io::stdout().flush().ok();
    let nodes = loop {
        let Some(line) = lines.next() else {
            return Err(SimError::InvalidNodeCount(String::new()));
        };
        match parse_nodes(&line.unwrap_or_default()) {
            Ok(n) => break n,
            Err(e) => {
                log::warn!("{e}");
                print!("Please enter the number of nodes: ");
                io::stdout().flush().ok();
            }
        }
    };

    print!("Please enter the load: ");
    io::stdout().flush().ok();
    let load = loop {
        let Some(line) = lines.next() else {
            return Err(SimError::InvalidLoad(String::new()));
        };
        match parse_load(&line.unwrap_or_default()) {
            Ok(l) => break l,
            Err(e) => {
                log::warn!("{e}");
                print!("Please enter the load: ");
                io::stdout().flush().ok();
            }
        }
    };

    Ok((nodes, load))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nodes_accepts_positive_integers() {
        assert_eq!(parse_nodes("16").unwrap(), 16);
    }

    #[test]
    fn parse_nodes_rejects_zero_and_garbage() {
        assert!(parse_nodes("0").is_err());
        assert!(parse_nodes("nope").is_err());
    }

    #[test]
    fn parse_load_accepts_numeric_and_named_forms() {
        assert_eq!(parse_load("1").unwrap(), SimLoad::Low);
        assert_eq!(parse_load("MED").unwrap(), SimLoad::Med);
        assert_eq!(parse_load("high").unwrap(), SimLoad::High);
    }

    #[test]
    fn parse_load_rejects_out_of_range_values() {
        assert!(parse_load("4").is_err());
    }

    #[test]
    fn resolve_rejects_zero_nodes_in_flag_mode() {
        let cli = Cli {
            nodes: Some(0),
            load: Some(SimLoad::Low),
            seed: 0,
            requests: DEFAULT_REQUESTS,
            quiet: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            json: false,
        };
        let err = cli.resolve().unwrap_err();
        assert!(matches!(err, SimError::InvalidNodeCount(_)));
    }

    #[test]
    fn resolve_accepts_a_positive_node_count_in_flag_mode() {
        let cli = Cli {
            nodes: Some(4),
            load: Some(SimLoad::High),
            seed: 7,
            requests: DEFAULT_REQUESTS,
            quiet: true,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            json: false,
        };
        let resolved = cli.resolve().unwrap();
        assert_eq!(resolved.nodes, 4);
        assert_eq!(resolved.load, SimLoad::High);
    }
}
