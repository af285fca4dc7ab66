//! CLI entry point: parses arguments (or falls back to the interactive prompt),
//! runs one simulation, and reports the result (§6).

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use raymond_sim::config::Cli;
use raymond_sim::controller::{self, RunConfig};
use raymond_sim::error::SimError;
use raymond_sim::summary;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn try_main() -> Result<(), SimError> {
    let cli = Cli::parse();
    let quiet = cli.quiet;
    let args = cli.resolve()?;

    // `--quiet` silences the per-event trace independently of `RUST_LOG`, by turning its
    // dedicated target off outright; every other target still follows the env filter.
    let mut builder = env_logger::Builder::from_default_env();
    if quiet {
        builder.filter_module("raymond_sim::trace", LevelFilter::Off);
    }
    builder.init();

    let config = RunConfig { nodes: args.nodes, load: args.load, seed: args.seed, requests: args.requests };
    let report = controller::run(config)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&report)
            .expect("RunReport serialization cannot fail: no maps, no non-finite floats");
        println!("{rendered}");
    } else {
        let block = summary::render(&report);
        print!("{block}");
    }

    if let Err(e) = summary::append_to_log(&args.log_file, &summary::render(&report)) {
        log::warn!("{e}");
    }

    Ok(())
}
