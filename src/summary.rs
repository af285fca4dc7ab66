//! The per-run summary block: printed to stdout and appended to the log file (§6).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::controller::RunReport;
use crate::error::SimError;

/// Renders the summary block exactly as §6 specifies, independent of where it ends up.
pub fn render(report: &RunReport) -> String {
    format!(
        "Load: {}\n\
         Number of nodes: {}\n\
         Number of critical section: {}\n\
         Number of critical sections serviced: {}\n\
         Number of messages: {}\n\
         Number of messages per request: {:.2}\n\
         Number of token passes: {}\n\
         Number of token passes per critical section: {:.2}\n",
        report.config.load,
        report.config.nodes,
        report.stats.requests,
        report.stats.serviced,
        report.stats.messages,
        report.messages_per_request(),
        report.stats.token_passes,
        report.token_passes_per_request(),
    )
}

/// Appends the rendered block to `path`. The file handle is scoped to this call so it
/// is released on every exit path (§5's resource-acquisition rule); failures are
/// reported as [`SimError::LogIo`] so the caller can downgrade them to a warning (§7).
pub fn append_to_log(path: &Path, block: &str) -> Result<(), SimError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| SimError::LogIo { path: path.to_path_buf(), source })?;

    file.write_all(block.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .map_err(|source| SimError::LogIo { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::RunConfig;
    use crate::mediator::Stats;
    use crate::time_gen::SimLoad;

    fn sample_report() -> RunReport {
        RunReport {
            config: RunConfig { nodes: 2, load: SimLoad::High, seed: 1, requests: 50 },
            stats: Stats { requests: 50, serviced: 50, messages: 100, token_passes: 50 },
            final_holders: vec![],
        }
    }

    #[test]
    fn renders_every_field_named_in_the_spec() {
        let block = render(&sample_report());
        assert!(block.contains("Load: HIGH"));
        assert!(block.contains("Number of nodes: 2"));
        assert!(block.contains("Number of critical section: 50"));
        assert!(block.contains("Number of critical sections serviced: 50"));
        assert!(block.contains("Number of messages: 100"));
        assert!(block.contains("Number of messages per request: 2.00"));
        assert!(block.contains("Number of token passes: 50"));
        assert!(block.contains("Number of token passes per critical section: 1.00"));
    }

    #[test]
    fn appends_rather_than_truncates_an_existing_log() {
        let dir = std::env::temp_dir().join(format!("raymond-sim-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("log.txt");

        append_to_log(&path, "first\n").unwrap();
        append_to_log(&path, "second\n").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("first"));
        assert!(contents.contains("second"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
