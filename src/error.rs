//! Error kinds (§7), grounded the way the rest of this codebase's workspace siblings
//! derive their error enums with `thiserror` (one variant per distinguishable failure,
//! carrying whatever context makes the diagnostic actionable).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid node count supplied on the command line or at the interactive prompt.
    #[error("invalid number of nodes: {0:?} (expected an integer >= 1)")]
    InvalidNodeCount(String),

    /// Invalid load selection (expected `1`/`2`/`3` or `low`/`med`/`high`).
    #[error("invalid load: {0:?} (expected 1, 2, or 3)")]
    InvalidLoad(String),

    /// The summary log file could not be opened or written. Recoverable: the caller logs
    /// this at `warn` and continues without persistent logging (§7).
    #[error("could not write log file {path}: {source}")]
    LogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rule precondition was violated, a message carried an unrecognized kind for its
    /// route, or `done_set` grew past `n`. Always fatal (§7): these are the repository's
    /// primary regression signal and must not be optimized away.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl SimError {
    /// The process exit code this error maps to (§6, §7).
    pub fn exit_code(&self) -> i32 {
        match self {
            SimError::InvalidNodeCount(_) | SimError::InvalidLoad(_) => 2,
            SimError::LogIo { .. } => 0, // recoverable: simulation still completed
            SimError::InvariantViolation(_) => 3,
        }
    }
}
