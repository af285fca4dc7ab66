//! The per-event stdout trace (§6). An external collaborator to the core engine: it
//! observes dispatch, it never influences it. Emitted through `log` at `info` level under
//! a dedicated target so it can be filtered (or silenced with `--quiet`) independently of
//! the mediator's own `debug`/`trace` diagnostics.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::id::NodeId;

const TARGET: &str = "raymond_sim::trace";

fn epoch_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the epoch")
        .as_millis()
}

pub fn requested_cs(id: NodeId) {
    log::info!(target: TARGET, "{}: {} requested the CS,", epoch_ms(), id);
}

pub fn sent_request(from: NodeId, to: NodeId) {
    log::info!(target: TARGET, "{}: {} sent request to {}", epoch_ms(), from, to);
}

pub fn passed_token(from: NodeId, to: NodeId) {
    log::info!(target: TARGET, "{}: {} passed the token to {}", epoch_ms(), from, to);
}

pub fn exited_cs(id: NodeId) {
    log::info!(target: TARGET, "{}: {} exited the CS,", epoch_ms(), id);
}
