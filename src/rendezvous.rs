//! One-shot and latch synchronization primitives (§5, §9).
//!
//! Both shapes here are mutex+condvar pairs with an explicit boolean, the alternative
//! the design notes call out to a bounded channel of capacity 1 — this repository
//! already leans on `parking_lot::{Mutex, Condvar}` for exactly this kind of thing (see
//! `job_market::JobBroker`), so rendezvous signaling follows the same pattern rather than
//! reaching for `std::sync::mpsc`.

use parking_lot::{Condvar, Mutex};

/// A single-slot, single-waiter handoff. `post` is idempotent until consumed; `wait`
/// blocks until a pending post is consumed, then resets so a later post is needed again.
///
/// Used for both `token_signal` and `done_signal` (§3): the state machine (running on
/// the mediator thread) posts, the node driver waits.
pub struct Rendezvous {
    ready: Mutex<bool>,
    cond: Condvar,
}

impl Rendezvous {
    pub fn new() -> Self {
        Rendezvous { ready: Mutex::new(false), cond: Condvar::new() }
    }

    /// Marks the rendezvous as satisfied and wakes the waiter.
    pub fn post(&self) {
        let mut ready = self.ready.lock();
        *ready = true;
        self.cond.notify_one();
    }

    /// Blocks until `post` has been called, then consumes it. Spuriously-woken waits
    /// recheck the predicate and re-wait (§7): that's just the `while` loop below.
    pub fn wait(&self) {
        let mut ready = self.ready.lock();
        while !*ready {
            self.cond.wait(&mut ready);
        }
        *ready = false;
    }
}

impl Default for Rendezvous {
    fn default() -> Self {
        Self::new()
    }
}

/// A one-shot gate that every waiter blocks on until a single `open()` call releases all
/// of them at once (§4.4's start barrier). Unlike [`Rendezvous`], `open` is permanent:
/// once released, later `wait` calls return immediately.
pub struct Latch {
    open: Mutex<bool>,
    cond: Condvar,
}

impl Latch {
    pub fn new() -> Self {
        Latch { open: Mutex::new(false), cond: Condvar::new() }
    }

    pub fn open(&self) {
        let mut open = self.open.lock();
        *open = true;
        self.cond.notify_all();
    }

    pub fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.cond.wait(&mut open);
        }
    }
}

impl Default for Latch {
    fn default() -> Self {
        Self::new()
    }
}
