//! The mediator: the single FIFO message serializer (§4.3, C4).
//!
//! Producers (node drivers, and the state-machine rules themselves via [`crate::node::Effect::Send`])
//! push onto [`Queue`]; a single dispatch loop is the only consumer, which is what
//! linearizes the whole simulation and makes traces reproducible (§5).

use std::time::Duration;

use id_set::IdSet;
use parking_lot::{Condvar, Mutex};

use crate::error::SimError;
use crate::id::{NodeId, NodeMap};
use crate::message::{Message, MessageKind};
use crate::node::{Effect, NodeState};
use crate::rendezvous::Rendezvous;
use crate::trace;

/// How long the dispatch loop blocks on an empty queue before rechecking termination.
/// Mirrors the design notes' preference for a blocking dequeue over a hot poll loop.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// The mediator's single producer/single-consumer FIFO.
pub struct Queue {
    inner: Mutex<std::collections::VecDeque<Message>>,
    non_empty: Condvar,
}

impl Queue {
    pub fn new() -> Self {
        Queue { inner: Mutex::new(std::collections::VecDeque::new()), non_empty: Condvar::new() }
    }

    /// Enqueues a message. Safe to call from any producer thread.
    pub fn push(&self, msg: Message) {
        let mut q = self.inner.lock();
        q.push_back(msg);
        self.non_empty.notify_one();
    }

    /// Pops the front message, blocking up to `timeout` if the queue is momentarily
    /// empty. Returns `None` on timeout so the caller can recheck termination.
    fn pop_timeout(&self, timeout: Duration) -> Option<Message> {
        let mut q = self.inner.lock();
        if q.is_empty() {
            self.non_empty.wait_for(&mut q, timeout);
        }
        q.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

/// The rendezvous pair a driver waits on and the mediator posts to (§3).
pub struct NodeSignals {
    pub token_signal: Rendezvous,
    pub done_signal: Rendezvous,
}

impl NodeSignals {
    pub fn new() -> Self {
        NodeSignals { token_signal: Rendezvous::new(), done_signal: Rendezvous::new() }
    }
}

impl Default for NodeSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Final per-run counters (§3, §8 P5).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[derive(serde::Serialize)]
pub struct Stats {
    pub requests: usize,
    pub serviced: usize,
    pub messages: usize,
    pub token_passes: usize,
}

/// Owns the global counters and the `done_set`; run exclusively on the dispatch thread,
/// so (per §5 and §9) none of its fields need their own synchronization. The FIFO itself
/// is a separate [`Queue`], owned by the caller and shared by reference, so that driver
/// threads can hold a `&Queue` for the whole run without fighting the borrow checker over
/// the `&mut Mediator` the dispatch loop needs for its own counters.
pub struct Mediator {
    stats: Stats,
    done_set: IdSet,
}

impl Mediator {
    pub fn new() -> Self {
        Mediator { stats: Stats::default(), done_set: IdSet::new() }
    }

    /// Runs the dispatch loop until every node of `n` has reported `Done` and `queue`
    /// has drained, then releases every `done_signal` and returns final statistics.
    pub fn run(
        &mut self,
        n: u32,
        queue: &Queue,
        nodes: &mut NodeMap<NodeState>,
        signals: &NodeMap<NodeSignals>,
    ) -> Result<Stats, SimError> {
        loop {
            if self.done_set.len() >= n as usize && queue.is_empty() {
                break;
            }
            let Some(msg) = queue.pop_timeout(POLL_INTERVAL) else {
                continue;
            };
            self.dispatch_one(n, msg, queue, nodes, signals)?;
        }

        for i in 1..=n {
            let id = NodeId::new(i);
            if self.done_set.contains(usize::from(id)) {
                if let Some(s) = signals.get(&id) {
                    s.done_signal.post();
                }
            }
        }

        Ok(self.stats)
    }

    fn dispatch_one(
        &mut self,
        n: u32,
        msg: Message,
        queue: &Queue,
        nodes: &mut NodeMap<NodeState>,
        signals: &NodeMap<NodeSignals>,
    ) -> Result<(), SimError> {
        log::debug!("dispatching {:?}", msg);

        match msg.kind {
            MessageKind::RequestCs => {
                trace::requested_cs(msg.sender);
                let effects = {
                    let snd = self.node_mut(nodes, msg.sender)?;
                    snd.enqueue(msg.sender);
                    let mut effects = snd.assign_privilege();
                    effects.extend(snd.make_request());
                    effects
                };
                self.stats.requests += 1;
                Self::apply_effects(msg.sender, effects, queue, signals);
            }
            MessageKind::PassRequest => {
                trace::sent_request(msg.sender, msg.receiver);
                let effects = {
                    let recv = self.node_mut(nodes, msg.receiver)?;
                    recv.enqueue(msg.sender);
                    let mut effects = recv.assign_privilege();
                    effects.extend(recv.make_request());
                    effects
                };
                self.stats.messages += 1;
                Self::apply_effects(msg.receiver, effects, queue, signals);
            }
            MessageKind::PassToken => {
                trace::passed_token(msg.sender, msg.receiver);
                let effects = {
                    let recv = self.node_mut(nodes, msg.receiver)?;
                    recv.receive_token();
                    let mut effects = recv.assign_privilege();
                    effects.extend(recv.make_request());
                    effects
                };
                self.stats.messages += 1;
                self.stats.token_passes += 1;
                Self::apply_effects(msg.receiver, effects, queue, signals);
            }
            MessageKind::ExitCs => {
                trace::exited_cs(msg.sender);
                let effects = {
                    let snd = self.node_mut(nodes, msg.sender)?;
                    snd.exit_cs();
                    let mut effects = snd.assign_privilege();
                    effects.extend(snd.make_request());
                    effects
                };
                self.stats.serviced += 1;
                Self::apply_effects(msg.sender, effects, queue, signals);
            }
            MessageKind::Done => {
                log::debug!("node {} reported done", msg.sender);
                self.done_set.insert(usize::from(msg.sender));
                if self.done_set.len() > n as usize {
                    return Err(SimError::InvariantViolation(format!(
                        "done_set grew past n={} after node {} reported done",
                        n, msg.sender
                    )));
                }
            }
        }

        Ok(())
    }

    fn node_mut<'a>(
        &self,
        nodes: &'a mut NodeMap<NodeState>,
        id: NodeId,
    ) -> Result<&'a mut NodeState, SimError> {
        nodes
            .get_mut(&id)
            .ok_or_else(|| SimError::InvariantViolation(format!("message referenced unknown node {id}")))
    }

    fn apply_effects(id: NodeId, effects: Vec<Effect>, queue: &Queue, signals: &NodeMap<NodeSignals>) {
        for effect in effects {
            match effect {
                Effect::Send(msg) => queue.push(msg),
                Effect::GrantToken => {
                    if let Some(s) = signals.get(&id) {
                        s.token_signal.post();
                    }
                }
            }
        }
    }
}

impl Default for Mediator {
    fn default() -> Self {
        Self::new()
    }
}
