//! The per-node Raymond state machine (§3, §4.2).
//!
//! A rule never performs I/O itself; it just returns the [`Effect`]s the mediator should
//! carry out. That keeps every rule a pure, independently testable function of the
//! node's own fields.

use std::collections::VecDeque;

use crate::id::NodeId;
use crate::message::Message;

/// What a rule wants the mediator to do on its behalf.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Effect {
    /// Enqueue `Message` onto the mediator's FIFO.
    Send(Message),
    /// The node just became holder-and-using; release its `token_signal`.
    GrantToken,
}

/// Raymond's per-node variables (§3). Owned exclusively by the mediator dispatch
/// thread; see the module docs on why rule application needs no locking of its own.
#[derive(Clone, Debug)]
pub struct NodeState {
    id: NodeId,
    holder: NodeId,
    request_queue: VecDeque<NodeId>,
    using: bool,
    asked: bool,
}

impl NodeState {
    /// Builds a node whose initial holder pointer is `holder` (§4.5: the root points at
    /// itself, every other node points at its parent).
    pub fn new(id: NodeId, holder: NodeId) -> Self {
        NodeState { id, holder, request_queue: VecDeque::new(), using: false, asked: false }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn holder(&self) -> NodeId {
        self.holder
    }

    pub fn is_using(&self) -> bool {
        self.using
    }

    pub fn is_holder(&self) -> bool {
        self.holder == self.id
    }

    /// Appends `x` to the request queue. Not a rule on its own: always called as the
    /// first step of handling `REQUEST_CS` or `PASS_REQUEST` (§4.3).
    pub fn enqueue(&mut self, x: NodeId) {
        self.request_queue.push_back(x);
    }

    /// `assignPrivilege` (§4.2). Pops the queue into `holder` when this node is the
    /// current holder, is idle, and somebody wants the token.
    pub fn assign_privilege(&mut self) -> Vec<Effect> {
        if self.holder != self.id || self.using || self.request_queue.is_empty() {
            return Vec::new();
        }
        let next_holder = self.request_queue.pop_front().expect("checked non-empty above");
        self.holder = next_holder;
        self.asked = false;

        if self.holder == self.id {
            self.using = true;
            vec![Effect::GrantToken]
        } else {
            vec![Effect::Send(Message::pass_token(self.id, self.holder))]
        }
    }

    /// `makeRequest` (§4.2). Forwards a pending request toward the holder, at most once
    /// per outstanding request (guarded by `asked`, giving P7's idempotence).
    pub fn make_request(&mut self) -> Vec<Effect> {
        if self.holder == self.id || self.request_queue.is_empty() || self.asked {
            return Vec::new();
        }
        self.asked = true;
        vec![Effect::Send(Message::pass_request(self.id, self.holder))]
    }

    /// Applies `recv.holder = recv` for an incoming `PASS_TOKEN` (§4.3).
    pub fn receive_token(&mut self) {
        self.holder = self.id;
    }

    /// Applies `snd.using = false` for an incoming `EXIT_CS` (§4.3).
    pub fn exit_cs(&mut self) {
        self.using = false;
    }
}
