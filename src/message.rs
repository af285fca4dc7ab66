//! The messages the mediator serializes (§3, §4.3).

use crate::id::NodeId;

/// The kind of event carried by a [`Message`]. `Done` is not part of the core Raymond
/// protocol; it is how a node driver tells the mediator it has exhausted its `times`
/// sequence (§4.4, §4.6).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum MessageKind {
    RequestCs,
    PassRequest,
    PassToken,
    ExitCs,
    Done,
}

/// An immutable record carried on the mediator's single FIFO.
///
/// `REQUEST_CS` and `EXIT_CS` are always self-addressed (`sender == receiver`): the open
/// question in §9 about which end drives their routing is resolved that way, so the
/// driver never needs to read the node's `holder` pointer to compose one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub sender: NodeId,
    pub receiver: NodeId,
    pub kind: MessageKind,
}

impl Message {
    pub fn request_cs(self_id: NodeId) -> Self {
        Message { sender: self_id, receiver: self_id, kind: MessageKind::RequestCs }
    }

    pub fn exit_cs(self_id: NodeId) -> Self {
        Message { sender: self_id, receiver: self_id, kind: MessageKind::ExitCs }
    }

    pub fn done(self_id: NodeId) -> Self {
        Message { sender: self_id, receiver: self_id, kind: MessageKind::Done }
    }

    pub fn pass_request(from: NodeId, to: NodeId) -> Self {
        Message { sender: from, receiver: to, kind: MessageKind::PassRequest }
    }

    pub fn pass_token(from: NodeId, to: NodeId) -> Self {
        Message { sender: from, receiver: to, kind: MessageKind::PassToken }
    }
}
