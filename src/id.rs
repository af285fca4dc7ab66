//! Node identity.

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Uniquely identifies a node in the simulated tree. Numbered `1..=n`, matching the
/// heap-shaped tree built by [`crate::topology`].
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Constructs a `NodeId`. Panics if `n == 0`; ids are 1-indexed per the tree layout.
    pub fn new(n: u32) -> Self {
        assert!(n >= 1, "node ids start at 1");
        NodeId(n)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

// Hashes to a single `u32`, so `NodeId` can key a `nohash_hasher`-backed map the same way
// `Fingerprint` does for the checker's `sources` table.
impl Hash for NodeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.0);
    }
}

impl nohash_hasher::IsEnabled for NodeId {}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(n: u32) -> Self {
        NodeId::new(n)
    }
}

/// A map keyed by [`NodeId`] that skips rehashing the id, mirroring the checker's
/// `BuildHasherDefault<NoHashHasher<u64>>` tables.
pub type NodeMap<V> =
    std::collections::HashMap<NodeId, V, std::hash::BuildHasherDefault<nohash_hasher::NoHashHasher<u32>>>;
