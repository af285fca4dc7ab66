//! The heap-shaped spanning tree builder (§4.5, C5).

use std::collections::HashSet;

use crate::id::NodeId;

/// Node `i`'s parent in the heap-shaped tree, or `None` for the root (node 1).
///
/// §4.5 writes the rule as `ceil(i/2)` in prose, but its own worked example (node 2 and
/// node 3 both parented by node 1) only holds for integer-floor division; this
/// implementation follows the worked example, as recorded in `DESIGN.md`.
pub fn parent_of(id: NodeId) -> Option<NodeId> {
    let i = id.get();
    if i == 1 {
        None
    } else {
        Some(NodeId::new(i / 2))
    }
}

/// The initial holder pointer for every node `1..=n`: the root points at itself, every
/// other node points at its parent (§4.5).
pub fn initial_holders(n: u32) -> Vec<(NodeId, NodeId)> {
    (1..=n)
        .map(|i| {
            let id = NodeId::new(i);
            let holder = parent_of(id).unwrap_or(id);
            (id, holder)
        })
        .collect()
}

/// The tree's undirected edge set, used by P6 to confirm the token migrates without the
/// tree itself ever changing shape.
pub fn tree_edges(n: u32) -> HashSet<(NodeId, NodeId)> {
    (2..=n)
        .map(|i| {
            let child = NodeId::new(i);
            let parent = parent_of(child).expect("only the root has no parent");
            if child.get() < parent.get() {
                (child, parent)
            } else {
                (parent, child)
            }
        })
        .collect()
}
