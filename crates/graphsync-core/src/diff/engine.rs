//! Diff computation.
//!
//! Nodes are indexed by id, so node diffing is linear in the input size.
//! Edges have no key beyond their whole value and are compared pairwise,
//! which is quadratic; graphs here are sized for display, not analytics.

use std::collections::{HashMap, HashSet};

use crate::diff::model::{EdgeDiff, NodeDiff};
use crate::model::{Edge, Node, NodeId};

/// Compute the node delta between two snapshots.
///
/// Assumes ids are unique within each side, which description validation
/// guarantees for anything the controller diffs.
pub fn diff_nodes(prev: &[Node], next: &[Node]) -> NodeDiff {
    let prev_by_id: HashMap<&NodeId, &Node> = prev.iter().map(|n| (&n.id, n)).collect();
    let next_ids: HashSet<&NodeId> = next.iter().map(|n| &n.id).collect();

    let removed = prev
        .iter()
        .filter(|n| !next_ids.contains(&n.id))
        .cloned()
        .collect();

    let mut added = Vec::new();
    let mut changed = Vec::new();
    for node in next {
        match prev_by_id.get(&node.id) {
            None => added.push(node.clone()),
            Some(old) if *old != node => changed.push(node.clone()),
            Some(_) => {}
        }
    }

    NodeDiff {
        removed,
        added,
        changed,
    }
}

/// Compute the edge delta between two snapshots.
pub fn diff_edges(prev: &[Edge], next: &[Edge]) -> EdgeDiff {
    EdgeDiff {
        removed: difference(prev, next),
        added: difference(next, prev),
    }
}

/// Items of `a` with no deep-equal item in `b`
fn difference(a: &[Edge], b: &[Edge]) -> Vec<Edge> {
    a.iter().filter(|e| !b.contains(e)).cloned().collect()
}
