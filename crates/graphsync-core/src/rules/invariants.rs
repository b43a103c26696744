use std::collections::HashSet;

use crate::model::{Edge, Entity, EntityKey, GraphDescription, NodeId};

/// Find node ids that occur more than once
///
/// Each repeated id is reported once, in order of its second occurrence.
pub fn find_duplicate_node_ids(graph: &GraphDescription) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for node in &graph.nodes {
        if !seen.insert(&node.id) && reported.insert(&node.id) {
            duplicates.push(node.id.clone());
        }
    }

    duplicates
}

/// Find edges whose endpoints name nodes missing from the description
///
/// Returns list of (edge, missing_node_id) tuples
pub fn find_dangling_edges(graph: &GraphDescription) -> Vec<(Edge, NodeId)> {
    let node_ids: HashSet<&NodeId> = graph.nodes.iter().map(|n| &n.id).collect();
    let mut dangling = Vec::new();

    for edge in &graph.edges {
        for endpoint in [&edge.from, &edge.to] {
            if !node_ids.contains(endpoint) {
                dangling.push((edge.clone(), endpoint.clone()));
            }
        }
    }

    dangling
}

/// Find edges whose collection key repeats an earlier edge's key
///
/// Explicit ids collide by id; id-less edges collide when deep-equal.
pub fn find_duplicate_edge_keys(graph: &GraphDescription) -> Vec<(Edge, EntityKey)> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for edge in &graph.edges {
        let key = edge.key();
        if !seen.insert(key.clone()) {
            duplicates.push((edge.clone(), key));
        }
    }

    duplicates
}
