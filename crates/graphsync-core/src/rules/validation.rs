use crate::errors::{GraphSyncError, Result};
use crate::model::{EntityKey, GraphDescription};

use super::invariants;

/// Validate a graph description before it is diffed or applied
///
/// Checks, in order:
///
/// 1. Node ids are unique
/// 2. Every edge endpoint names a node in the description
/// 3. Edge keys are unique (explicit ids, and deep-equal id-less edges)
///
/// # Errors
///
/// Returns the first violation found as `DuplicateNodeId`, `DanglingEdge`,
/// `DuplicateEdgeId` or `DuplicateEdge`.
pub fn validate_description(graph: &GraphDescription) -> Result<()> {
    if let Some(node_id) = invariants::find_duplicate_node_ids(graph).first() {
        return Err(GraphSyncError::DuplicateNodeId {
            node_id: node_id.to_string(),
        });
    }

    if let Some((edge, node_id)) = invariants::find_dangling_edges(graph).first() {
        return Err(GraphSyncError::DanglingEdge {
            from: edge.from.to_string(),
            to: edge.to.to_string(),
            node_id: node_id.to_string(),
        });
    }

    if let Some((edge, key)) = invariants::find_duplicate_edge_keys(graph).first() {
        return Err(match key {
            EntityKey::Id(id) => GraphSyncError::DuplicateEdgeId {
                edge_id: id.to_string(),
            },
            EntityKey::Structural(_) => GraphSyncError::DuplicateEdge {
                from: edge.from.to_string(),
                to: edge.to.to_string(),
            },
        });
    }

    Ok(())
}
