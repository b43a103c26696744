//! Diff output types.

use serde::{Deserialize, Serialize};

use crate::model::{Edge, Node};

/// Delta between two node sets, keyed by node `id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDiff {
    /// Nodes of the previous set whose id is absent from the next set
    pub removed: Vec<Node>,
    /// Nodes of the next set whose id is absent from the previous set
    pub added: Vec<Node>,
    /// New full value of nodes kept by id whose attributes differ
    pub changed: Vec<Node>,
}

impl NodeDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.changed.is_empty()
    }
}

/// Delta between two edge sets under whole-value equality
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeDiff {
    /// Edges of the previous set with no deep-equal counterpart in the next
    pub removed: Vec<Edge>,
    /// Edges of the next set with no deep-equal counterpart in the previous
    pub added: Vec<Edge>,
}

impl EdgeDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}
