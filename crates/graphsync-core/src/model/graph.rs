use serde::{Deserialize, Serialize};

use super::{Edge, Node};

/// Immutable snapshot of a graph supplied for one reconciliation pass
///
/// Order is not semantically meaningful. Missing fields deserialize as
/// empty, so `{}` is the empty graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphDescription {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
