use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::id::{Entity, EntityKey, NodeId};

/// Free-form attributes carried by nodes and edges
pub type Attributes = BTreeMap<String, Value>;

/// A graph node
///
/// Identity is the `id` alone: two nodes with the same `id` and different
/// attributes are the same node with changed attributes. Serialized flat,
/// e.g. `{"id": 1, "label": "A"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Node {
    /// Create a node with no attributes
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(),
        }
    }

    /// Set an attribute, replacing any previous value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

impl Entity for Node {
    fn key(&self) -> EntityKey {
        EntityKey::Id(self.id.clone())
    }
}
