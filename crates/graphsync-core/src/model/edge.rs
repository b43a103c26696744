use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest as _, Sha256};

use super::id::{Entity, EntityId, EntityKey, NodeId};
use super::node::Attributes;

/// A directed graph edge
///
/// Edges have no dedicated identity for diffing: two edges are the same
/// only when every field matches, so an attribute change is a removal of
/// the old value plus an addition of the new one. An explicit `id` only
/// affects how a live collection keys the edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            id: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an attribute, replacing any previous value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// SHA-256 hex digest of the canonical JSON form
    ///
    /// Attribute maps serialize in key order, so deep-equal edges always
    /// produce the same digest.
    pub fn structural_digest(&self) -> String {
        let canonical = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl Entity for Edge {
    fn key(&self) -> EntityKey {
        match &self.id {
            Some(id) => EntityKey::Id(id.clone()),
            None => EntityKey::Structural(self.structural_digest()),
        }
    }
}
