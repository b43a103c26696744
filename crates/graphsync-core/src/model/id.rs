use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a node or an explicitly keyed edge
///
/// Callers may key entities by integer or by string; the two spaces never
/// collide (`1` and `"1"` are different ids).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

/// Node identity is the `id` field alone
pub type NodeId = EntityId;

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(n) => write!(f, "{}", n),
            EntityId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Int(n)
    }
}

impl From<i32> for EntityId {
    fn from(n: i32) -> Self {
        EntityId::Int(i64::from(n))
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::Text(s)
    }
}

/// Key a live collection stores an entity under
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKey {
    /// Explicit identifier (every node, and edges that carry an `id`)
    Id(EntityId),
    /// SHA-256 hex digest of an id-less edge's canonical JSON form
    Structural(String),
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Id(id) => write!(f, "{}", id),
            EntityKey::Structural(digest) => write!(f, "edge:{}", digest),
        }
    }
}

/// An item that can live in a [`LiveCollection`](crate::collection::LiveCollection)
pub trait Entity: Clone + PartialEq + fmt::Debug {
    /// The key this entity is stored and removed under
    fn key(&self) -> EntityKey;
}
