//! Live collection boundary
//!
//! A live collection is the mutable, keyed container a rendering engine
//! reads its nodes or edges from. The controller is its only writer.

use thiserror::Error;

use crate::model::{Edge, Entity, EntityKey, Node};

/// Rejection reported by a live collection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// An added item's key is already present (or repeated in the batch)
    #[error("duplicate key {0}")]
    DuplicateKey(EntityKey),

    /// The collection refused the item for a reason of its own
    #[error("rejected {key}: {reason}")]
    Rejected { key: EntityKey, reason: String },
}

impl CollectionError {
    /// Key of the offending entity
    pub fn key(&self) -> &EntityKey {
        match self {
            CollectionError::DuplicateKey(key) => key,
            CollectionError::Rejected { key, .. } => key,
        }
    }
}

/// Mutable keyed container of entities
///
/// All mutators must accept empty input as a no-op.
pub trait LiveCollection<T: Entity> {
    /// Insert new items
    ///
    /// # Errors
    ///
    /// Fails if any item's key is already present.
    fn add(&mut self, items: &[T]) -> Result<(), CollectionError>;

    /// Remove items by key
    ///
    /// # Errors
    ///
    /// Implementation-defined; the in-memory data set never fails here.
    fn remove(&mut self, keys: &[EntityKey]) -> Result<(), CollectionError>;

    /// Replace items in place by key
    ///
    /// # Errors
    ///
    /// Implementation-defined; the in-memory data set upserts.
    fn update(&mut self, items: &[T]) -> Result<(), CollectionError>;

    fn get(&self, key: &EntityKey) -> Option<&T>;

    /// All items, in key order
    fn items(&self) -> Vec<&T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Borrowed view of both live collections, handed to the rendering engine
#[derive(Clone, Copy)]
pub struct DataView<'a> {
    pub nodes: &'a dyn LiveCollection<Node>,
    pub edges: &'a dyn LiveCollection<Edge>,
}

impl<'a> DataView<'a> {
    pub fn new(nodes: &'a dyn LiveCollection<Node>, edges: &'a dyn LiveCollection<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Owned copy of the current nodes
    pub fn node_snapshot(&self) -> Vec<Node> {
        self.nodes.items().into_iter().cloned().collect()
    }

    /// Owned copy of the current edges
    pub fn edge_snapshot(&self) -> Vec<Edge> {
        self.edges.items().into_iter().cloned().collect()
    }
}

impl std::fmt::Debug for DataView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataView")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .finish()
    }
}
