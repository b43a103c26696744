//! Patch applier
//!
//! Applies a differ's output to a live collection in a fixed order. For
//! nodes: remove, then add, then update. For edges: remove, then add. Remove
//! always runs first so a stale entity and its replacement under the same
//! key never collide.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::collection::{CollectionError, LiveCollection};
use crate::diff::{EdgeDiff, NodeDiff};
use crate::errors::{GraphSyncError, Result};
use crate::model::{Edge, Entity, EntityKey, Node};

/// Collection operation a patch step performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Update,
}

impl PatchOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchOp::Add => "add",
            PatchOp::Remove => "remove",
            PatchOp::Update => "update",
        }
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apply a node delta to a live node collection
///
/// # Errors
///
/// Returns `CollectionRejected` naming the operation and entity key when the
/// collection refuses a step. Earlier steps stay applied; nothing is retried.
pub fn apply_node_patch<C>(collection: &mut C, diff: &NodeDiff) -> Result<()>
where
    C: LiveCollection<Node> + ?Sized,
{
    remove_step(collection, &diff.removed)?;
    add_step(collection, &diff.added)?;
    if !diff.changed.is_empty() {
        collection
            .update(&diff.changed)
            .map_err(|e| rejected(PatchOp::Update, e))?;
    }
    tracing::debug!(
        removed = diff.removed.len(),
        added = diff.added.len(),
        changed = diff.changed.len(),
        "node patch applied"
    );
    Ok(())
}

/// Apply an edge delta to a live edge collection
///
/// # Errors
///
/// Returns `CollectionRejected` naming the operation and entity key when the
/// collection refuses a step.
pub fn apply_edge_patch<C>(collection: &mut C, diff: &EdgeDiff) -> Result<()>
where
    C: LiveCollection<Edge> + ?Sized,
{
    remove_step(collection, &diff.removed)?;
    add_step(collection, &diff.added)?;
    tracing::debug!(
        removed = diff.removed.len(),
        added = diff.added.len(),
        "edge patch applied"
    );
    Ok(())
}

fn remove_step<T, C>(collection: &mut C, items: &[T]) -> Result<()>
where
    T: Entity,
    C: LiveCollection<T> + ?Sized,
{
    if items.is_empty() {
        return Ok(());
    }
    let keys: Vec<EntityKey> = items.iter().map(|item| item.key()).collect();
    collection
        .remove(&keys)
        .map_err(|e| rejected(PatchOp::Remove, e))
}

fn add_step<T, C>(collection: &mut C, items: &[T]) -> Result<()>
where
    T: Entity,
    C: LiveCollection<T> + ?Sized,
{
    if items.is_empty() {
        return Ok(());
    }
    collection
        .add(items)
        .map_err(|e| rejected(PatchOp::Add, e))
}

fn rejected(op: PatchOp, err: CollectionError) -> GraphSyncError {
    GraphSyncError::CollectionRejected {
        op,
        entity_key: err.key().to_string(),
        reason: err.to_string(),
    }
}
