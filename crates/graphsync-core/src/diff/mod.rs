//! Entity differ.
//!
//! Computes the delta between two graph snapshots, using the identity rule
//! of each entity kind.
//!
//! ## Entry points
//!
//! ```
//! use graphsync_core::diff::{diff_nodes, diff_edges};
//! use graphsync_core::model::{Edge, Node};
//!
//! let prev = vec![Node::new(1).with("label", "A")];
//! let next = vec![Node::new(1).with("label", "B"), Node::new(2).with("label", "C")];
//! let delta = diff_nodes(&prev, &next);
//! assert!(delta.removed.is_empty());
//! assert_eq!(delta.added, vec![Node::new(2).with("label", "C")]);
//! assert_eq!(delta.changed, vec![Node::new(1).with("label", "B")]);
//!
//! let edges = diff_edges(&[Edge::new(1, 2)], &[Edge::new(1, 2)]);
//! assert!(edges.is_empty());
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: no side effects; identical inputs give identical output.
//! - **Node identity**: a node kept by `id` with new attributes is reported
//!   only in `changed`, never as a removal plus an addition.
//! - **Edge whole-value identity**: edges have no update path; any field
//!   change is a removal of the old value and an addition of the new one.
//! - **Ordering**: results follow input order but carry set semantics.

pub mod engine;
pub mod model;

pub use engine::{diff_edges, diff_nodes};
pub use model::{EdgeDiff, NodeDiff};
