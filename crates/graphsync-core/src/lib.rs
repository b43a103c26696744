//! GraphSync Core - incremental reconciliation of graph descriptions
//!
//! This crate keeps a stateful rendering engine in agreement with a
//! declarative graph description while doing as little work against the
//! engine as possible. It provides:
//! - Node and edge models with their identity rules (id for nodes, whole
//!   value for edges)
//! - A pure entity differ and a patch applier for live collections
//! - Deep configuration merging over a fixed default configuration
//! - Event subscription lifecycle management
//! - A reconciliation controller that owns the live collections and engine
//!
//! The rendering engine, live collections and container lookup are traits;
//! [`dataset::DataSet`] is the in-memory collection used by default.

pub mod collection;
pub mod config;
pub mod controller;
pub mod dataset;
pub mod diff;
pub mod engine;
pub mod errors;
pub mod events;
pub mod logging_facility;
pub mod model;
pub mod patch;
pub mod rules;

// Re-export commonly used types
pub use collection::{CollectionError, DataView, LiveCollection};
pub use config::{effective_configuration, merge, Configuration};
pub use controller::{Controller, ControllerState, ReconciliationReport, ViewProps};
pub use dataset::DataSet;
pub use diff::{diff_edges, diff_nodes, EdgeDiff, NodeDiff};
pub use engine::{ContainerProvider, RenderingEngine};
pub use errors::{ExError, ExErrorKind, GraphSyncError, Result};
pub use events::{EventBindingMap, EventHandler, EventTarget};
pub use model::{Edge, Entity, EntityId, EntityKey, GraphDescription, Node, NodeId};
pub use patch::{apply_edge_patch, apply_node_patch, PatchOp};
