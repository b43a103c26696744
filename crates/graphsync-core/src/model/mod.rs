pub mod edge;
pub mod graph;
pub mod id;
pub mod node;

pub use edge::Edge;
pub use graph::GraphDescription;
pub use id::{Entity, EntityId, EntityKey, NodeId};
pub use node::{Attributes, Node};
