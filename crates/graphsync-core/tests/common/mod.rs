use graphsync_core::collection::CollectionError;
use graphsync_core::events::EventPayload;
use graphsync_core::{
    Configuration, DataSet, DataView, Edge, EntityKey, EventHandler, EventTarget,
    GraphDescription, GraphSyncError, LiveCollection, Node, RenderingEngine, Result,
};
use graphsync_core::ContainerProvider;
use graphsync_core_types::ViewId;
use std::collections::BTreeSet;

/// One call the engine received, in arrival order
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum EngineCall {
    Construct {
        container: String,
        nodes: usize,
        edges: usize,
    },
    SetOptions(Configuration),
    SetData {
        nodes: usize,
        edges: usize,
    },
    On(String),
    Off(String),
}

/// Rendering engine double that records every call
///
/// While `fail_options` / `fail_data` are set the matching call fails.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct RecordingEngine {
    pub calls: Vec<EngineCall>,
    pub config: Configuration,
    pub subscriptions: Vec<(String, EventHandler)>,
    pub fail_options: bool,
    pub fail_data: bool,
    pub hooked: bool,
}

#[allow(dead_code)]
impl RecordingEngine {
    /// Deliver an event to every handler currently subscribed under `name`
    pub fn emit(&self, name: &str, payload: &EventPayload) {
        for (subscribed, handler) in &self.subscriptions {
            if subscribed == name {
                handler.call(payload);
            }
        }
    }

    pub fn set_data_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, EngineCall::SetData { .. }))
            .count()
    }

    pub fn set_options_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, EngineCall::SetOptions(_)))
            .count()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl EventTarget for RecordingEngine {
    fn on(&mut self, name: &str, handler: &EventHandler) {
        self.calls.push(EngineCall::On(name.to_string()));
        self.subscriptions.push((name.to_string(), handler.clone()));
    }

    fn off(&mut self, name: &str, handler: &EventHandler) {
        self.calls.push(EngineCall::Off(name.to_string()));
        self.subscriptions
            .retain(|(n, h)| !(n == name && h.same_as(handler)));
    }
}

impl RenderingEngine for RecordingEngine {
    type Container = String;

    fn construct(container: String, data: DataView<'_>, config: &Configuration) -> Result<Self> {
        if container == BROKEN_CONTAINER {
            return Err(GraphSyncError::Engine {
                message: "container is not attachable".to_string(),
            });
        }
        Ok(Self {
            calls: vec![EngineCall::Construct {
                container,
                nodes: data.nodes.len(),
                edges: data.edges.len(),
            }],
            config: config.clone(),
            ..Self::default()
        })
    }

    fn set_options(&mut self, config: &Configuration) -> Result<()> {
        if self.fail_options {
            return Err(GraphSyncError::Engine {
                message: "options rejected".to_string(),
            });
        }
        self.calls.push(EngineCall::SetOptions(config.clone()));
        self.config = config.clone();
        Ok(())
    }

    fn set_data(&mut self, data: DataView<'_>) -> Result<()> {
        if self.fail_data {
            return Err(GraphSyncError::Engine {
                message: "data refresh failed".to_string(),
            });
        }
        self.calls.push(EngineCall::SetData {
            nodes: data.nodes.len(),
            edges: data.edges.len(),
        });
        Ok(())
    }
}

/// Container id whose engine construction always fails
#[allow(dead_code)]
pub const BROKEN_CONTAINER: &str = "broken";

/// Provider that resolves a fixed set of view ids to containers of the same name
#[allow(dead_code)]
pub struct Containers(BTreeSet<String>);

#[allow(dead_code)]
impl Containers {
    pub fn of(ids: &[&str]) -> Self {
        Self(ids.iter().map(|s| s.to_string()).collect())
    }
}

impl ContainerProvider for Containers {
    type Container = String;

    fn resolve(&self, view_id: &ViewId) -> Option<String> {
        self.0.get(view_id.as_str()).cloned()
    }
}

/// Node collection that refuses to store nodes flagged `"poison": true`
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct PickyNodes(DataSet<Node>);

#[allow(dead_code)]
impl PickyNodes {
    fn check(items: &[Node]) -> std::result::Result<(), CollectionError> {
        match items
            .iter()
            .find(|n| n.attribute("poison") == Some(&serde_json::Value::Bool(true)))
        {
            Some(node) => Err(CollectionError::Rejected {
                key: EntityKey::Id(node.id.clone()),
                reason: "poisoned node".to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl LiveCollection<Node> for PickyNodes {
    fn add(&mut self, items: &[Node]) -> std::result::Result<(), CollectionError> {
        Self::check(items)?;
        self.0.add(items)
    }

    fn remove(&mut self, keys: &[EntityKey]) -> std::result::Result<(), CollectionError> {
        self.0.remove(keys)
    }

    fn update(&mut self, items: &[Node]) -> std::result::Result<(), CollectionError> {
        Self::check(items)?;
        self.0.update(items)
    }

    fn get(&self, key: &EntityKey) -> Option<&Node> {
        self.0.get(key)
    }

    fn items(&self) -> Vec<&Node> {
        self.0.items()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Nodes with the given ids, labelled by id
#[allow(dead_code)]
pub fn nodes(ids: &[i64]) -> Vec<Node> {
    ids.iter()
        .map(|id| Node::new(*id).with("label", format!("n{}", id)))
        .collect()
}

/// Id-less edges between the given pairs
#[allow(dead_code)]
pub fn edges(pairs: &[(i64, i64)]) -> Vec<Edge> {
    pairs.iter().map(|(from, to)| Edge::new(*from, *to)).collect()
}

#[allow(dead_code)]
pub fn graph(node_ids: &[i64], edge_pairs: &[(i64, i64)]) -> GraphDescription {
    GraphDescription::new(nodes(node_ids), edges(edge_pairs))
}

/// Sorted snapshot of a live collection's keys
#[allow(dead_code)]
pub fn keys<T, C>(collection: &C) -> Vec<EntityKey>
where
    T: graphsync_core::Entity,
    C: LiveCollection<T> + ?Sized,
{
    let mut keys: Vec<EntityKey> = collection.items().iter().map(|item| item.key()).collect();
    keys.sort();
    keys
}

/// Edge collection that refuses to store edges flagged `"poison": true`
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct PickyEdges(DataSet<Edge>);

impl LiveCollection<Edge> for PickyEdges {
    fn add(&mut self, items: &[Edge]) -> std::result::Result<(), CollectionError> {
        let poisoned = items
            .iter()
            .find(|e| e.attributes.get("poison") == Some(&serde_json::Value::Bool(true)));
        if let Some(edge) = poisoned {
            return Err(CollectionError::Rejected {
                key: graphsync_core::Entity::key(edge),
                reason: "poisoned edge".to_string(),
            });
        }
        self.0.add(items)
    }

    fn remove(&mut self, keys: &[EntityKey]) -> std::result::Result<(), CollectionError> {
        self.0.remove(keys)
    }

    fn update(&mut self, items: &[Edge]) -> std::result::Result<(), CollectionError> {
        self.0.update(items)
    }

    fn get(&self, key: &EntityKey) -> Option<&Edge> {
        self.0.get(key)
    }

    fn items(&self) -> Vec<&Edge> {
        self.0.items()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
