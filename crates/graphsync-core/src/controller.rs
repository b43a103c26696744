//! Reconciliation controller
//!
//! One controller exists per mounted graph view. It owns the live node and
//! edge collections, the rendering engine and the last applied description,
//! configuration and event bindings. Every update is reconciled in a fixed
//! order: nodes, edges, configuration, events, then a data refresh.
//!
//! ## Lifecycle
//!
//! `Unmounted -> Mounting -> Ready -> (Reconciling -> Ready)* -> Unmounted`
//!
//! ## Example
//!
//! ```ignore
//! use graphsync_core::{Controller, ViewProps};
//!
//! let mut controller: Controller<MyEngine> = Controller::mount(&provider, ViewProps::new(graph))?;
//! let report = controller.update(ViewProps::new(next_graph))?;
//! controller.unmount()?;
//! ```

use graphsync_core_types::{PassId, ViewId};
use serde::Serialize;
use std::fmt;
use std::time::Instant;

use crate::collection::{DataView, LiveCollection};
use crate::config::{effective_configuration, Configuration};
use crate::dataset::DataSet;
use crate::diff::{diff_edges, diff_nodes, EdgeDiff, NodeDiff};
use crate::engine::{ContainerProvider, RenderingEngine};
use crate::errors::{GraphSyncError, Result};
use crate::events::{self, EventBindingMap};
use crate::logging_facility::elapsed_ms;
use crate::model::{Edge, Entity, GraphDescription, Node};
use crate::patch::{apply_edge_patch, apply_node_patch};
use crate::rules::validate_description;
use crate::{log_op_end, log_op_error, log_op_start};

/// Everything the caller supplies for a view on mount and on each update
#[derive(Debug, Clone, Default)]
pub struct ViewProps {
    /// Stable view identifier; generated at mount when absent
    pub view_id: Option<ViewId>,
    pub graph: GraphDescription,
    /// User configuration, merged over the defaults before use
    pub options: Configuration,
    pub events: EventBindingMap,
}

impl ViewProps {
    pub fn new(graph: GraphDescription) -> Self {
        Self {
            graph,
            ..Self::default()
        }
    }

    pub fn with_view_id(mut self, view_id: impl Into<ViewId>) -> Self {
        self.view_id = Some(view_id.into());
        self
    }

    pub fn with_options(mut self, options: Configuration) -> Self {
        self.options = options;
        self
    }

    pub fn with_events(mut self, events: EventBindingMap) -> Self {
        self.events = events;
        self
    }
}

/// Controller lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerState {
    Unmounted,
    Mounting,
    Ready,
    Reconciling,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerState::Unmounted => "unmounted",
            ControllerState::Mounting => "mounting",
            ControllerState::Ready => "ready",
            ControllerState::Reconciling => "reconciling",
        };
        f.write_str(name)
    }
}

/// What a reconciliation pass did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationReport {
    pub pass_id: PassId,
    /// Node delta, present when the node list changed
    pub nodes: Option<NodeDiff>,
    /// Edge delta, present when the edge list changed
    pub edges: Option<EdgeDiff>,
    pub options_changed: bool,
    pub events_changed: bool,
}

impl ReconciliationReport {
    fn new(pass_id: PassId) -> Self {
        Self {
            pass_id,
            nodes: None,
            edges: None,
            options_changed: false,
            events_changed: false,
        }
    }

    /// True when the pass changed nothing in the collections or engine
    pub fn is_noop(&self) -> bool {
        self.nodes.as_ref().map_or(true, NodeDiff::is_empty)
            && self.edges.as_ref().map_or(true, EdgeDiff::is_empty)
            && !self.options_changed
            && !self.events_changed
    }
}

/// State held while mounted
struct LiveBinding<E, N, L> {
    engine: E,
    nodes: N,
    edges: L,
    graph: GraphDescription,
    options: Configuration,
    events: EventBindingMap,
}

impl<E, N, L> LiveBinding<E, N, L>
where
    E: RenderingEngine,
    N: LiveCollection<Node>,
    L: LiveCollection<Edge>,
{
    fn data(&self) -> DataView<'_> {
        DataView::new(&self.nodes, &self.edges)
    }

    /// Apply one validated update
    ///
    /// Each step commits its part of the snapshot only after it succeeds.
    /// When a patch step fails partway, that part of the snapshot is
    /// re-read from the live collection, so the next pass diffs against
    /// what the collection actually holds.
    fn reconcile(&mut self, props: ViewProps, pass_id: PassId) -> Result<ReconciliationReport> {
        let ViewProps {
            graph,
            options,
            events,
            ..
        } = props;
        let GraphDescription { nodes, edges } = graph;
        let mut report = ReconciliationReport::new(pass_id);

        if self.graph.nodes != nodes {
            let delta = diff_nodes(&self.graph.nodes, &nodes);
            if let Err(err) = apply_node_patch(&mut self.nodes, &delta) {
                self.graph.nodes = snapshot(&self.nodes);
                return Err(err);
            }
            self.graph.nodes = nodes;
            report.nodes = Some(delta);
        }

        if self.graph.edges != edges {
            let delta = diff_edges(&self.graph.edges, &edges);
            if let Err(err) = apply_edge_patch(&mut self.edges, &delta) {
                self.graph.edges = snapshot(&self.edges);
                return Err(err);
            }
            self.graph.edges = edges;
            report.edges = Some(delta);
        }

        if self.options != options {
            self.engine.set_options(&effective_configuration(&options))?;
            self.options = options;
            report.options_changed = true;
        }

        if self.events != events {
            events::rebind(&mut self.engine, &self.events, &events);
            self.events = events;
            report.events_changed = true;
        }

        let data = DataView::new(&self.nodes, &self.edges);
        self.engine.set_data(data)?;

        Ok(report)
    }
}

/// Owned copy of a live collection's current contents
fn snapshot<T, C>(collection: &C) -> Vec<T>
where
    T: Entity,
    C: LiveCollection<T>,
{
    collection.items().into_iter().cloned().collect()
}

/// Keeps one rendering engine in sync with successive view props
///
/// `N` and `L` are the live collection types; both default to the in-memory
/// [`DataSet`].
pub struct Controller<E, N = DataSet<Node>, L = DataSet<Edge>>
where
    E: RenderingEngine,
    N: LiveCollection<Node>,
    L: LiveCollection<Edge>,
{
    view_id: ViewId,
    state: ControllerState,
    live: Option<LiveBinding<E, N, L>>,
}

impl<E, N, L> Controller<E, N, L>
where
    E: RenderingEngine,
    N: LiveCollection<Node> + Default,
    L: LiveCollection<Edge> + Default,
{
    /// Mount a view
    ///
    /// # Errors
    ///
    /// - `ContainerNotFound` if the provider has no container for the view
    /// - validation errors if the initial description is malformed
    /// - `CollectionRejected` or `Engine` if seeding or construction fails
    ///
    /// No controller exists after a failed mount.
    pub fn mount<P>(provider: &P, props: ViewProps) -> Result<Self>
    where
        P: ContainerProvider<Container = E::Container>,
    {
        Self::mount_with_hook(provider, props, |_| {})
    }

    /// Mount a view, handing the freshly built engine to `on_ready` before
    /// events are bound
    ///
    /// # Errors
    ///
    /// Same as [`mount`](Self::mount).
    pub fn mount_with_hook<P, F>(provider: &P, props: ViewProps, on_ready: F) -> Result<Self>
    where
        P: ContainerProvider<Container = E::Container>,
        F: FnOnce(&mut E),
    {
        let started = Instant::now();
        let view_id = props.view_id.clone().unwrap_or_default();
        log_op_start!("mount", view_id = %view_id);

        match Self::build(provider, view_id.clone(), props, on_ready) {
            Ok(controller) => {
                log_op_end!(
                    "mount",
                    duration_ms = elapsed_ms(started),
                    view_id = %view_id,
                    nodes = controller.live.as_ref().map_or(0, |l| l.nodes.len()),
                    edges = controller.live.as_ref().map_or(0, |l| l.edges.len()),
                );
                Ok(controller)
            }
            Err(err) => {
                log_op_error!("mount", err.clone(), duration_ms = elapsed_ms(started), view_id = %view_id);
                Err(err)
            }
        }
    }

    fn build<P, F>(provider: &P, view_id: ViewId, props: ViewProps, on_ready: F) -> Result<Self>
    where
        P: ContainerProvider<Container = E::Container>,
        F: FnOnce(&mut E),
    {
        let container = provider
            .resolve(&view_id)
            .ok_or_else(|| GraphSyncError::ContainerNotFound {
                view_id: view_id.to_string(),
            })?;
        validate_description(&props.graph)?;

        let mut controller = Self {
            view_id,
            state: ControllerState::Mounting,
            live: None,
        };

        let mut nodes = N::default();
        let mut edges = L::default();
        apply_edge_patch(&mut edges, &diff_edges(&[], &props.graph.edges))?;
        apply_node_patch(&mut nodes, &diff_nodes(&[], &props.graph.nodes))?;

        let config = effective_configuration(&props.options);
        let mut engine = E::construct(container, DataView::new(&nodes, &edges), &config)?;
        on_ready(&mut engine);
        events::bind(&mut engine, &props.events);

        controller.live = Some(LiveBinding {
            engine,
            nodes,
            edges,
            graph: props.graph,
            options: props.options,
            events: props.events,
        });
        controller.state = ControllerState::Ready;
        Ok(controller)
    }
}

impl<E, N, L> Controller<E, N, L>
where
    E: RenderingEngine,
    N: LiveCollection<Node>,
    L: LiveCollection<Edge>,
{
    /// Reconcile the view with new props
    ///
    /// The description is validated before anything is touched. Steps then
    /// run in order: nodes, edges, configuration, events, data refresh. A
    /// step whose input is unchanged is skipped.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the controller is not `Ready`
    /// - `ViewIdMismatch` if the props name a different view
    /// - validation errors for a malformed description (nothing applied)
    /// - `CollectionRejected` or `Engine` from the failing step; completed
    ///   steps stay applied and the controller returns to `Ready`
    pub fn update(&mut self, props: ViewProps) -> Result<ReconciliationReport> {
        let started = Instant::now();
        let pass_id = PassId::new();
        log_op_start!("reconcile", view_id = %self.view_id, pass_id = %pass_id);

        match self.reconcile(props, pass_id.clone()) {
            Ok(report) => {
                let nodes = report.nodes.clone().unwrap_or_default();
                let edges = report.edges.clone().unwrap_or_default();
                log_op_end!(
                    "reconcile",
                    duration_ms = elapsed_ms(started),
                    view_id = %self.view_id,
                    pass_id = %pass_id,
                    nodes_added = nodes.added.len(),
                    nodes_removed = nodes.removed.len(),
                    nodes_changed = nodes.changed.len(),
                    edges_added = edges.added.len(),
                    edges_removed = edges.removed.len(),
                    options_changed = report.options_changed,
                    events_changed = report.events_changed,
                );
                Ok(report)
            }
            Err(err) => {
                log_op_error!(
                    "reconcile",
                    err.clone(),
                    duration_ms = elapsed_ms(started),
                    view_id = %self.view_id,
                    pass_id = %pass_id,
                );
                Err(err)
            }
        }
    }

    fn reconcile(&mut self, props: ViewProps, pass_id: PassId) -> Result<ReconciliationReport> {
        let live = match (self.state, self.live.as_mut()) {
            (ControllerState::Ready, Some(live)) => live,
            _ => {
                return Err(GraphSyncError::InvalidState {
                    op: "update".to_string(),
                    state: self.state.to_string(),
                })
            }
        };

        if let Some(supplied) = &props.view_id {
            if supplied != &self.view_id {
                return Err(GraphSyncError::ViewIdMismatch {
                    mounted: self.view_id.to_string(),
                    supplied: supplied.to_string(),
                });
            }
        }

        validate_description(&props.graph)?;

        self.state = ControllerState::Reconciling;
        let outcome = live.reconcile(props, pass_id);
        self.state = ControllerState::Ready;
        outcome
    }

    /// Release the engine and both live collections
    ///
    /// Event handlers are unsubscribed before the engine is dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the controller is already unmounted.
    pub fn unmount(&mut self) -> Result<()> {
        let Some(mut live) = self.live.take() else {
            return Err(GraphSyncError::InvalidState {
                op: "unmount".to_string(),
                state: self.state.to_string(),
            });
        };
        let started = Instant::now();
        log_op_start!("unmount", view_id = %self.view_id);

        events::unbind(&mut live.engine, &live.events);
        drop(live);
        self.state = ControllerState::Unmounted;

        log_op_end!("unmount", duration_ms = elapsed_ms(started), view_id = %self.view_id);
        Ok(())
    }

    pub fn view_id(&self) -> &ViewId {
        &self.view_id
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The rendering engine, while mounted
    pub fn engine(&self) -> Option<&E> {
        self.live.as_ref().map(|l| &l.engine)
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.live.as_mut().map(|l| &mut l.engine)
    }

    pub fn nodes(&self) -> Option<&N> {
        self.live.as_ref().map(|l| &l.nodes)
    }

    pub fn edges(&self) -> Option<&L> {
        self.live.as_ref().map(|l| &l.edges)
    }

    /// Borrowed view of both collections, while mounted
    pub fn data(&self) -> Option<DataView<'_>> {
        self.live.as_ref().map(LiveBinding::data)
    }

    /// The last successfully applied description
    pub fn description(&self) -> Option<&GraphDescription> {
        self.live.as_ref().map(|l| &l.graph)
    }

    /// The user configuration last pushed to the engine (before merging)
    pub fn options(&self) -> Option<&Configuration> {
        self.live.as_ref().map(|l| &l.options)
    }
}

impl<E, N, L> Drop for Controller<E, N, L>
where
    E: RenderingEngine,
    N: LiveCollection<Node>,
    L: LiveCollection<Edge>,
{
    fn drop(&mut self) {
        if let Some(mut live) = self.live.take() {
            events::unbind(&mut live.engine, &live.events);
        }
    }
}

impl<E, N, L> fmt::Debug for Controller<E, N, L>
where
    E: RenderingEngine,
    N: LiveCollection<Node>,
    L: LiveCollection<Edge>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("view_id", &self.view_id)
            .field("state", &self.state)
            .field("nodes", &self.nodes().map(|n| n.len()))
            .field("edges", &self.edges().map(|e| e.len()))
            .finish()
    }
}
