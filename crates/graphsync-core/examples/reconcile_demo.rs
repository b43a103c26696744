//! Reconciliation Demonstration
//!
//! Drives a console "engine" through a mount, three updates and an unmount,
//! printing what reaches the engine at each step.
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Key concepts illustrated:
//! 1. Node identity by id (relabel is an update)
//! 2. Edge identity by whole value (recolour is remove + add)
//! 3. Deep-merged configuration over defaults
//! 4. Event rebinding

use graphsync_core::logging_facility::{init, Profile};
use graphsync_core::{
    Configuration, ContainerProvider, Controller, DataView, Edge, EventBindingMap, EventHandler,
    EventTarget, GraphDescription, Node, RenderingEngine, Result, ViewProps,
};
use graphsync_core_types::ViewId;
use serde_json::json;

struct ConsoleEngine {
    container: String,
    handlers: Vec<(String, EventHandler)>,
}

impl EventTarget for ConsoleEngine {
    fn on(&mut self, name: &str, handler: &EventHandler) {
        println!("  [{}] on({})", self.container, name);
        self.handlers.push((name.to_string(), handler.clone()));
    }

    fn off(&mut self, name: &str, handler: &EventHandler) {
        println!("  [{}] off({})", self.container, name);
        self.handlers
            .retain(|(n, h)| !(n == name && h.same_as(handler)));
    }
}

impl RenderingEngine for ConsoleEngine {
    type Container = String;

    fn construct(container: String, data: DataView<'_>, config: &Configuration) -> Result<Self> {
        println!(
            "  [{}] construct: {} nodes, {} edges, edge colour {}",
            container,
            data.nodes.len(),
            data.edges.len(),
            config.edge_color().cloned().unwrap_or_default()
        );
        Ok(Self {
            container,
            handlers: Vec::new(),
        })
    }

    fn set_options(&mut self, config: &Configuration) -> Result<()> {
        println!("  [{}] set_options: {}", self.container, config.to_value());
        Ok(())
    }

    fn set_data(&mut self, data: DataView<'_>) -> Result<()> {
        let labels: Vec<String> = data
            .node_snapshot()
            .iter()
            .map(|n| format!("{}={}", n.id, n.attribute("label").cloned().unwrap_or_default()))
            .collect();
        println!(
            "  [{}] set_data: nodes [{}], {} edges",
            self.container,
            labels.join(", "),
            data.edges.len()
        );
        Ok(())
    }
}

struct Page;

impl ContainerProvider for Page {
    type Container = String;

    fn resolve(&self, view_id: &ViewId) -> Option<String> {
        Some(format!("#{}", view_id))
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);
    println!("=== GraphSync Reconciliation Demo ===\n");

    let graph = GraphDescription::new(
        vec![Node::new(1).with("label", "A"), Node::new(2).with("label", "B")],
        vec![Edge::new(1, 2).with("color", "red")],
    );

    // ===== Part 1: Mount =====
    println!("## Part 1: Mount\n");
    let clicks = EventBindingMap::new().with(
        "click",
        EventHandler::new(|payload| println!("  click handler got {}", payload)),
    );
    let mut controller: Controller<ConsoleEngine> = Controller::mount(
        &Page,
        ViewProps::new(graph.clone())
            .with_view_id("demo")
            .with_events(clicks.clone()),
    )?;
    println!("✓ Mounted view '{}'\n", controller.view_id());

    // ===== Part 2: Relabel a node and add another =====
    println!("## Part 2: Node update\n");
    let mut next = graph.clone();
    next.nodes[0] = Node::new(1).with("label", "A'");
    next.nodes.push(Node::new(3).with("label", "C"));
    let report = controller.update(ViewProps::new(next.clone()).with_events(clicks.clone()))?;
    let nodes = report.nodes.unwrap_or_default();
    println!(
        "✓ added {}, changed {}, removed {}\n",
        nodes.added.len(),
        nodes.changed.len(),
        nodes.removed.len()
    );

    // ===== Part 3: Recolour an edge and override options =====
    println!("## Part 3: Edge recolour + options\n");
    next.edges[0] = Edge::new(1, 2).with("color", "blue");
    let options = Configuration::empty().with("edges.width", json!(2))?;
    let report = controller.update(
        ViewProps::new(next.clone())
            .with_options(options.clone())
            .with_events(clicks.clone()),
    )?;
    let edges = report.edges.unwrap_or_default();
    println!(
        "✓ edge removed {}, added {} (never updated in place)\n",
        edges.removed.len(),
        edges.added.len()
    );

    // ===== Part 4: Swap event handlers =====
    println!("## Part 4: Event rebind\n");
    let selects = EventBindingMap::new().with(
        "select",
        EventHandler::new(|payload| println!("  select handler got {}", payload)),
    );
    controller.update(
        ViewProps::new(next)
            .with_options(options)
            .with_events(selects),
    )?;
    if let Some(engine) = controller.engine() {
        for (name, handler) in &engine.handlers {
            handler.call(&json!({ "event": name, "nodes": [1] }));
        }
    }
    println!();

    // ===== Part 5: Unmount =====
    println!("## Part 5: Unmount\n");
    controller.unmount()?;
    println!("✓ Unmounted; state is {}", controller.state());

    Ok(())
}
