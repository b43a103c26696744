#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{graph, Containers, PickyNodes, RecordingEngine};
use graphsync_core::errors::GraphSyncError;
use graphsync_core::logging_facility::test_capture::init_test_capture;
use graphsync_core::{log_op_end, log_op_error, log_op_start, Controller, Node, ViewProps};
use graphsync_core::GraphDescription;
use graphsync_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMPONENT, FIELD_DURATION_MS,
    FIELD_EDGES_ADDED, FIELD_EDGES_REMOVED, FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_NODES_ADDED,
    FIELD_NODES_CHANGED, FIELD_NODES_REMOVED, FIELD_PASS_ID, FIELD_VIEW_ID,
};
use tracing::Level;

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = GraphSyncError::ContainerNotFound {
        view_id: "nowhere".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event");

    assert_eq!(error_event.level, Level::ERROR);
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_MOUNT"));
    assert_eq!(error_event.field(FIELD_ERR_KIND), Some("Mount"));
}

#[test]
fn test_mount_and_reconcile_emit_boundaries() {
    let capture = init_test_capture();
    let view = "log-view-lifecycle";

    // GIVEN a mounted view
    let mut controller: Controller<RecordingEngine> = Controller::mount(
        &Containers::of(&[view]),
        ViewProps::new(graph(&[1, 2], &[(1, 2)])).with_view_id(view),
    )
    .unwrap();

    // WHEN it is reconciled with one node added
    let report = controller
        .update(ViewProps::new(graph(&[1, 2, 3], &[(1, 2)])))
        .unwrap();
    controller.unmount().unwrap();

    // THEN mount start and end were logged for this view
    assert_eq!(capture.find("mount", EVENT_START, FIELD_VIEW_ID, view).len(), 1);
    let mount_end = capture.find("mount", EVENT_END, FIELD_VIEW_ID, view);
    assert_eq!(mount_end.len(), 1);
    assert_eq!(mount_end[0].field("nodes"), Some("2"));

    // AND the reconcile end carries the pass id and delta counts
    let pass_id = report.pass_id.to_string();
    let reconcile_end = capture.find("reconcile", EVENT_END, FIELD_PASS_ID, &pass_id);
    assert_eq!(reconcile_end.len(), 1);
    assert_eq!(reconcile_end[0].field(FIELD_VIEW_ID), Some(view));
    assert_eq!(reconcile_end[0].field(FIELD_NODES_ADDED), Some("1"));
    assert_eq!(reconcile_end[0].field(FIELD_EDGES_ADDED), Some("0"));
    assert!(reconcile_end[0].field(FIELD_DURATION_MS).is_some());

    // AND unmount was logged
    assert_eq!(capture.find("unmount", EVENT_END, FIELD_VIEW_ID, view).len(), 1);
}

#[test]
fn test_failed_reconcile_emits_end_error() {
    let capture = init_test_capture();
    let view = "log-view-reject";

    let mut controller: Controller<RecordingEngine, PickyNodes> = Controller::mount(
        &Containers::of(&[view]),
        ViewProps::new(graph(&[1], &[])).with_view_id(view),
    )
    .unwrap();

    let poisoned = GraphDescription::new(vec![Node::new(1).with("poison", true)], vec![]);
    assert!(controller.update(ViewProps::new(poisoned)).is_err());

    let errors = capture.find("reconcile", EVENT_END_ERROR, FIELD_VIEW_ID, view);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_RECONCILIATION"));
    assert!(capture.find("reconcile", EVENT_END, FIELD_VIEW_ID, view).is_empty());
}

#[test]
fn test_failed_mount_emits_end_error() {
    let capture = init_test_capture();
    let view = "log-view-missing";

    let result: Result<Controller<RecordingEngine>, _> = Controller::mount(
        &Containers::of(&[]),
        ViewProps::new(graph(&[1], &[])).with_view_id(view),
    );
    assert!(result.is_err());

    let errors = capture.find("mount", EVENT_END_ERROR, FIELD_VIEW_ID, view);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_MOUNT"));
}

#[test]
fn test_reconcile_end_carries_every_delta_field() {
    let capture = init_test_capture();
    let view = "log-view-delta-fields";

    let mut controller: Controller<RecordingEngine> = Controller::mount(
        &Containers::of(&[view]),
        ViewProps::new(graph(&[1, 2, 3], &[(1, 2), (2, 3)])).with_view_id(view),
    )
    .unwrap();

    // Drop node 3 and edge 2->3, relabel node 1
    let mut next = graph(&[1, 2], &[(1, 2)]);
    next.nodes[0] = Node::new(1).with("label", "renamed");
    let report = controller.update(ViewProps::new(next)).unwrap();

    let end = capture.find("reconcile", EVENT_END, FIELD_PASS_ID, &report.pass_id.to_string());
    assert_eq!(end.len(), 1);
    let event = &end[0];
    assert!(event.field(FIELD_COMPONENT).is_some());
    assert_eq!(event.field(FIELD_NODES_ADDED), Some("0"));
    assert_eq!(event.field(FIELD_NODES_REMOVED), Some("1"));
    assert_eq!(event.field(FIELD_NODES_CHANGED), Some("1"));
    assert_eq!(event.field(FIELD_EDGES_ADDED), Some("0"));
    assert_eq!(event.field(FIELD_EDGES_REMOVED), Some("1"));
}
