//! Description Validation Tests
//!
//! Malformed descriptions are rejected with the first violation in check
//! order: duplicate node id, dangling edge, duplicate edge key.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use graphsync_core::rules::validate_description;
use graphsync_core::{Edge, GraphDescription, GraphSyncError, Node};

#[test]
fn test_well_formed_description_passes() {
    let graph = common::graph(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
    assert!(validate_description(&graph).is_ok());
}

#[test]
fn test_empty_description_passes() {
    assert!(validate_description(&GraphDescription::default()).is_ok());
}

#[test]
fn test_self_loop_passes() {
    let graph = common::graph(&[1], &[(1, 1)]);
    assert!(validate_description(&graph).is_ok());
}

#[test]
fn test_dangling_edge_names_missing_endpoint() {
    // GIVEN an edge into node 9, which does not exist
    let graph = common::graph(&[1, 2], &[(1, 2), (2, 9)]);

    // WHEN validated
    let err = validate_description(&graph).unwrap_err();

    // THEN the missing endpoint is reported
    assert_eq!(
        err,
        GraphSyncError::DanglingEdge {
            from: "2".to_string(),
            to: "9".to_string(),
            node_id: "9".to_string(),
        }
    );
}

#[test]
fn test_duplicate_node_checked_before_dangling_edge() {
    let graph = GraphDescription::new(
        vec![Node::new(1), Node::new(1)],
        vec![Edge::new(1, 7)],
    );

    let err = validate_description(&graph).unwrap_err();

    assert!(matches!(err, GraphSyncError::DuplicateNodeId { .. }));
}

#[test]
fn test_duplicate_explicit_edge_id_rejected() {
    let graph = GraphDescription::new(
        common::nodes(&[1, 2, 3]),
        vec![
            Edge::new(1, 2).with_id("e"),
            Edge::new(2, 3).with_id("e"),
        ],
    );

    let err = validate_description(&graph).unwrap_err();

    assert_eq!(
        err,
        GraphSyncError::DuplicateEdgeId {
            edge_id: "e".to_string()
        }
    );
}

#[test]
fn test_identical_anonymous_edges_rejected() {
    let graph = common::graph(&[1, 2], &[(1, 2), (1, 2)]);

    let err = validate_description(&graph).unwrap_err();

    assert!(matches!(err, GraphSyncError::DuplicateEdge { .. }));
}

#[test]
fn test_parallel_edges_with_different_attributes_pass() {
    let graph = GraphDescription::new(
        common::nodes(&[1, 2]),
        vec![
            Edge::new(1, 2).with("label", "a"),
            Edge::new(1, 2).with("label", "b"),
        ],
    );

    assert!(validate_description(&graph).is_ok());
}
