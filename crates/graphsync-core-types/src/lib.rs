//! Core types shared across GraphSync facilities
//!
//! This crate provides foundational types used by both the reconciliation
//! core and its logging facility:
//!
//! - **Correlation types**: ViewId, PassId
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{PassId, ViewId};
