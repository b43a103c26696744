//! Graph description rules
//!
//! `invariants` finds every violation of a kind; `validation` turns the
//! first violation into an error before anything is mutated.

pub mod invariants;
pub mod validation;

pub use validation::validate_description;
