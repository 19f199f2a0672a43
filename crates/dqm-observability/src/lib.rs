//! # dqm-observability
//!
//! Subscriber setup and span helpers for the `tracing` events the element
//! crates emit, plus [`HarvestSummary`]: the per-element status roll-up a
//! harvester publishes after a quality-test pass over a folder tree.

pub mod harvest;
pub mod tracing_setup;

pub use harvest::HarvestSummary;
pub use tracing_setup::init;
