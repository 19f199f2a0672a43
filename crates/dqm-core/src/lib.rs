//! # dqm-core
//!
//! Foundation crate for the DQM monitoring-element engine.
//! Defines the aggregate and registry traits, the quality-report model,
//! snapshots used for soft resets, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::DqmConfig;
pub use errors::{DqmError, DqmResult, RegistryError};
pub use models::{
    AggregateKind, AggregateSnapshot, Axis, BinIndex, FillPoint, QualityReport, QualityStatus,
};
pub use traits::{AggregateView, ElementInfo, QualityTestRegistry, StatisticalAggregate};
