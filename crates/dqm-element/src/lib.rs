//! # dqm-element
//!
//! The monitoring element: a lock-guarded wrapper around a statistical
//! aggregate that tracks changes per monitoring cycle, decides between
//! clearing, accumulating and soft-resetting at cycle boundaries, and keeps
//! the classified results of its quality tests.
//!
//! ## Pieces
//! - [`MonitoringElement`]: fills, setters, getters and lifecycle transitions
//! - [`ClassificationIndex`]: error / warning / other buckets over the report map
//! - [`SoftResetPolicy`]: which getters read baseline-relative values
//! - [`Node`] / [`Folder`]: container hierarchy with recursive queries

pub mod classification;
pub mod element;
pub mod node;
pub mod policy;
pub mod quality;

pub use classification::ClassificationIndex;
pub use element::{CycleOutcome, MonitoringElement};
pub use node::{Folder, FolderRun, Node};
pub use policy::{Getter, SoftResetPolicy};
pub use quality::QualityRun;
