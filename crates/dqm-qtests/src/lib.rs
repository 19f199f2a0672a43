//! # dqm-qtests
//!
//! Quality-test registry for monitoring elements. Named tests wrap a
//! [`QualityCriterion`] and per-test status thresholds; glob patterns over
//! element names decide which tests run where.
//!
//! ```toml
//! [[test]]
//! name = "occupancy_range"
//! min_entries = 100
//! [test.criterion]
//! algorithm = "contents_x_range"
//! xmin = 0.0
//! xmax = 50.0
//!
//! [[assign]]
//! pattern = "tracker/*"
//! tests = ["occupancy_range"]
//! ```

pub mod criteria;
pub mod definitions;
pub mod registry;

pub use criteria::{CriterionDef, Evaluation, QualityCriterion};
pub use quality_test::{status_for, QualityTest};
pub use registry::QTestRegistry;
