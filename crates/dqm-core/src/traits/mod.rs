pub mod aggregate;
pub mod registry;

pub use aggregate::{AggregateView, StatisticalAggregate};
pub use registry::{ElementInfo, QualityTestRegistry};
