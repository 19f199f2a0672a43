mod aggregate_kind;
mod binned;
mod coordinates;
mod quality_report;
mod scalar_value;
mod snapshot;

pub use aggregate_kind::AggregateKind;
pub use binned::{AxisSpec, BinnedContents, Moments};
pub use coordinates::{Axis, BinIndex, FillPoint};
pub use quality_report::{QualityReport, QualityStatus};
pub use scalar_value::ScalarValue;
pub use snapshot::AggregateSnapshot;
