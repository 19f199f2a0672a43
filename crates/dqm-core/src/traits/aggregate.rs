use std::fmt;

use crate::errors::{DqmError, DqmResult};
use crate::models::{AggregateKind, AggregateSnapshot, Axis, BinIndex, FillPoint};

/// Read-only statistics of an aggregate. Quality tests only ever see this.
pub trait AggregateView {
    fn kind(&self) -> AggregateKind;

    /// Number of entries (fills), not the sum of weights.
    fn entries(&self) -> DqmResult<f64>;

    fn n_bins(&self, axis: Axis) -> DqmResult<usize>;

    fn bin_center(&self, axis: Axis, bin: usize) -> DqmResult<f64>;

    fn bin_content(&self, bin: BinIndex) -> DqmResult<f64>;

    /// Uncertainty on a bin's content.
    fn bin_error(&self, bin: BinIndex) -> DqmResult<f64>;

    /// Sum of weights in a profile bin.
    fn bin_entries(&self, bin: usize) -> DqmResult<f64>;

    fn mean(&self, axis: Axis) -> DqmResult<f64>;

    fn mean_error(&self, axis: Axis) -> DqmResult<f64>;

    fn rms(&self, axis: Axis) -> DqmResult<f64>;

    fn rms_error(&self, axis: Axis) -> DqmResult<f64>;

    /// Lower y limit of a profile.
    fn y_min(&self) -> DqmResult<f64>;

    /// Upper y limit of a profile.
    fn y_max(&self) -> DqmResult<f64>;
}

/// Capability set a monitoring element drives: fills, setters, reset and
/// snapshotting on top of the read-only view.
pub trait StatisticalAggregate: AggregateView + Send + fmt::Debug {
    /// Fill by arity; see [`FillPoint`].
    fn fill(&mut self, point: FillPoint) -> DqmResult<()>;

    fn set_bin_content(&mut self, bin: BinIndex, content: f64) -> DqmResult<()>;

    fn set_bin_error(&mut self, bin: BinIndex, error: f64) -> DqmResult<()>;

    fn set_entries(&mut self, entries: f64) -> DqmResult<()>;

    fn set_bin_label(&mut self, bin: usize, label: &str, axis: Axis) -> DqmResult<()>;

    /// Restrict the visible range of an axis; statistics follow it.
    fn set_axis_range(&mut self, min: f64, max: f64, axis: Axis) -> DqmResult<()>;

    /// Replace a text value. Only string scalars hold text.
    fn set_text(&mut self, _text: &str) -> DqmResult<()> {
        Err(DqmError::unsupported(self.kind(), "set_text"))
    }

    /// Clear contents, errors and entries.
    fn reset(&mut self);

    fn snapshot(&self) -> AggregateSnapshot;

    /// Scalar representation, e.g. `"f = 3.14159"`; empty for binned kinds.
    fn value_string(&self) -> String;
}

/// Lets `&dyn StatisticalAggregate` (or any borrowed view) be passed where a
/// `&dyn AggregateView` is expected.
impl<T: AggregateView + ?Sized> AggregateView for &T {
    fn kind(&self) -> AggregateKind {
        (**self).kind()
    }

    fn entries(&self) -> DqmResult<f64> {
        (**self).entries()
    }

    fn n_bins(&self, axis: Axis) -> DqmResult<usize> {
        (**self).n_bins(axis)
    }

    fn bin_center(&self, axis: Axis, bin: usize) -> DqmResult<f64> {
        (**self).bin_center(axis, bin)
    }

    fn bin_content(&self, bin: BinIndex) -> DqmResult<f64> {
        (**self).bin_content(bin)
    }

    fn bin_error(&self, bin: BinIndex) -> DqmResult<f64> {
        (**self).bin_error(bin)
    }

    fn bin_entries(&self, bin: usize) -> DqmResult<f64> {
        (**self).bin_entries(bin)
    }

    fn mean(&self, axis: Axis) -> DqmResult<f64> {
        (**self).mean(axis)
    }

    fn mean_error(&self, axis: Axis) -> DqmResult<f64> {
        (**self).mean_error(axis)
    }

    fn rms(&self, axis: Axis) -> DqmResult<f64> {
        (**self).rms(axis)
    }

    fn rms_error(&self, axis: Axis) -> DqmResult<f64> {
        (**self).rms_error(axis)
    }

    fn y_min(&self) -> DqmResult<f64> {
        (**self).y_min()
    }

    fn y_max(&self) -> DqmResult<f64> {
        (**self).y_max()
    }
}
