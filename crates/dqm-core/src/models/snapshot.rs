use serde::{Deserialize, Serialize};

use crate::errors::{DqmError, DqmResult};
use crate::models::{AggregateKind, Axis, BinIndex, BinnedContents, ScalarValue};
use crate::traits::AggregateView;

/// Point-in-time copy of an aggregate's contents, used as the soft-reset
/// baseline and as the view quality tests see while soft reset is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateSnapshot {
    Binned(BinnedContents),
    Scalar(ScalarValue),
}

impl AggregateSnapshot {
    /// Contents accumulated since `baseline` was taken. Scalars have no
    /// delta form and are returned unchanged.
    pub fn delta(&self, baseline: &AggregateSnapshot) -> DqmResult<AggregateSnapshot> {
        match (self, baseline) {
            (Self::Binned(current), Self::Binned(base)) => Ok(Self::Binned(current.minus(base)?)),
            (Self::Scalar(value), Self::Scalar(_)) => Ok(Self::Scalar(value.clone())),
            _ => Err(DqmError::ShapeMismatch {
                reason: "baseline and current contents are different aggregate kinds".into(),
            }),
        }
    }

    fn binned(&self, operation: &'static str) -> DqmResult<&BinnedContents> {
        match self {
            Self::Binned(contents) => Ok(contents),
            Self::Scalar(_) => Err(DqmError::unsupported(AggregateKind::Scalar, operation)),
        }
    }
}

impl AggregateView for AggregateSnapshot {
    fn kind(&self) -> AggregateKind {
        match self {
            Self::Binned(contents) => contents.kind(),
            Self::Scalar(_) => AggregateKind::Scalar,
        }
    }

    fn entries(&self) -> DqmResult<f64> {
        self.binned("entries")?.entries()
    }

    fn n_bins(&self, axis: Axis) -> DqmResult<usize> {
        self.binned("n_bins")?.n_bins(axis)
    }

    fn bin_center(&self, axis: Axis, bin: usize) -> DqmResult<f64> {
        self.binned("bin_center")?.bin_center(axis, bin)
    }

    fn bin_content(&self, bin: BinIndex) -> DqmResult<f64> {
        self.binned("bin_content")?.bin_content(bin)
    }

    fn bin_error(&self, bin: BinIndex) -> DqmResult<f64> {
        self.binned("bin_error")?.bin_error(bin)
    }

    fn bin_entries(&self, bin: usize) -> DqmResult<f64> {
        self.binned("bin_entries")?.bin_entries(bin)
    }

    fn mean(&self, axis: Axis) -> DqmResult<f64> {
        self.binned("mean")?.mean(axis)
    }

    fn mean_error(&self, axis: Axis) -> DqmResult<f64> {
        self.binned("mean_error")?.mean_error(axis)
    }

    fn rms(&self, axis: Axis) -> DqmResult<f64> {
        self.binned("rms")?.rms(axis)
    }

    fn rms_error(&self, axis: Axis) -> DqmResult<f64> {
        self.binned("rms_error")?.rms_error(axis)
    }

    fn y_min(&self) -> DqmResult<f64> {
        self.binned("y_min")?.y_min()
    }

    fn y_max(&self) -> DqmResult<f64> {
        self.binned("y_max")?.y_max()
    }
}
