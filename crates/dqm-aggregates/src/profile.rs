//! Profiles: mean and spread of y in bins of x.

use dqm_core::models::{AxisSpec, BinnedContents};
use dqm_core::{
    AggregateKind, AggregateSnapshot, AggregateView, Axis, BinIndex, DqmError, DqmResult,
    FillPoint, StatisticalAggregate,
};

use crate::labels::AxisLabels;

/// 1-D profile. Entries with y outside `[y_min, y_max]` are ignored.
#[derive(Debug, Clone)]
pub struct Profile {
    contents: BinnedContents,
    labels: AxisLabels,
}

impl Profile {
    pub fn new(nbins: usize, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> DqmResult<Self> {
        Ok(Self {
            contents: BinnedContents::profile(AxisSpec::new(nbins, x_min, x_max)?, y_min, y_max)?,
            labels: AxisLabels::default(),
        })
    }

    pub fn contents(&self) -> &BinnedContents {
        &self.contents
    }

    pub fn bin_label(&self, bin: usize) -> Option<&str> {
        self.labels.get(bin, Axis::X)
    }
}

delegate_binned_view!(Profile, contents);

impl StatisticalAggregate for Profile {
    /// `(x, y)` or `(x, y, w)`.
    fn fill(&mut self, point: FillPoint) -> DqmResult<()> {
        let (x, y, w) = match point {
            FillPoint::Two(x, y) => (x, y, 1.0),
            FillPoint::Three(x, y, w) => (x, y, w),
            other => {
                return Err(DqmError::UnsupportedFill {
                    kind: AggregateKind::Profile,
                    arity: other.arity(),
                })
            }
        };
        let cell = self.contents.locate(&[x])?;
        self.contents.accumulate_profile(cell, y, w)?;
        Ok(())
    }

    fn set_bin_content(&mut self, bin: BinIndex, content: f64) -> DqmResult<()> {
        let cell = self.contents.cell(bin)?;
        self.contents.set_content(cell, content);
        Ok(())
    }

    fn set_bin_error(&mut self, bin: BinIndex, error: f64) -> DqmResult<()> {
        let cell = self.contents.cell(bin)?;
        self.contents.set_error(cell, error)
    }

    fn set_entries(&mut self, entries: f64) -> DqmResult<()> {
        self.contents.set_entries(entries);
        Ok(())
    }

    fn set_bin_label(&mut self, bin: usize, label: &str, axis: Axis) -> DqmResult<()> {
        self.labels.set(&self.contents, bin, label, axis)
    }

    fn set_axis_range(&mut self, min: f64, max: f64, axis: Axis) -> DqmResult<()> {
        self.contents.axis_spec_mut(axis)?.set_range(min, max);
        Ok(())
    }

    fn reset(&mut self) {
        self.contents.clear();
    }

    fn snapshot(&self) -> AggregateSnapshot {
        AggregateSnapshot::Binned(self.contents.clone())
    }

    fn value_string(&self) -> String {
        String::new()
    }
}
