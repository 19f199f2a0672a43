//! Fixed-width histograms with one to three axes.

use dqm_core::models::{AxisSpec, BinnedContents};
use dqm_core::{
    AggregateSnapshot, AggregateView, Axis, BinIndex, DqmError, DqmResult, FillPoint,
    StatisticalAggregate,
};

use crate::labels::AxisLabels;

/// Weighted histogram with underflow/overflow bins on every axis.
#[derive(Debug, Clone)]
pub struct Histogram {
    contents: BinnedContents,
    labels: AxisLabels,
}

impl Histogram {
    pub fn new(axes: Vec<AxisSpec>) -> DqmResult<Self> {
        Ok(Self {
            contents: BinnedContents::histogram(axes)?,
            labels: AxisLabels::default(),
        })
    }

    pub fn new_1d(nbins: usize, min: f64, max: f64) -> DqmResult<Self> {
        Self::new(vec![AxisSpec::new(nbins, min, max)?])
    }

    pub fn new_2d(x: AxisSpec, y: AxisSpec) -> DqmResult<Self> {
        Self::new(vec![x, y])
    }

    pub fn new_3d(x: AxisSpec, y: AxisSpec, z: AxisSpec) -> DqmResult<Self> {
        Self::new(vec![x, y, z])
    }

    pub fn contents(&self) -> &BinnedContents {
        &self.contents
    }

    pub fn bin_label(&self, bin: usize, axis: Axis) -> Option<&str> {
        self.labels.get(bin, axis)
    }

    /// Split a fill into coordinates and weight according to dimensionality.
    fn coordinates(&self, point: FillPoint) -> DqmResult<([f64; 3], f64)> {
        let coords = match (self.contents.dimension(), point) {
            (1, FillPoint::One(x)) => ([x, 0.0, 0.0], 1.0),
            (1, FillPoint::Two(x, w)) => ([x, 0.0, 0.0], w),
            (2, FillPoint::Two(x, y)) => ([x, y, 0.0], 1.0),
            (2, FillPoint::Three(x, y, w)) => ([x, y, 0.0], w),
            (3, FillPoint::Three(x, y, z)) => ([x, y, z], 1.0),
            (3, FillPoint::Four(x, y, z, w)) => ([x, y, z], w),
            _ => {
                return Err(DqmError::UnsupportedFill {
                    kind: self.kind(),
                    arity: point.arity(),
                })
            }
        };
        Ok(coords)
    }
}

delegate_binned_view!(Histogram, contents);

impl StatisticalAggregate for Histogram {
    fn fill(&mut self, point: FillPoint) -> DqmResult<()> {
        let (coords, w) = self.coordinates(point)?;
        let cell = self.contents.locate(&coords[..self.contents.dimension()])?;
        self.contents.accumulate(cell, w);
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
