//! Bin labels per axis.

use std::collections::BTreeMap;

use dqm_core::models::BinnedContents;
use dqm_core::{Axis, DqmError, DqmResult};

/// Labels attached to individual bins, keyed by axis then bin number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisLabels {
    labels: BTreeMap<(Axis, usize), String>,
}

impl AxisLabels {
    /// Label a regular bin (1..=nbins) of an existing axis.
    pub fn set(
        &mut self,
        contents: &BinnedContents,
        bin: usize,
        label: &str,
        axis: Axis,
    ) -> DqmResult<()> {
        let nbins = contents.axis_spec(axis)?.nbins();
        if bin == 0 || bin > nbins {
            return Err(DqmError::BinOutOfRange {
                axis,
                bin,
                max: nbins,
            });
        }
        self.labels.insert((axis, bin), label.to_string());
        Ok(())
    }

    pub fn get(&self, bin: usize, axis: Axis) -> Option<&str> {
        self.labels.get(&(axis, bin)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
