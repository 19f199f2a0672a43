//! Bin storage and statistics shared by histograms, profiles and their
//! soft-reset baselines.
//!
//! Contents are kept as raw accumulators (sum of weights, sum of squared
//! weights, and for profiles the per-bin sums of `w*y` and `w*y^2`), so that
//! subtracting a baseline yields exactly the accumulators of the fills made
//! since the baseline was taken. Mean and RMS are derived from bin centres
//! over the visible axis range, never stored.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_DIMENSIONS;
use crate::errors::{DqmError, DqmResult};
use crate::models::{AggregateKind, Axis, BinIndex};
use crate::traits::AggregateView;

/// Fixed-width binning of one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    nbins: usize,
    min: f64,
    max: f64,
    /// Visible window (first, last), 1-based inclusive. `None` = all bins.
    range: Option<(usize, usize)>,
}

impl AxisSpec {
    pub fn new(nbins: usize, min: f64, max: f64) -> DqmResult<Self> {
        if nbins == 0 {
            return Err(DqmError::InvalidDefinition {
                reason: "axis needs at least one bin".into(),
            });
        }
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(DqmError::InvalidDefinition {
                reason: format!("axis limits [{min}, {max}) are not an increasing finite interval"),
            });
        }
        Ok(Self {
            nbins,
            min,
            max,
            range: None,
        })
    }

    pub fn nbins(&self) -> usize {
        self.nbins
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn width(&self) -> f64 {
        (self.max - self.min) / self.nbins as f64
    }

    /// Bin holding `x`: 0 below range, `nbins + 1` at or above the upper
    /// edge (NaN goes to overflow).
    pub fn find_bin(&self, x: f64) -> usize {
        if x.is_nan() || x >= self.max {
            return self.nbins + 1;
        }
        if x < self.min {
            return 0;
        }
        let bin = ((x - self.min) / self.width()) as usize + 1;
        bin.min(self.nbins)
    }

    pub fn bin_center(&self, bin: usize) -> f64 {
        self.min + (bin as f64 - 0.5) * self.width()
    }

    /// Visible bins as an inclusive (first, last) pair.
    pub fn visible(&self) -> (usize, usize) {
        self.range.unwrap_or((1, self.nbins))
    }

    /// Restrict statistics to the bins covering `[lo, hi]`. An empty or
    /// inverted interval restores the full range.
    pub fn set_range(&mut self, lo: f64, hi: f64) {
        if lo.is_nan() || hi.is_nan() || lo >= hi {
            self.range = None;
            return;
        }
        let first = self.find_bin(lo).clamp(1, self.nbins);
        let last = self.find_bin(hi).clamp(1, self.nbins);
        self.range = if (first, last) == (1, self.nbins) {
            None
        } else {
            Some((first, last))
        };
    }

    /// Same number of bins and limits; the visible range is ignored.
    pub fn same_binning(&self, other: &Self) -> bool {
        self.nbins == other.nbins && self.min == other.min && self.max == other.max
    }

    fn cells(&self) -> usize {
        self.nbins + 2
    }
}

/// First and second moments of a weighted distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub sum_w: f64,
    pub sum_w2: f64,
    pub sum_wx: f64,
    pub sum_wx2: f64,
}

impl Moments {
    pub fn mean(&self) -> f64 {
        if self.sum_w == 0.0 {
            0.0
        } else {
            self.sum_wx / self.sum_w
        }
    }

    pub fn rms(&self) -> f64 {
        if self.sum_w == 0.0 {
            return 0.0;
        }
        let mean = self.mean();
        (self.sum_wx2 / self.sum_w - mean * mean).max(0.0).sqrt()
    }

    /// Effective number of entries, `(sum w)^2 / sum w^2`.
    pub fn effective_entries(&self) -> f64 {
        if self.sum_w2 <= 0.0 {
            0.0
        } else {
            self.sum_w * self.sum_w / self.sum_w2
        }
    }

    pub fn mean_error(&self) -> f64 {
        let neff = self.effective_entries();
        if neff <= 0.0 {
            0.0
        } else {
            self.rms() / neff.sqrt()
        }
    }

    pub fn rms_error(&self) -> f64 {
        let neff = self.effective_entries();
        if neff <= 0.0 {
            0.0
        } else {
            self.rms() / (2.0 * neff).sqrt()
        }
    }
}

/// Per-bin sums specific to profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ProfileSums {
    sum_wy: Vec<f64>,
    sum_wy2: Vec<f64>,
    y_min: f64,
    y_max: f64,
}

/// Raw bin accumulators for 1-D, 2-D, 3-D histograms and 1-D profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinnedContents {
    axes: Vec<AxisSpec>,
    sum_w: Vec<f64>,
    sum_w2: Vec<f64>,
    entries: f64,
    profile: Option<ProfileSums>,
}

impl BinnedContents {
    /// Empty histogram contents over one to three axes.
    pub fn histogram(axes: Vec<AxisSpec>) -> DqmResult<Self> {
        if axes.is_empty() || axes.len() > MAX_DIMENSIONS {
            return Err(DqmError::InvalidDefinition {
                reason: format!("histograms have 1 to {MAX_DIMENSIONS} axes, got {}", axes.len()),
            });
        }
        let cells = axes.iter().map(AxisSpec::cells).product();
        Ok(Self {
            axes,
            sum_w: vec![0.0; cells],
            sum_w2: vec![0.0; cells],
            entries: 0.0,
            profile: None,
        })
    }

    /// Empty profile contents; fills with y outside `[y_min, y_max]` are dropped.
    pub fn profile(axis: AxisSpec, y_min: f64, y_max: f64) -> DqmResult<Self> {
        if !y_min.is_finite() || !y_max.is_finite() || y_min >= y_max {
            return Err(DqmError::InvalidDefinition {
                reason: format!("profile y limits [{y_min}, {y_max}] are not an increasing finite interval"),
            });
        }
        let mut contents = Self::histogram(vec![axis])?;
        let cells = contents.sum_w.len();
        contents.profile = Some(ProfileSums {
            sum_wy: vec![0.0; cells],
            sum_wy2: vec![0.0; cells],
            y_min,
            y_max,
        });
        Ok(contents)
    }

    pub fn dimension(&self) -> usize {
        self.axes.len()
    }

    pub fn is_profile(&self) -> bool {
        self.profile.is_some()
    }

    pub fn axes(&self) -> &[AxisSpec] {
        &self.axes
    }

    pub fn axis_spec(&self, axis: Axis) -> DqmResult<&AxisSpec> {
        self.axes.get(axis.index()).ok_or(DqmError::InvalidAxis {
            axis,
            dimension: self.axes.len(),
        })
    }

    pub fn axis_spec_mut(&mut self, axis: Axis) -> DqmResult<&mut AxisSpec> {
        let dimension = self.axes.len();
        self.axes
            .get_mut(axis.index())
            .ok_or(DqmError::InvalidAxis { axis, dimension })
    }

    /// Flat storage index of a bin.
    pub fn cell(&self, bin: BinIndex) -> DqmResult<usize> {
        if bin.dimension() != self.dimension() {
            return Err(DqmError::DimensionMismatch {
                expected: self.dimension(),
                got: bin.dimension(),
            });
        }
        let coords = bin.coords();
        let mut index = 0;
        let mut stride = 1;
        for (i, spec) in self.axes.iter().enumerate() {
            let b = coords[i];
            if b > spec.nbins + 1 {
                return Err(DqmError::BinOutOfRange {
                    axis: Axis::ALL[i],
                    bin: b,
                    max: spec.nbins + 1,
                });
            }
            index += b * stride;
            stride *= spec.cells();
        }
        Ok(index)
    }

    /// Flat storage index of the bin containing a point (one coordinate per axis).
    pub fn locate(&self, point: &[f64]) -> DqmResult<usize> {
        if point.len() != self.dimension() {
            return Err(DqmError::DimensionMismatch {
                expected: self.dimension(),
                got: point.len(),
            });
        }
        let mut index = 0;
        let mut stride = 1;
        for (spec, &x) in self.axes.iter().zip(point) {
            index += spec.find_bin(x) * stride;
            stride *= spec.cells();
        }
        Ok(index)
    }

    /// Add a weighted entry to a histogram cell.
    pub fn accumulate(&mut self, cell: usize, w: f64) {
        self.sum_w[cell] += w;
        self.sum_w2[cell] += w * w;
        self.entries += 1.0;
    }

    /// Add a weighted `y` to a profile cell. Returns false when `y` is outside
    /// the profile limits and the entry was dropped.
    pub fn accumulate_profile(&mut self, cell: usize, y: f64, w: f64) -> DqmResult<bool> {
        let kind = self.kind();
        let sums = self
            .profile
            .as_mut()
            .ok_or(DqmError::Unsupported {
                kind,
                operation: "profile fill",
            })?;
        if y.is_nan() || y < sums.y_min || y > sums.y_max {
            return Ok(false);
        }
        sums.sum_wy[cell] += w * y;
        sums.sum_wy2[cell] += w * y * y;
        self.sum_w[cell] += w;
        self.sum_w2[cell] += w * w;
        self.entries += 1.0;
        Ok(true)
    }

    /// Overwrite a bin's content. For profiles the bin mean becomes `content`
    /// while its weight is preserved (unit weight for an empty bin).
    pub fn set_content(&mut self, cell: usize, content: f64) {
        match self.profile.as_mut() {
            None => self.sum_w[cell] = content,
            Some(sums) => {
                if self.sum_w[cell] == 0.0 {
                    self.sum_w[cell] = 1.0;
                    self.sum_w2[cell] = 1.0;
                }
                let w = self.sum_w[cell];
                sums.sum_wy[cell] = content * w;
                sums.sum_wy2[cell] = content * content * w;
            }
        }
    }

    /// Overwrite a histogram bin's uncertainty.
    pub fn set_error(&mut self, cell: usize, error: f64) -> DqmResult<()> {
        if self.profile.is_some() {
            return Err(DqmError::unsupported(AggregateKind::Profile, "set_bin_error"));
        }
        self.sum_w2[cell] = error * error;
        Ok(())
    }

    pub fn set_entries(&mut self, entries: f64) {
        self.entries = entries;
    }

    /// Zero every accumulator; binning and visible ranges are kept.
    pub fn clear(&mut self) {
        self.sum_w.iter_mut().for_each(|v| *v = 0.0);
        self.sum_w2.iter_mut().for_each(|v| *v = 0.0);
        self.entries = 0.0;
        if let Some(sums) = self.profile.as_mut() {
            sums.sum_wy.iter_mut().for_each(|v| *v = 0.0);
            sums.sum_wy2.iter_mut().for_each(|v| *v = 0.0);
        }
    }

    /// Accumulators of `self` minus those of `baseline`. Binning must match;
    /// the visible ranges of `self` are kept.
    pub fn minus(&self, baseline: &Self) -> DqmResult<Self> {
        let same_shape = self.axes.len() == baseline.axes.len()
            && self
                .axes
                .iter()
                .zip(&baseline.axes)
                .all(|(a, b)| a.same_binning(b))
            && self.profile.is_some() == baseline.profile.is_some();
        if !same_shape {
            return Err(DqmError::ShapeMismatch {
                reason: "baseline binning differs from current contents".into(),
            });
        }
        let sub = |a: &[f64], b: &[f64]| a.iter().zip(b).map(|(x, y)| x - y).collect::<Vec<_>>();
        let profile = match (&self.profile, &baseline.profile) {
            (Some(cur), Some(base)) => Some(ProfileSums {
                sum_wy: sub(&cur.sum_wy, &base.sum_wy),
                sum_wy2: sub(&cur.sum_wy2, &base.sum_wy2),
                y_min: cur.y_min,
                y_max: cur.y_max,
            }),
            _ => None,
        };
        Ok(Self {
            axes: self.axes.clone(),
            sum_w: sub(&self.sum_w, &baseline.sum_w),
            sum_w2: sub(&self.sum_w2, &baseline.sum_w2),
            entries: self.entries - baseline.entries,
            profile,
        })
    }

    /// Cells inside every axis' visible range, with their per-axis coordinates.
    fn visible_cells(&self) -> Vec<(usize, [usize; 3])> {
        let window = |i: usize| {
            self.axes
                .get(i)
                .map(AxisSpec::visible)
                .unwrap_or((0, 0))
        };
        let (x0, x1) = window(0);
        let (y0, y1) = window(1);
        let (z0, z1) = window(2);
        let mut cells = Vec::new();
        for z in z0..=z1 {
            for y in y0..=y1 {
                for x in x0..=x1 {
                    let coords = [x, y, z];
                    let mut index = 0;
                    let mut stride = 1;
                    for (i, spec) in self.axes.iter().enumerate() {
                        index += coords[i] * stride;
                        stride *= spec.cells();
                    }
                    cells.push((index, coords));
                }
            }
        }
        cells
    }

    /// Moments along `axis` over the visible range. For profiles, `Axis::Y`
    /// is the profiled quantity.
    pub fn moments(&self, axis: Axis) -> DqmResult<Moments> {
        let mut m = Moments::default();
        if let (Some(sums), Axis::Y) = (&self.profile, axis) {
            for (cell, _) in self.visible_cells() {
                m.sum_w += self.sum_w[cell];
                m.sum_w2 += self.sum_w2[cell];
                m.sum_wx += sums.sum_wy[cell];
                m.sum_wx2 += sums.sum_wy2[cell];
            }
            return Ok(m);
        }
        let spec = self.axis_spec(axis)?;
        for (cell, coords) in self.visible_cells() {
            let w = self.sum_w[cell];
            let x = spec.bin_center(coords[axis.index()]);
            m.sum_w += w;
            m.sum_w2 += self.sum_w2[cell];
            m.sum_wx += w * x;
            m.sum_wx2 += w * x * x;
        }
        Ok(m)
    }
}

impl AggregateView for BinnedContents {
    fn kind(&self) -> AggregateKind {
        if self.profile.is_some() {
            AggregateKind::Profile
        } else {
            AggregateKind::histogram(self.axes.len()).unwrap_or(AggregateKind::Histogram1D)
        }
    }

    fn entries(&self) -> DqmResult<f64> {
        Ok(self.entries)
    }

    fn n_bins(&self, axis: Axis) -> DqmResult<usize> {
        Ok(self.axis_spec(axis)?.nbins())
    }

    fn bin_center(&self, axis: Axis, bin: usize) -> DqmResult<f64> {
        Ok(self.axis_spec(axis)?.bin_center(bin))
    }

    fn bin_content(&self, bin: BinIndex) -> DqmResult<f64> {
        let cell = self.cell(bin)?;
        Ok(match &self.profile {
            None => self.sum_w[cell],
            Some(_) if self.sum_w[cell] == 0.0 => 0.0,
            Some(sums) => sums.sum_wy[cell] / self.sum_w[cell],
        })
    }

    fn bin_error(&self, bin: BinIndex) -> DqmResult<f64> {
        let cell = self.cell(bin)?;
        let Some(sums) = &self.profile else {
            return Ok(self.sum_w2[cell].max(0.0).sqrt());
        };
        let w = self.sum_w[cell];
        if w == 0.0 {
            return Ok(0.0);
        }
        let bin_moments = Moments {
            sum_w: w,
            sum_w2: self.sum_w2[cell],
            sum_wx: sums.sum_wy[cell],
            sum_wx2: sums.sum_wy2[cell],
        };
        Ok(bin_moments.mean_error())
    }

    fn bin_entries(&self, bin: usize) -> DqmResult<f64> {
        if self.profile.is_none() {
            return Err(DqmError::unsupported(self.kind(), "bin_entries"));
        }
        let cell = self.cell(BinIndex::X(bin))?;
        Ok(self.sum_w[cell])
    }

    fn mean(&self, axis: Axis) -> DqmResult<f64> {
        Ok(self.moments(axis)?.mean())
    }

    fn mean_error(&self, axis: Axis) -> DqmResult<f64> {
        Ok(self.moments(axis)?.mean_error())
    }

    fn rms(&self, axis: Axis) -> DqmResult<f64> {
        Ok(self.moments(axis)?.rms())
    }

    fn rms_error(&self, axis: Axis) -> DqmResult<f64> {
        Ok(self.moments(axis)?.rms_error())
    }

    fn y_min(&self) -> DqmResult<f64> {
        self.profile
            .as_ref()
            .map(|s| s.y_min)
            .ok_or_else(|| DqmError::unsupported(self.kind(), "y_min"))
    }

    fn y_max(&self) -> DqmResult<f64> {
        self.profile
            .as_ref()
            .map(|s| s.y_max)
            .ok_or_else(|| DqmError::unsupported(self.kind(), "y_max"))
    }
}
