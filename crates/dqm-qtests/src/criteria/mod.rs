//! Standard criteria. Each one turns an aggregate view into a probability in
//! `[0, 1]`; thresholds then map that probability to a status.

pub mod contents_range;
pub mod dead_channel;
pub mod mean_within_expected;

pub use contents_range::{ContentsXRange, ContentsYRange};
pub use dead_channel::DeadChannel;
pub use mean_within_expected::{ExpectedSpread, MeanWithinExpected};

use std::fmt;

use dqm_core::{AggregateKind, AggregateView, Axis, BinIndex, DqmError, DqmResult};
use serde::Deserialize;

/// Outcome of evaluating a criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub probability: f64,
    pub detail: String,
}

impl Evaluation {
    pub fn new(probability: f64, detail: impl Into<String>) -> Self {
        Self {
            probability,
            detail: detail.into(),
        }
    }
}

/// A statistical check over an aggregate.
pub trait QualityCriterion: Send + Sync + fmt::Debug {
    /// Algorithm name recorded on reports.
    fn algorithm(&self) -> &'static str;

    fn evaluate(&self, view: &dyn AggregateView) -> DqmResult<Evaluation>;
}

/// Criterion as written in a registry definition file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum CriterionDef {
    ContentsXRange {
        xmin: f64,
        xmax: f64,
    },
    ContentsYRange {
        ymin: f64,
        ymax: f64,
        #[serde(default = "default_use_empty_bins")]
        use_empty_bins: bool,
    },
    DeadChannel {
        #[serde(default)]
        threshold: f64,
    },
    MeanWithinExpected {
        expected: f64,
        #[serde(default)]
        sigma: Option<f64>,
        #[serde(default)]
        use_rms: bool,
        #[serde(default)]
        xmin: Option<f64>,
        #[serde(default)]
        xmax: Option<f64>,
    },
}

fn default_use_empty_bins() -> bool {
    true
}

impl CriterionDef {
    pub fn build(self) -> DqmResult<Box<dyn QualityCriterion>> {
        Ok(match self {
            Self::ContentsXRange { xmin, xmax } => Box::new(ContentsXRange::new(xmin, xmax)?),
            Self::ContentsYRange {
                ymin,
                ymax,
                use_empty_bins,
            } => Box::new(ContentsYRange::new(ymin, ymax)?.use_empty_bins(use_empty_bins)),
            Self::DeadChannel { threshold } => Box::new(DeadChannel::new(threshold)),
            Self::MeanWithinExpected {
                expected,
                sigma,
                use_rms,
                xmin,
                xmax,
            } => {
                let spread = match (sigma, use_rms, xmin, xmax) {
                    (Some(sigma), false, None, None) => ExpectedSpread::Sigma(sigma),
                    (None, true, None, None) => ExpectedSpread::Rms,
                    (None, false, Some(min), Some(max)) => ExpectedSpread::Range { min, max },
                    _ => {
                        return Err(DqmError::InvalidDefinition {
                            reason: "mean_within_expected needs exactly one of sigma, use_rms or xmin/xmax"
                                .into(),
                        })
                    }
                };
                Box::new(MeanWithinExpected::new(expected, spread)?)
            }
        })
    }
}

/// Reject views whose dimension is not in `allowed`.
pub(crate) fn require_dimension(
    view: &dyn AggregateView,
    allowed: &[usize],
    algorithm: &'static str,
) -> DqmResult<usize> {
    let kind = view.kind();
    let dimension = kind.dimension();
    if kind == AggregateKind::Scalar || !allowed.contains(&dimension) {
        return Err(DqmError::unsupported(kind, algorithm));
    }
    Ok(dimension)
}

/// Every in-range bin of the view, x fastest.
pub(crate) fn bin_indices(view: &dyn AggregateView, dimension: usize) -> DqmResult<Vec<BinIndex>> {
    let nx = view.n_bins(Axis::X)?;
    Ok(match dimension {
        1 => (1..=nx).map(BinIndex::X).collect(),
        2 => {
            let ny = view.n_bins(Axis::Y)?;
            (1..=ny)
                .flat_map(|y| (1..=nx).map(move |x| BinIndex::XY(x, y)))
                .collect()
        }
        _ => {
            let ny = view.n_bins(Axis::Y)?;
            let nz = view.n_bins(Axis::Z)?;
            (1..=nz)
                .flat_map(|z| (1..=ny).flat_map(move |y| (1..=nx).map(move |x| BinIndex::XYZ(x, y, z))))
                .collect()
        }
    })
}

/// Statistical weight of a one-dimensional bin: its content for
/// histograms, its sum of weights for profiles.
pub(crate) fn bin_weight(view: &dyn AggregateView, bin: usize) -> DqmResult<f64> {
    match view.kind() {
        AggregateKind::Profile => view.bin_entries(bin),
        _ => view.bin_content(BinIndex::X(bin)),
    }
}

pub(crate) fn check_interval(lo: f64, hi: f64, what: &str) -> DqmResult<()> {
    if lo.is_finite() && hi.is_finite() && lo <= hi {
        Ok(())
    } else {
        Err(DqmError::InvalidDefinition {
            reason: format!("{what} interval [{lo}, {hi}] is empty or not finite"),
        })
    }
}
