//! Range checks on where the contents sit (x) and what values they take (y).

use dqm_core::{AggregateView, Axis, BinIndex, DqmResult};

use super::{bin_weight, check_interval, require_dimension, Evaluation, QualityCriterion};

/// Fraction of the contents whose bin centre lies in `[xmin, xmax]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentsXRange {
    xmin: f64,
    xmax: f64,
}

impl ContentsXRange {
    pub fn new(xmin: f64, xmax: f64) -> DqmResult<Self> {
        check_interval(xmin, xmax, "x")?;
        Ok(Self { xmin, xmax })
    }
}

impl QualityCriterion for ContentsXRange {
    fn algorithm(&self) -> &'static str {
        "ContentsXRange"
    }

    fn evaluate(&self, view: &dyn AggregateView) -> DqmResult<Evaluation> {
        require_dimension(view, &[1], self.algorithm())?;
        let mut total = 0.0;
        let mut inside = 0.0;
        for bin in 1..=view.n_bins(Axis::X)? {
            let w = bin_weight(view, bin)?;
            total += w;
            let centre = view.bin_center(Axis::X, bin)?;
            if (self.xmin..=self.xmax).contains(&centre) {
                inside += w;
            }
        }
        if total == 0.0 {
            return Ok(Evaluation::new(1.0, "no contents"));
        }
        let fraction = inside / total;
        Ok(Evaluation::new(
            fraction,
            format!(
                "{:.1}% of contents in [{}, {}]",
                fraction * 100.0,
                self.xmin,
                self.xmax
            ),
        ))
    }
}

/// Fraction of bins whose content lies in `[ymin, ymax]`.
///
/// Empty bins count unless `use_empty_bins(false)` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentsYRange {
    ymin: f64,
    ymax: f64,
    use_empty_bins: bool,
}

impl ContentsYRange {
    pub fn new(ymin: f64, ymax: f64) -> DqmResult<Self> {
        check_interval(ymin, ymax, "y")?;
        Ok(Self {
            ymin,
            ymax,
            use_empty_bins: true,
        })
    }

    pub fn use_empty_bins(mut self, flag: bool) -> Self {
        self.use_empty_bins = flag;
        self
    }
}

impl QualityCriterion for ContentsYRange {
    fn algorithm(&self) -> &'static str {
        "ContentsYRange"
    }

    fn evaluate(&self, view: &dyn AggregateView) -> DqmResult<Evaluation> {
        require_dimension(view, &[1], self.algorithm())?;
        let mut considered = 0usize;
        let mut good = 0usize;
        for bin in 1..=view.n_bins(Axis::X)? {
            let content = view.bin_content(BinIndex::X(bin))?;
            if content == 0.0 && !self.use_empty_bins {
                continue;
            }
            considered += 1;
            if (self.ymin..=self.ymax).contains(&content) {
                good += 1;
            }
        }
        if considered == 0 {
            return Ok(Evaluation::new(1.0, "no bins to check"));
        }
        Ok(Evaluation::new(
            good as f64 / considered as f64,
            format!(
                "{good}/{considered} bins in [{}, {}]",
                self.ymin, self.ymax
            ),
        ))
    }
}
