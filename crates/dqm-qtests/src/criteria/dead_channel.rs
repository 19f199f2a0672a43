use dqm_core::{AggregateView, DqmResult};

use super::{bin_indices, require_dimension, Evaluation, QualityCriterion};

/// Fraction of live channels: a bin is dead when its content is at or
/// below `threshold`. Works on histograms of any dimension and on profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadChannel {
    threshold: f64,
}

impl DeadChannel {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for DeadChannel {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl QualityCriterion for DeadChannel {
    fn algorithm(&self) -> &'static str {
        "DeadChannel"
    }

    fn evaluate(&self, view: &dyn AggregateView) -> DqmResult<Evaluation> {
        let dimension = require_dimension(view, &[1, 2, 3], self.algorithm())?;
        let bins = bin_indices(view, dimension)?;
        let mut dead = 0usize;
        for bin in &bins {
            if view.bin_content(*bin)? <= self.threshold {
                dead += 1;
            }
        }
        let total = bins.len();
        let alive = if total == 0 {
            1.0
        } else {
            1.0 - dead as f64 / total as f64
        };
        Ok(Evaluation::new(
            alive,
            format!("{dead}/{total} channels at or below {}", self.threshold),
        ))
    }
}
