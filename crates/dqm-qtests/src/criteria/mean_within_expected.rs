use dqm_core::{AggregateView, Axis, DqmError, DqmResult};
use statrs::function::erf::erfc;

use super::{check_interval, require_dimension, Evaluation, QualityCriterion};

/// How far the mean may stray from the expected value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpectedSpread {
    /// Gaussian compatibility with a fixed sigma.
    Sigma(f64),
    /// Gaussian compatibility using the aggregate's own RMS as sigma.
    Rms,
    /// Hard window: probability is 1 inside, 0 outside.
    Range { min: f64, max: f64 },
}

/// Compatibility of the x mean with an expected value.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanWithinExpected {
    expected: f64,
    spread: ExpectedSpread,
}

impl MeanWithinExpected {
    pub fn new(expected: f64, spread: ExpectedSpread) -> DqmResult<Self> {
        match spread {
            ExpectedSpread::Sigma(sigma) if !(sigma.is_finite() && sigma > 0.0) => {
                return Err(DqmError::InvalidDefinition {
                    reason: format!("sigma must be positive, got {sigma}"),
                })
            }
            ExpectedSpread::Range { min, max } => check_interval(min, max, "mean")?,
            _ => {}
        }
        Ok(Self { expected, spread })
    }
}

/// Two-sided probability of a deviation at least `chi` standard deviations
/// from the mean of a normal distribution.
fn gaussian_probability(chi: f64) -> f64 {
    erfc(chi.abs() / std::f64::consts::SQRT_2)
}

impl QualityCriterion for MeanWithinExpected {
    fn algorithm(&self) -> &'static str {
        "MeanWithinExpected"
    }

    fn evaluate(&self, view: &dyn AggregateView) -> DqmResult<Evaluation> {
        require_dimension(view, &[1], self.algorithm())?;
        let mean = view.mean(Axis::X)?;
        let deviation = mean - self.expected;
        let probability = match self.spread {
            ExpectedSpread::Sigma(sigma) => gaussian_probability(deviation / sigma),
            ExpectedSpread::Rms => {
                let rms = view.rms(Axis::X)?;
                if rms > 0.0 {
                    gaussian_probability(deviation / rms)
                } else if deviation == 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ExpectedSpread::Range { min, max } => {
                if (min..=max).contains(&mean) {
                    1.0
                } else {
                    0.0
                }
            }
        };
        Ok(Evaluation::new(
            probability,
            format!("mean {mean:.4}, expected {}", self.expected),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_probability_is_two_sided() {
        assert!((gaussian_probability(0.0) - 1.0).abs() < 1e-12);
        assert!((gaussian_probability(1.0) - 0.317_310_5).abs() < 1e-6);
        assert_eq!(gaussian_probability(-2.0), gaussian_probability(2.0));
    }

    #[test]
    fn non_positive_sigma_is_rejected() {
        assert!(MeanWithinExpected::new(0.0, ExpectedSpread::Sigma(0.0)).is_err());
        assert!(MeanWithinExpected::new(0.0, ExpectedSpread::Sigma(f64::NAN)).is_err());
        assert!(MeanWithinExpected::new(0.0, ExpectedSpread::Range { min: 2.0, max: 1.0 }).is_err());
    }
}
