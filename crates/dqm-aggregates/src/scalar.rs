//! Single-value aggregates: integer counters, real values and strings.

use dqm_core::models::ScalarValue;
use dqm_core::{
    AggregateKind, AggregateSnapshot, AggregateView, Axis, BinIndex, DqmError, DqmResult,
    FillPoint, StatisticalAggregate,
};

/// Scalar element contents. Binned statistics are not defined.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    value: ScalarValue,
}

impl Scalar {
    pub fn int(value: i64) -> Self {
        Self {
            value: ScalarValue::Int(value),
        }
    }

    pub fn real(value: f64) -> Self {
        Self {
            value: ScalarValue::Real(value),
        }
    }

    /// Text value. Numeric fills are rejected; update it with `set_text`.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: ScalarValue::Text(value.into()),
        }
    }

    pub fn value(&self) -> &ScalarValue {
        &self.value
    }
}

fn unsupported<T>(operation: &'static str) -> DqmResult<T> {
    Err(DqmError::unsupported(AggregateKind::Scalar, operation))
}

impl AggregateView for Scalar {
    fn kind(&self) -> AggregateKind {
        AggregateKind::Scalar
    }

    fn entries(&self) -> DqmResult<f64> {
        unsupported("entries")
    }

    fn n_bins(&self, _axis: Axis) -> DqmResult<usize> {
        unsupported("n_bins")
    }

    fn bin_center(&self, _axis: Axis, _bin: usize) -> DqmResult<f64> {
        unsupported("bin_center")
    }

    fn bin_content(&self, _bin: BinIndex) -> DqmResult<f64> {
        unsupported("bin_content")
    }

    fn bin_error(&self, _bin: BinIndex) -> DqmResult<f64> {
        unsupported("bin_error")
    }

    fn bin_entries(&self, _bin: usize) -> DqmResult<f64> {
        unsupported("bin_entries")
    }

    fn mean(&self, _axis: Axis) -> DqmResult<f64> {
        unsupported("mean")
    }

    fn mean_error(&self, _axis: Axis) -> DqmResult<f64> {
        unsupported("mean_error")
    }

    fn rms(&self, _axis: Axis) -> DqmResult<f64> {
        unsupported("rms")
    }

    fn rms_error(&self, _axis: Axis) -> DqmResult<f64> {
        unsupported("rms_error")
    }

    fn y_min(&self) -> DqmResult<f64> {
        unsupported("y_min")
    }

    fn y_max(&self) -> DqmResult<f64> {
        unsupported("y_max")
    }
}

impl StatisticalAggregate for Scalar {
    /// A single value replaces the current one; integers truncate.
    fn fill(&mut self, point: FillPoint) -> DqmResult<()> {
        match (&mut self.value, point) {
            (ScalarValue::Int(v), FillPoint::One(x)) => *v = x as i64,
            (ScalarValue::Real(v), FillPoint::One(x)) => *v = x,
            (_, point) => {
                return Err(DqmError::UnsupportedFill {
                    kind: AggregateKind::Scalar,
                    arity: point.arity(),
                })
            }
        }
        Ok(())
    }

    fn set_bin_content(&mut self, _bin: BinIndex, _content: f64) -> DqmResult<()> {
        unsupported("set_bin_content")
    }

    fn set_bin_error(&mut self, _bin: BinIndex, _error: f64) -> DqmResult<()> {
        unsupported("set_bin_error")
    }

    fn set_entries(&mut self, _entries: f64) -> DqmResult<()> {
        unsupported("set_entries")
    }

    fn set_bin_label(&mut self, _bin: usize, _label: &str, _axis: Axis) -> DqmResult<()> {
        unsupported("set_bin_label")
    }

    fn set_axis_range(&mut self, _min: f64, _max: f64, _axis: Axis) -> DqmResult<()> {
        unsupported("set_axis_range")
    }

    fn set_text(&mut self, text: &str) -> DqmResult<()> {
        match &mut self.value {
            ScalarValue::Text(value) => {
                value.clear();
                value.push_str(text);
                Ok(())
            }
            _ => unsupported("set_text"),
        }
    }

    fn reset(&mut self) {
        self.value = match self.value {
            ScalarValue::Int(_) => ScalarValue::Int(0),
            ScalarValue::Real(_) => ScalarValue::Real(0.0),
            ScalarValue::Text(_) => ScalarValue::Text(String::new()),
        };
    }

    fn snapshot(&self) -> AggregateSnapshot {
        AggregateSnapshot::Scalar(self.value.clone())
    }

    fn value_string(&self) -> String {
        self.value.value_string()
    }
}
