use serde::{Deserialize, Serialize};

use super::defaults;

/// Thresholds mapping a criterion's probability to a report status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub warning_threshold: f64,
    pub error_threshold: f64,
    pub min_entries: u64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            warning_threshold: defaults::DEFAULT_WARNING_THRESHOLD,
            error_threshold: defaults::DEFAULT_ERROR_THRESHOLD,
            min_entries: defaults::DEFAULT_MIN_ENTRIES,
        }
    }
}

impl QualityConfig {
    /// Thresholds must satisfy `0 <= error <= warning <= 1`.
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.error_threshold)
            && (0.0..=1.0).contains(&self.warning_threshold)
            && self.error_threshold <= self.warning_threshold
    }
}
