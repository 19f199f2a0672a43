use serde::{Deserialize, Serialize};

use super::defaults;

/// Lifecycle flags applied to newly created elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementConfig {
    /// Clear contents at the end of each monitoring cycle.
    pub reset_at_cycle_end: bool,
    /// Start in accumulate mode (suppresses cycle-end clears).
    pub accumulate: bool,
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self {
            reset_at_cycle_end: defaults::DEFAULT_RESET_AT_CYCLE_END,
            accumulate: defaults::DEFAULT_ACCUMULATE,
        }
    }
}
