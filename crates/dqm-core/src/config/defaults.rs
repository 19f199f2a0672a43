//! Default values for every config section.

pub const DEFAULT_RESET_AT_CYCLE_END: bool = false;
pub const DEFAULT_ACCUMULATE: bool = false;

/// Criterion probability at or above which a test is Ok.
pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.90;
/// Criterion probability at or above which a failing test is a Warning
/// rather than an Error.
pub const DEFAULT_ERROR_THRESHOLD: f64 = 0.50;
/// Entries required before a criterion is evaluated at all.
pub const DEFAULT_MIN_ENTRIES: u64 = 0;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
