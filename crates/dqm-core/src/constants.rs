/// DQM engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Highest dimensionality an aggregate can have.
pub const MAX_DIMENSIONS: usize = 3;

/// Numeric status codes carried by quality reports.
pub const STATUS_OK: i32 = 100;
pub const STATUS_WARNING: i32 = 200;
pub const STATUS_ERROR: i32 = 300;
pub const STATUS_OTHER: i32 = 30;

/// Separator between folder names in element paths.
pub const PATH_SEPARATOR: char = '/';
