mod dqm_error;
mod registry_error;

pub use dqm_error::DqmError;
pub use registry_error::RegistryError;

/// Result alias used across the workspace.
pub type DqmResult<T> = Result<T, DqmError>;
