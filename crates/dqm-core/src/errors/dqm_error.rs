use crate::models::{AggregateKind, Axis};

use super::RegistryError;

/// Umbrella error for every fallible operation in the engine.
#[derive(Debug, thiserror::Error)]
pub enum DqmError {
    #[error("operation not defined on container elements: {operation} on {element}")]
    InvalidOperation {
        element: String,
        operation: &'static str,
    },

    #[error("{kind} does not support fill with {arity} value(s)")]
    UnsupportedFill { kind: AggregateKind, arity: usize },

    #[error("{operation} is not supported by {kind}")]
    Unsupported {
        kind: AggregateKind,
        operation: &'static str,
    },

    #[error("bin {bin} out of range on axis {axis} (max {max})")]
    BinOutOfRange { axis: Axis, bin: usize, max: usize },

    #[error("axis {axis} not defined for a {dimension}-dimensional aggregate")]
    InvalidAxis { axis: Axis, dimension: usize },

    #[error("bin index has {got} coordinate(s), aggregate has {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("shape mismatch: {reason}")]
    ShapeMismatch { reason: String },

    #[error("invalid definition: {reason}")]
    InvalidDefinition { reason: String },

    #[error("invalid node name {name:?} in folder {folder}")]
    InvalidName { folder: String, name: String },

    #[error("duplicate name {name} in folder {folder}")]
    DuplicateName { folder: String, name: String },

    #[error("no node at path {path}")]
    NotFound { path: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DqmError {
    /// Shorthand for the folder-variant rejection.
    pub fn container(element: impl Into<String>, operation: &'static str) -> Self {
        Self::InvalidOperation {
            element: element.into(),
            operation,
        }
    }

    /// Shorthand for a capability the aggregate kind does not have.
    pub fn unsupported(kind: AggregateKind, operation: &'static str) -> Self {
        Self::Unsupported { kind, operation }
    }
}
