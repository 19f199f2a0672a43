/// Failures of the quality-test registry collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("registry unavailable for element {element}: {reason}")]
    Unavailable { element: String, reason: String },

    #[error("unknown quality test: {test}")]
    UnknownTest { test: String },

    #[error("quality test {test} failed: {reason}")]
    ExecutionFailed { test: String, reason: String },
}

impl RegistryError {
    /// Name of the test this error belongs to, if it is test-specific.
    pub fn test_name(&self) -> Option<&str> {
        match self {
            Self::Unavailable { .. } => None,
            Self::UnknownTest { test } | Self::ExecutionFailed { test, .. } => Some(test),
        }
    }
}
