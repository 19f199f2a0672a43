use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Outcome of a single quality test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityStatus {
    Ok,
    Warning,
    Error,
    /// Neither ok, warning nor error: the test could not be evaluated.
    Other,
}

impl QualityStatus {
    /// Numeric status code as published to report consumers.
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => constants::STATUS_OK,
            Self::Warning => constants::STATUS_WARNING,
            Self::Error => constants::STATUS_ERROR,
            Self::Other => constants::STATUS_OTHER,
        }
    }

    /// Severity rank used to pick the worst of several statuses.
    pub fn severity(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Other => 1,
            Self::Warning => 2,
            Self::Error => 3,
        }
    }
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
            Self::Other => f.write_str("other"),
        }
    }
}

/// Result of one named test run against an aggregate.
///
/// Reports are immutable: a re-run of the same test produces a new report
/// that replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    test_name: String,
    algorithm_name: String,
    status: QualityStatus,
    message: String,
    result: Option<f64>,
}

impl QualityReport {
    pub fn new(
        test_name: impl Into<String>,
        algorithm_name: impl Into<String>,
        status: QualityStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            test_name: test_name.into(),
            algorithm_name: algorithm_name.into(),
            status,
            message: message.into(),
            result: None,
        }
    }

    /// Report for a test that could not be evaluated.
    pub fn other(
        test_name: impl Into<String>,
        algorithm_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(test_name, algorithm_name, QualityStatus::Other, message)
    }

    /// Attach the criterion's score.
    pub fn with_result(mut self, result: f64) -> Self {
        self.result = Some(result);
        self
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub fn algorithm_name(&self) -> &str {
        &self.algorithm_name
    }

    pub fn status(&self) -> QualityStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn result(&self) -> Option<f64> {
        self.result
    }
}
