use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;
use crate::models::{AggregateKind, QualityReport};
use crate::traits::AggregateView;

/// Identity of an element as seen by a quality-test registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub name: String,
    pub kind: AggregateKind,
}

/// Source of the quality tests applicable to an element.
pub trait QualityTestRegistry: Send + Sync {
    /// Names of the tests to run against this element, in execution order.
    fn tests_for(&self, element: &ElementInfo) -> Result<Vec<String>, RegistryError>;

    /// Run one test against a view of the element's contents.
    fn execute(&self, test: &str, view: &dyn AggregateView)
        -> Result<QualityReport, RegistryError>;
}
