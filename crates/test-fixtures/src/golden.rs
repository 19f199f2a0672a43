//! Typed shapes of the golden JSON files.

use dqm_core::QualityStatus;
use serde::Deserialize;

use crate::registry::Script;

/// One scripted test and the outcome it should produce.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedTest {
    pub name: String,
    /// Status to report; absent means the test fails to execute.
    #[serde(default)]
    pub status: Option<QualityStatus>,
    #[serde(default)]
    pub failure: Option<String>,
}

impl ScriptedTest {
    pub fn script(&self) -> Script {
        match (&self.status, &self.failure) {
            (_, Some(reason)) => Script::Fail(reason.clone()),
            (Some(status), None) => Script::Status(*status),
            (None, None) => Script::Status(QualityStatus::Ok),
        }
    }
}

/// Expected bucket contents after one quality-test run.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedBuckets {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub others: Vec<String>,
    pub failures: usize,
}

/// `golden/classification/*.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationCase {
    pub description: String,
    pub element: String,
    pub tests: Vec<ScriptedTest>,
    pub expected: ExpectedBuckets,
}

/// Element entry of a harvest case: path below the root folder plus the
/// statuses its tests report.
#[derive(Debug, Clone, Deserialize)]
pub struct HarvestElement {
    pub path: String,
    pub tests: Vec<ScriptedTest>,
}

/// `golden/harvest/*.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct HarvestCase {
    pub description: String,
    pub root: String,
    pub elements: Vec<HarvestElement>,
    /// Expected serialized summary.
    pub expected: serde_json::Value,
}
