//! TOML schema of a registry definition file.

use serde::Deserialize;

use crate::criteria::CriterionDef;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistryDef {
    #[serde(rename = "test")]
    pub tests: Vec<TestDef>,
    #[serde(rename = "assign")]
    pub assignments: Vec<AssignDef>,
}

/// One `[[test]]` table. Unset thresholds fall back to the registry's
/// `[quality]` defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TestDef {
    pub name: String,
    pub criterion: CriterionDef,
    #[serde(default)]
    pub warning_threshold: Option<f64>,
    #[serde(default)]
    pub error_threshold: Option<f64>,
    #[serde(default)]
    pub min_entries: Option<u64>,
}

/// One `[[assign]]` table: the tests to run on elements matching `pattern`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignDef {
    pub pattern: String,
    pub tests: Vec<String>,
}
