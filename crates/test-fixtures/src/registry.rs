//! Scripted quality-test registry double.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use dqm_core::{
    AggregateView, ElementInfo, QualityReport, QualityStatus, QualityTestRegistry, RegistryError,
};

pub const SCRIPTED_ALGORITHM: &str = "Scripted";

/// What a scripted test does when executed.
#[derive(Debug, Clone, PartialEq)]
pub enum Script {
    /// Report a fixed status.
    Status(QualityStatus),
    /// Fail to execute with this reason.
    Fail(String),
    /// Ok when the view has at least this many entries, Error otherwise.
    /// The report's result carries the entries the test saw.
    MinEntries(f64),
}

/// Registry whose tests report pre-scripted outcomes.
///
/// Tests run in insertion order. Elements with no explicit assignment get
/// every scripted test.
#[derive(Debug, Default)]
pub struct ScriptedRegistry {
    scripts: Vec<(String, Script)>,
    assignments: BTreeMap<String, Vec<String>>,
    unavailable: BTreeSet<String>,
    executions: AtomicUsize,
}

impl ScriptedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_test(mut self, test: &str, script: Script) -> Self {
        self.set_script(test, script);
        self
    }

    /// Restrict `element` to the named tests.
    pub fn assign(mut self, element: &str, tests: &[&str]) -> Self {
        self.assignments.insert(
            element.to_string(),
            tests.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// Make test enumeration fail for `element`.
    pub fn unavailable_for(mut self, element: &str) -> Self {
        self.unavailable.insert(element.to_string());
        self
    }

    pub fn set_script(&mut self, test: &str, script: Script) {
        match self.scripts.iter_mut().find(|(name, _)| name == test) {
            Some((_, existing)) => *existing = script,
            None => self.scripts.push((test.to_string(), script)),
        }
    }

    pub fn remove_test(&mut self, test: &str) {
        self.scripts.retain(|(name, _)| name != test);
        for tests in self.assignments.values_mut() {
            tests.retain(|name| name != test);
        }
    }

    pub fn set_available(&mut self, element: &str, available: bool) {
        if available {
            self.unavailable.remove(element);
        } else {
            self.unavailable.insert(element.to_string());
        }
    }

    /// Total `execute` calls so far.
    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::Relaxed)
    }
}

impl QualityTestRegistry for ScriptedRegistry {
    fn tests_for(&self, element: &ElementInfo) -> Result<Vec<String>, RegistryError> {
        if self.unavailable.contains(&element.name) {
            return Err(RegistryError::Unavailable {
                element: element.name.clone(),
                reason: "scripted outage".to_string(),
            });
        }
        Ok(match self.assignments.get(&element.name) {
            Some(tests) => tests.clone(),
            None => self.scripts.iter().map(|(name, _)| name.clone()).collect(),
        })
    }

    fn execute(&self, test: &str, view: &dyn AggregateView) -> Result<QualityReport, RegistryError> {
        self.executions.fetch_add(1, Ordering::Relaxed);
        let script = self
            .scripts
            .iter()
            .find(|(name, _)| name == test)
            .map(|(_, script)| script)
            .ok_or_else(|| RegistryError::UnknownTest {
                test: test.to_string(),
            })?;
        match script {
            Script::Status(status) => Ok(QualityReport::new(
                test,
                SCRIPTED_ALGORITHM,
                *status,
                format!("scripted {status}"),
            )),
            Script::Fail(reason) => Err(RegistryError::ExecutionFailed {
                test: test.to_string(),
                reason: reason.clone(),
            }),
            Script::MinEntries(min) => {
                let entries = view.entries().map_err(|e| RegistryError::ExecutionFailed {
                    test: test.to_string(),
                    reason: e.to_string(),
                })?;
                let status = if entries >= *min {
                    QualityStatus::Ok
                } else {
                    QualityStatus::Error
                };
                Ok(QualityReport::new(
                    test,
                    SCRIPTED_ALGORITHM,
                    status,
                    format!("{entries} entries, need {min}"),
                )
                .with_result(entries))
            }
        }
    }
}
