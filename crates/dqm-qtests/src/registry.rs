//! [`QTestRegistry`]: named tests plus glob assignments to element names.

use std::collections::{BTreeMap, BTreeSet};

use dqm_core::config::QualityConfig;
use dqm_core::{
    AggregateView, DqmError, DqmResult, ElementInfo, QualityReport, QualityTestRegistry,
    RegistryError,
};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, trace};

use crate::criteria::QualityCriterion;
use crate::definitions::RegistryDef;
use crate::quality_test::QualityTest;

#[derive(Debug, Clone)]
struct Assignment {
    glob: Glob,
    tests: Vec<String>,
}

/// Quality-test registry backed by in-memory definitions.
///
/// Patterns are matched against the full element name with `/` treated as a
/// literal separator, so `tracker/*` does not reach `tracker/barrel/layer1`
/// while `tracker/**` does. Tests run in assignment order; a test assigned
/// twice runs once.
#[derive(Debug)]
pub struct QTestRegistry {
    defaults: QualityConfig,
    tests: BTreeMap<String, QualityTest>,
    assignments: Vec<Assignment>,
    matcher: GlobSet,
}

impl QTestRegistry {
    pub fn new(defaults: QualityConfig) -> Self {
        Self {
            defaults,
            tests: BTreeMap::new(),
            assignments: Vec::new(),
            matcher: GlobSet::empty(),
        }
    }

    /// Build a registry from a TOML definition file.
    pub fn from_toml(toml_str: &str, defaults: QualityConfig) -> DqmResult<Self> {
        let def: RegistryDef =
            toml::from_str(toml_str).map_err(|e| DqmError::ConfigError(e.to_string()))?;
        let mut registry = Self::new(defaults);
        for test in def.tests {
            let thresholds = QualityConfig {
                warning_threshold: test.warning_threshold.unwrap_or(defaults.warning_threshold),
                error_threshold: test.error_threshold.unwrap_or(defaults.error_threshold),
                min_entries: test.min_entries.unwrap_or(defaults.min_entries),
            };
            let criterion = test.criterion.build()?;
            registry.add_test(QualityTest::from_boxed(test.name, criterion, thresholds)?)?;
        }
        for assign in def.assignments {
            let tests: Vec<&str> = assign.tests.iter().map(String::as_str).collect();
            registry.assign(&assign.pattern, &tests)?;
        }
        debug!(
            tests = registry.tests.len(),
            assignments = registry.assignments.len(),
            "quality-test registry loaded"
        );
        Ok(registry)
    }

    pub fn defaults(&self) -> &QualityConfig {
        &self.defaults
    }

    pub fn add_test(&mut self, test: QualityTest) -> DqmResult<()> {
        if self.tests.contains_key(test.name()) {
            return Err(DqmError::InvalidDefinition {
                reason: format!("quality test {} defined twice", test.name()),
            });
        }
        self.tests.insert(test.name().to_string(), test);
        Ok(())
    }

    /// Define a test using the registry's default thresholds.
    pub fn define(
        &mut self,
        name: &str,
        criterion: impl QualityCriterion + 'static,
    ) -> DqmResult<()> {
        self.add_test(QualityTest::new(name, criterion, self.defaults)?)
    }

    /// Run `tests` on every element whose name matches `pattern`. Test names
    /// are resolved at execution time, so they may be defined later.
    pub fn assign(&mut self, pattern: &str, tests: &[&str]) -> DqmResult<()> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| DqmError::InvalidDefinition {
                reason: format!("bad element pattern {pattern:?}: {e}"),
            })?;
        self.assignments.push(Assignment {
            glob,
            tests: tests.iter().map(|t| t.to_string()).collect(),
        });
        self.rebuild_matcher()
    }

    fn rebuild_matcher(&mut self) -> DqmResult<()> {
        let mut builder = GlobSetBuilder::new();
        for assignment in &self.assignments {
            builder.add(assignment.glob.clone());
        }
        self.matcher = builder.build().map_err(|e| DqmError::InvalidDefinition {
            reason: format!("element patterns: {e}"),
        })?;
        Ok(())
    }

    pub fn test(&self, name: &str) -> Option<&QualityTest> {
        self.tests.get(name)
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl Default for QTestRegistry {
    fn default() -> Self {
        Self::new(QualityConfig::default())
    }
}

impl QualityTestRegistry for QTestRegistry {
    fn tests_for(&self, element: &ElementInfo) -> Result<Vec<String>, RegistryError> {
        let mut matched = self.matcher.matches(&element.name);
        matched.sort_unstable();
        let mut seen = BTreeSet::new();
        let tests: Vec<String> = matched
            .into_iter()
            .filter_map(|i| self.assignments.get(i))
            .flat_map(|assignment| assignment.tests.iter())
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect();
        trace!(element = %element.name, tests = tests.len(), "tests resolved");
        Ok(tests)
    }

    fn execute(&self, test: &str, view: &dyn AggregateView) -> Result<QualityReport, RegistryError> {
        self.tests
            .get(test)
            .ok_or_else(|| RegistryError::UnknownTest {
                test: test.to_string(),
            })?
            .run(view)
    }
}
