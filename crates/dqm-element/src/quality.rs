//! Quality-test execution and report queries on a [`MonitoringElement`].

use std::collections::BTreeMap;

use dqm_core::{
    AggregateView, DqmResult, ElementInfo, QualityReport, QualityTestRegistry, RegistryError,
    StatisticalAggregate,
};
use tracing::{debug, info_span, warn};

use crate::classification::ClassificationIndex;
use crate::element::MonitoringElement;

/// Algorithm name recorded on reports for tests the registry failed to run.
const UNAVAILABLE_ALGORITHM: &str = "unavailable";

/// Outcome of one `run_quality_tests` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityRun {
    /// Test names run, in registry order. A name listed twice runs once.
    pub executed: Vec<String>,
    /// Execution failures, each also recorded as an `Other` report.
    pub failures: Vec<RegistryError>,
}

impl QualityRun {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl MonitoringElement {
    /// Run every test the registry assigns to this element and replace the
    /// report map with the results.
    ///
    /// Tests see the baseline-relative contents while soft reset is active.
    /// A failing test is recorded as an `Other` report; a failing
    /// enumeration leaves reports and classification untouched.
    pub fn run_quality_tests(&self, registry: &dyn QualityTestRegistry) -> DqmResult<QualityRun> {
        self.run_quality_tests_at(self.name(), registry)
    }

    /// As [`run_quality_tests`](Self::run_quality_tests), but identify the
    /// element to the registry by `path` (its location in a folder tree).
    pub fn run_quality_tests_at(
        &self,
        path: &str,
        registry: &dyn QualityTestRegistry,
    ) -> DqmResult<QualityRun> {
        let _span = info_span!("dqm.quality", element = %path).entered();
        let info = ElementInfo {
            name: path.to_string(),
            kind: self.kind(),
        };

        let mut state = self.lock();
        let tests = registry.tests_for(&info).inspect_err(|err| {
            warn!(element = %info.name, error = %err, "quality test enumeration failed");
        })?;

        let delta = state.delta()?;
        let aggregate: &dyn StatisticalAggregate = state.aggregate.as_ref();
        let view: &dyn AggregateView = match &delta {
            Some(delta) => delta,
            None => &aggregate,
        };

        let mut run = QualityRun::default();
        let mut reports = BTreeMap::new();
        for test in tests {
            if reports.contains_key(&test) {
                continue;
            }
            let report = match registry.execute(&test, view) {
                Ok(report) => report,
                Err(err) => {
                    warn!(element = %info.name, test = %test, error = %err, "quality test failed");
                    let report = QualityReport::other(&test, UNAVAILABLE_ALGORITHM, err.to_string());
                    run.failures.push(err);
                    report
                }
            };
            reports.insert(test.clone(), report);
            run.executed.push(test);
        }

        state.classification = ClassificationIndex::build(&reports);
        state.reports = reports;
        debug!(
            element = %info.name,
            executed = run.executed.len(),
            failures = run.failures.len(),
            errors = state.classification.errors().len(),
            warnings = state.classification.warnings().len(),
            "quality tests run"
        );
        Ok(run)
    }

    /// The latest report of `test`, if that test ran in the last run.
    pub fn get_q_report(&self, test: &str) -> Option<QualityReport> {
        self.lock().reports.get(test).cloned()
    }

    pub fn q_report_exists(&self, test: &str) -> bool {
        self.lock().reports.contains_key(test)
    }

    pub fn q_reports(&self) -> BTreeMap<String, QualityReport> {
        self.lock().reports.clone()
    }

    pub fn q_errors(&self) -> Vec<QualityReport> {
        let state = self.lock();
        ClassificationIndex::resolve(state.classification.errors(), &state.reports)
    }

    pub fn q_warnings(&self) -> Vec<QualityReport> {
        let state = self.lock();
        ClassificationIndex::resolve(state.classification.warnings(), &state.reports)
    }

    pub fn q_others(&self) -> Vec<QualityReport> {
        let state = self.lock();
        ClassificationIndex::resolve(state.classification.others(), &state.reports)
    }

    pub fn has_error(&self) -> bool {
        self.lock().classification.has_errors()
    }

    pub fn has_warning(&self) -> bool {
        self.lock().classification.has_warnings()
    }

    pub fn has_other_report(&self) -> bool {
        self.lock().classification.has_others()
    }
}
