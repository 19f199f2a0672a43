//! Quality-test execution, classification buckets and report freshness.

use dqm_aggregates::{Histogram, Scalar};
use dqm_core::{DqmError, QualityStatus, RegistryError};
use dqm_element::MonitoringElement;
use test_fixtures::golden::ClassificationCase;
use test_fixtures::{list_fixtures, load_fixture, Script, ScriptedRegistry};

fn hist(name: &str) -> MonitoringElement {
    MonitoringElement::new(name, Histogram::new_1d(10, 0.0, 10.0).unwrap())
}

fn names(reports: &[dqm_core::QualityReport]) -> Vec<&str> {
    reports.iter().map(|r| r.test_name()).collect()
}

// ---------------------------------------------------------------------------
// Golden classification cases
// ---------------------------------------------------------------------------

#[test]
fn golden_classification_cases() {
    let files = list_fixtures("golden/classification");
    assert!(!files.is_empty());
    for file in files {
        let relative = format!(
            "golden/classification/{}",
            file.file_name().unwrap().to_str().unwrap()
        );
        let case: ClassificationCase = load_fixture(&relative);
        let registry = case
            .tests
            .iter()
            .fold(ScriptedRegistry::new(), |r, t| r.with_test(&t.name, t.script()));

        let me = hist(&case.element);
        let run = me.run_quality_tests(&registry).unwrap();

        assert_eq!(run.executed.len(), case.tests.len(), "{}", case.description);
        assert_eq!(run.failures.len(), case.expected.failures, "{}", case.description);
        assert_eq!(names(&me.q_errors()), case.expected.errors, "{}", case.description);
        assert_eq!(names(&me.q_warnings()), case.expected.warnings, "{}", case.description);
        assert_eq!(names(&me.q_others()), case.expected.others, "{}", case.description);
        assert_eq!(me.has_error(), !case.expected.errors.is_empty());
        assert_eq!(me.has_warning(), !case.expected.warnings.is_empty());
        assert_eq!(me.has_other_report(), !case.expected.others.is_empty());
        assert_eq!(me.q_reports().len(), case.tests.len());
    }
}

// ---------------------------------------------------------------------------
// Freshness
// ---------------------------------------------------------------------------

#[test]
fn report_absent_before_first_run() {
    let me = hist("occupancy");
    assert!(me.get_q_report("range").is_none());
    assert!(!me.q_report_exists("range"));
    assert!(!me.has_error());
}

#[test]
fn rerun_replaces_report_and_moves_bucket() {
    let mut registry = ScriptedRegistry::new().with_test("range", Script::Status(QualityStatus::Error));
    let me = hist("occupancy");

    me.run_quality_tests(&registry).unwrap();
    assert_eq!(me.get_q_report("range").unwrap().status(), QualityStatus::Error);
    assert!(me.has_error());

    registry.set_script("range", Script::Status(QualityStatus::Warning));
    me.run_quality_tests(&registry).unwrap();
    let report = me.get_q_report("range").unwrap();
    assert_eq!(report.status(), QualityStatus::Warning);
    assert!(!me.has_error());
    assert!(me.has_warning());
    assert!(me.q_errors().is_empty());
    assert_eq!(names(&me.q_warnings()), ["range"]);
}

#[test]
fn unregistered_tests_disappear_on_rerun() {
    let mut registry = ScriptedRegistry::new()
        .with_test("range", Script::Status(QualityStatus::Error))
        .with_test("mean", Script::Status(QualityStatus::Ok));
    let me = hist("occupancy");
    me.run_quality_tests(&registry).unwrap();
    assert!(me.q_report_exists("range"));

    registry.remove_test("range");
    me.run_quality_tests(&registry).unwrap();
    assert!(me.get_q_report("range").is_none());
    assert!(!me.has_error());
    assert!(me.q_report_exists("mean"));
}

#[test]
fn tests_see_current_contents() {
    let registry = ScriptedRegistry::new().with_test("stats", Script::MinEntries(3.0));
    let me = hist("occupancy");
    me.fill(1.0).unwrap();
    me.run_quality_tests(&registry).unwrap();
    assert_eq!(me.get_q_report("stats").unwrap().status(), QualityStatus::Error);

    me.fill(2.0).unwrap();
    me.fill(3.0).unwrap();
    me.run_quality_tests(&registry).unwrap();
    let report = me.get_q_report("stats").unwrap();
    assert_eq!(report.status(), QualityStatus::Ok);
    assert_eq!(report.result(), Some(3.0));
}

#[test]
fn tests_see_delta_while_soft_reset_active() {
    let registry = ScriptedRegistry::new().with_test("stats", Script::MinEntries(2.0));
    let me = hist("occupancy");
    for x in [1.0, 2.0, 3.0] {
        me.fill(x).unwrap();
    }
    me.soft_reset();
    me.fill(4.0).unwrap();
    me.run_quality_tests(&registry).unwrap();
    let report = me.get_q_report("stats").unwrap();
    assert_eq!(report.result(), Some(1.0));
    assert_eq!(report.status(), QualityStatus::Error);
}

#[test]
fn reports_survive_cycle_end() {
    let registry = ScriptedRegistry::new().with_test("range", Script::Status(QualityStatus::Error));
    let me = hist("occupancy");
    me.set_reset_me(true);
    me.run_quality_tests(&registry).unwrap();
    me.end_cycle();
    assert!(me.has_error());
    assert!(me.get_q_report("range").is_some());
}

// ---------------------------------------------------------------------------
// Registry failures
// ---------------------------------------------------------------------------

#[test]
fn execution_failure_becomes_other_report() {
    let registry = ScriptedRegistry::new()
        .with_test("range", Script::Status(QualityStatus::Ok))
        .with_test("shape", Script::Fail("reference missing".into()));
    let me = hist("occupancy");
    let run = me.run_quality_tests(&registry).unwrap();

    assert!(!run.is_clean());
    assert_eq!(run.executed, ["range", "shape"]);
    assert!(matches!(
        &run.failures[..],
        [RegistryError::ExecutionFailed { test, .. }] if test == "shape"
    ));
    let report = me.get_q_report("shape").unwrap();
    assert_eq!(report.status(), QualityStatus::Other);
    assert!(report.message().contains("reference missing"));
    assert!(me.has_other_report());
    assert!(!me.has_error());
}

#[test]
fn enumeration_failure_leaves_state_unchanged() {
    let mut registry =
        ScriptedRegistry::new().with_test("range", Script::Status(QualityStatus::Error));
    let me = hist("occupancy");
    me.run_quality_tests(&registry).unwrap();

    registry.set_available("occupancy", false);
    registry.set_script("range", Script::Status(QualityStatus::Ok));
    let err = me.run_quality_tests(&registry).unwrap_err();
    assert!(matches!(
        err,
        DqmError::Registry(RegistryError::Unavailable { .. })
    ));
    assert!(me.has_error());
    assert_eq!(me.get_q_report("range").unwrap().status(), QualityStatus::Error);
}

#[test]
fn scalar_elements_run_tests_too() {
    let registry = ScriptedRegistry::new()
        .with_test("value", Script::Status(QualityStatus::Warning))
        .with_test("stats", Script::MinEntries(1.0));
    let me = MonitoringElement::new("rate", Scalar::real(2.5));
    let run = me.run_quality_tests(&registry).unwrap();
    // scalars have no entries, so the entry-based test cannot be evaluated
    assert_eq!(run.failures.len(), 1);
    assert!(me.has_warning());
    assert!(me.has_other_report());
}

#[test]
fn test_listed_twice_runs_once() {
    let me = hist("occupancy");
    let registry = ScriptedRegistry::new()
        .with_test("dead", Script::Status(QualityStatus::Error))
        .with_test("range", Script::Status(QualityStatus::Warning))
        .assign("occupancy", &["dead", "range", "dead"]);

    let run = me.run_quality_tests(&registry).unwrap();
    assert_eq!(run.executed, ["dead", "range"]);
    assert_eq!(registry.executions(), 2);
    assert_eq!(names(&me.q_errors()), ["dead"]);
    assert_eq!(me.q_reports().len(), 2);
}
