//! Folder hierarchy: container errors, path lookup and recursive queries.

use dqm_aggregates::{Histogram, Scalar};
use dqm_core::{Axis, DqmError, QualityStatus};
use dqm_element::{CycleOutcome, Folder, MonitoringElement, Node};
use test_fixtures::{Script, ScriptedRegistry};

fn hist(name: &str) -> MonitoringElement {
    MonitoringElement::new(name, Histogram::new_1d(10, 0.0, 10.0).unwrap())
}

/// detector/{tracker/{occupancy, residuals}, calo/{energy}, rate}
fn detector() -> Node {
    let mut tracker = Folder::new("tracker");
    tracker.add(hist("occupancy")).unwrap();
    tracker.add(hist("residuals")).unwrap();
    let mut calo = Folder::new("calo");
    calo.add(hist("energy")).unwrap();
    let mut root = Folder::new("detector");
    root.add(tracker).unwrap();
    root.add(calo).unwrap();
    root.add(MonitoringElement::new("rate", Scalar::real(0.0))).unwrap();
    Node::Folder(root)
}

fn registry() -> ScriptedRegistry {
    ScriptedRegistry::new()
        .with_test("dead", Script::Status(QualityStatus::Error))
        .with_test("shape", Script::Status(QualityStatus::Warning))
        .with_test("range", Script::Status(QualityStatus::Ok))
        .assign("detector/tracker/occupancy", &["dead", "range"])
        .assign("detector/tracker/residuals", &["shape"])
        .assign("detector/calo/energy", &["range"])
        .assign("detector/rate", &[])
}

// ---------------------------------------------------------------------------
// Construction and lookup
// ---------------------------------------------------------------------------

#[test]
fn duplicate_names_are_rejected() {
    let mut folder = Folder::new("tracker");
    folder.add(hist("occupancy")).unwrap();
    let err = folder.add(hist("occupancy")).unwrap_err();
    assert!(matches!(err, DqmError::DuplicateName { ref name, .. } if name == "occupancy"));
    assert_eq!(folder.len(), 1);
}

#[test]
fn names_with_separator_are_rejected() {
    let mut folder = Folder::new("tracker");
    let err = folder.add(hist("a/b")).unwrap_err();
    assert!(matches!(
        err,
        DqmError::InvalidName { folder: ref parent, ref name } if parent == "tracker" && name == "a/b"
    ));
    assert_eq!(err.to_string(), "invalid node name \"a/b\" in folder tracker");
    assert!(matches!(folder.add(hist("")), Err(DqmError::InvalidName { .. })));
    assert!(folder.is_empty());
}

#[test]
fn find_resolves_paths() {
    let root = detector();
    assert_eq!(root.find("tracker/residuals").unwrap().name(), "residuals");
    assert!(root.find("calo").unwrap().is_folder());
    assert_eq!(root.find("").unwrap().name(), "detector");
    assert!(matches!(
        root.find("tracker/missing"),
        Err(DqmError::NotFound { .. })
    ));
    // elements have no children
    assert!(root.find("rate/x").is_err());
}

#[test]
fn elements_are_listed_depth_first_with_paths() {
    let paths: Vec<String> = detector().elements().into_iter().map(|(p, _)| p).collect();
    assert_eq!(
        paths,
        [
            "detector/calo/energy",
            "detector/rate",
            "detector/tracker/occupancy",
            "detector/tracker/residuals",
        ]
    );
}

#[test]
fn add_element_returns_shared_handle() {
    let mut folder = Folder::new("tracker");
    let handle = folder.add_element(hist("occupancy")).unwrap();
    handle.fill(1.0).unwrap();
    let node = Node::Folder(folder);
    assert_eq!(node.find("occupancy").unwrap().entries().unwrap(), 1.0);
}

// ---------------------------------------------------------------------------
// Container semantics
// ---------------------------------------------------------------------------

#[test]
fn folder_mutations_fail_with_invalid_operation() {
    let root = detector();
    let err = root.fill(1.0).unwrap_err();
    assert!(matches!(
        err,
        DqmError::InvalidOperation { ref element, operation: "fill" } if element == "detector"
    ));
    assert!(matches!(
        root.set_bin_content(1, 2.0),
        Err(DqmError::InvalidOperation { .. })
    ));
    assert!(matches!(root.entries(), Err(DqmError::InvalidOperation { .. })));
    assert!(matches!(root.mean(Axis::X), Err(DqmError::InvalidOperation { .. })));
    assert_eq!(root.value_string(), "");
}

#[test]
fn element_nodes_pass_operations_through() {
    let root = detector();
    let node = root.find("tracker/occupancy").unwrap();
    node.fill(2.5).unwrap();
    assert_eq!(node.bin_content(3).unwrap(), 1.0);
    let rate = root.find("rate").unwrap();
    rate.fill(2.5).unwrap();
    assert_eq!(rate.tag_string(), "<rate>f = 2.5</rate>");
}

#[test]
fn has_error_is_or_over_descendants() {
    let root = detector();
    assert!(!root.has_error());

    let run = root.run_quality_tests(&registry());
    assert!(run.is_clean());
    assert_eq!(run.runs.len(), 4);

    assert!(root.has_error());
    assert!(root.has_warning());
    assert!(!root.has_other_report());
    assert!(root.find("tracker").unwrap().has_error());
    assert!(!root.find("calo").unwrap().has_error());
    assert!(!root.find("calo").unwrap().has_warning());
}

#[test]
fn buckets_are_unions_of_descendants() {
    let root = detector();
    let registry = registry().assign("detector/calo/energy", &["dead", "range"]);
    root.run_quality_tests(&registry);
    assert_eq!(root.q_errors().len(), 2);
    assert_eq!(root.q_warnings().len(), 1);
    assert!(root.q_others().is_empty());
}

#[test]
fn get_q_report_returns_first_depth_first_match() {
    let root = detector();
    let registry = registry()
        .with_test("range", Script::Status(QualityStatus::Ok))
        .assign("detector/calo/energy", &["range"]);
    root.run_quality_tests(&registry);

    assert!(root.get_q_report("range").is_some());
    let all = root.find_q_reports("range");
    let paths: Vec<&str> = all.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(paths, ["detector/calo/energy", "detector/tracker/occupancy"]);
    assert!(root.get_q_report("missing").is_none());
}

#[test]
fn enumeration_failure_is_isolated_per_element() {
    let root = detector();
    let registry = registry().unavailable_for("detector/tracker/residuals");
    let run = root.run_quality_tests(&registry);
    assert!(!run.is_clean());
    assert_eq!(run.errors.len(), 1);
    assert!(run.errors.contains_key("detector/tracker/residuals"));
    assert_eq!(run.runs.len(), 3);
    assert!(root.has_error());
    assert!(!root.has_warning());
}

// ---------------------------------------------------------------------------
// Recursive lifecycle
// ---------------------------------------------------------------------------

#[test]
fn end_cycle_recurses_and_was_updated_is_any() {
    let root = detector();
    assert!(root.was_updated());
    root.set_reset_me(true);
    root.find("calo/energy").unwrap().fill(1.0).unwrap();

    let outcomes = root.end_cycle();
    assert_eq!(outcomes.len(), 4);
    assert!(outcomes.values().all(|o| *o == CycleOutcome::Cleared));
    assert!(!root.was_updated());
    assert_eq!(root.find("calo/energy").unwrap().entries().unwrap(), 0.0);

    root.find("tracker/residuals").unwrap().fill(1.0).unwrap();
    assert!(root.was_updated());
    assert!(!root.find("calo").unwrap().was_updated());
}

#[test]
fn accumulate_and_soft_reset_apply_to_all_elements() {
    let root = detector();
    root.set_reset_me(true);
    root.set_accumulate(true);
    let occupancy = root.find("tracker/occupancy").unwrap();
    occupancy.fill(1.0).unwrap();
    root.end_cycle();
    assert_eq!(occupancy.entries().unwrap(), 1.0);

    root.soft_reset();
    assert_eq!(occupancy.entries().unwrap(), 0.0);
    root.disable_soft_reset();
    assert_eq!(occupancy.entries().unwrap(), 1.0);
}
