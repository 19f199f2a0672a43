//! Harvest roll-up over folder trees, including the golden harvest cases.

use dqm_aggregates::Histogram;
use dqm_core::config::ObservabilityConfig;
use dqm_core::QualityStatus;
use dqm_element::{Folder, MonitoringElement, Node};
use dqm_observability::tracing_setup::spans::names;
use dqm_observability::{init, HarvestSummary};
use test_fixtures::golden::HarvestCase;
use test_fixtures::{list_fixtures, load_fixture, Script, ScriptedRegistry};

/// Place `element` at `path` below `folder`, creating intermediate folders.
fn insert(folder: &mut Folder, path: &str, element: MonitoringElement) {
    match path.split_once('/') {
        None => folder.add(element).unwrap(),
        Some((head, rest)) => {
            if folder.child(head).is_none() {
                folder.add(Folder::new(head)).unwrap();
            }
            match folder.child_mut(head) {
                Some(Node::Folder(child)) => insert(child, rest, element),
                _ => panic!("{head} is not a folder"),
            }
        }
    }
}

fn hist(name: &str) -> MonitoringElement {
    MonitoringElement::new(name, Histogram::new_1d(10, 0.0, 10.0).unwrap())
}

#[test]
fn golden_harvest_cases() {
    let files = list_fixtures("golden/harvest");
    assert!(!files.is_empty());
    for file in files {
        let relative = format!(
            "golden/harvest/{}",
            file.file_name().unwrap().to_string_lossy()
        );
        let case: HarvestCase = load_fixture(&relative);

        let mut root = Folder::new(&case.root);
        let mut registry = ScriptedRegistry::new();
        for element in &case.elements {
            let name = element.path.rsplit('/').next().unwrap();
            insert(&mut root, &element.path, hist(name));
            let mut tests = Vec::new();
            for test in &element.tests {
                registry = registry.with_test(&test.name, test.script());
                tests.push(test.name.as_str());
            }
            registry = registry.assign(&format!("{}/{}", case.root, element.path), &tests);
        }
        let root = Node::Folder(root);

        let (run, summary) = HarvestSummary::harvest(&root, &registry);
        assert!(run.is_clean(), "{}", case.description);

        let actual = serde_json::to_value(&summary).unwrap();
        assert_eq!(actual, case.expected, "{}", case.description);
    }
}

#[test]
fn empty_tree_is_healthy() {
    let root = Node::Folder(Folder::new("empty"));
    let summary = HarvestSummary::collect(&root);
    assert!(summary.is_healthy());
    assert_eq!(summary.elements, 0);
    assert!(summary.statuses.is_empty());
}

#[test]
fn collect_reads_reports_without_running_tests() {
    let mut root = Folder::new("detector");
    root.add(hist("occupancy")).unwrap();
    let root = Node::Folder(root);
    let registry = ScriptedRegistry::new().with_test("dead", Script::Status(QualityStatus::Warning));

    let before = HarvestSummary::collect(&root);
    assert_eq!(before.tested, 0);
    assert_eq!(before.elements, 1);
    assert_eq!(registry.executions(), 0);

    root.run_quality_tests(&registry);
    let after = HarvestSummary::collect(&root);
    assert_eq!(after.overall, QualityStatus::Warning);
    assert_eq!(after.statuses["detector/occupancy"], QualityStatus::Warning);
    assert!(!after.is_healthy());
}

#[test]
fn other_only_elements_count_as_others() {
    let mut root = Folder::new("detector");
    root.add(hist("rate")).unwrap();
    let root = Node::Folder(root);
    let registry = ScriptedRegistry::new().with_test("flaky", Script::Fail("timeout".into()));

    let (run, summary) = HarvestSummary::harvest(&root, &registry);
    assert!(!run.is_clean());
    assert!(run.errors.is_empty());
    assert_eq!(summary.others, 1);
    assert_eq!(summary.overall, QualityStatus::Other);
}

#[test]
fn summary_serializes_lowercase_statuses() {
    let mut root = Folder::new("detector");
    root.add(hist("energy")).unwrap();
    let root = Node::Folder(root);
    let registry = ScriptedRegistry::new().with_test("range", Script::Status(QualityStatus::Error));
    let (_, summary) = HarvestSummary::harvest(&root, &registry);

    let json = summary.to_json().unwrap();
    assert!(json.contains("\"overall\": \"error\""));
    let back: HarvestSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, summary);
}

#[test]
fn init_is_idempotent() {
    let config = ObservabilityConfig::default();
    init(&config);
    assert!(!init(&config));
    assert_eq!(names::HARVEST, "dqm.harvest");
}
