//! Container hierarchy over monitoring elements.
//!
//! Folders have no aggregate of their own: mutations and statistics on a
//! folder fail with `InvalidOperation`, while flag and report queries
//! aggregate over descendants. Aggregation locks one element at a time.

use std::collections::BTreeMap;
use std::sync::Arc;

use dqm_core::constants::PATH_SEPARATOR;
use dqm_core::{
    Axis, BinIndex, DqmError, DqmResult, FillPoint, QualityReport, QualityTestRegistry,
};
use tracing::{debug, info_span, warn};

use crate::element::{CycleOutcome, MonitoringElement};
use crate::quality::QualityRun;

/// A leaf element or a folder of further nodes.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Arc<MonitoringElement>),
    Folder(Folder),
}

/// Named, ordered collection of child nodes.
#[derive(Debug, Clone, Default)]
pub struct Folder {
    name: String,
    children: BTreeMap<String, Node>,
}

/// Per-element results of a recursive quality-test run.
#[derive(Debug, Default)]
pub struct FolderRun {
    /// Successful runs keyed by element path.
    pub runs: BTreeMap<String, QualityRun>,
    /// Elements whose test enumeration failed, keyed by element path.
    pub errors: BTreeMap<String, DqmError>,
}

impl FolderRun {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.runs.values().all(QualityRun::is_clean)
    }
}

impl Folder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a child. Names must be unique within the folder and must not
    /// contain the path separator.
    pub fn add(&mut self, node: impl Into<Node>) -> DqmResult<()> {
        let node = node.into();
        let name = node.name().to_string();
        if name.is_empty() || name.contains(PATH_SEPARATOR) {
            return Err(DqmError::InvalidName {
                folder: self.name.clone(),
                name,
            });
        }
        if self.children.contains_key(&name) {
            return Err(DqmError::DuplicateName {
                folder: self.name.clone(),
                name,
            });
        }
        debug!(folder = %self.name, child = %name, "node added");
        self.children.insert(name, node);
        Ok(())
    }

    /// Wrap `element` in an `Arc`, add it, and hand back the shared handle.
    pub fn add_element(&mut self, element: MonitoringElement) -> DqmResult<Arc<MonitoringElement>> {
        let element = Arc::new(element);
        self.add(Node::Element(Arc::clone(&element)))?;
        Ok(element)
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    /// Children in name order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Element(element) => element.name(),
            Node::Folder(folder) => folder.name(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder(_))
    }

    pub fn as_element(&self) -> Option<&Arc<MonitoringElement>> {
        match self {
            Node::Element(element) => Some(element),
            Node::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Node::Element(_) => None,
            Node::Folder(folder) => Some(folder),
        }
    }

    /// Resolve a `/`-separated path relative to this node. The empty path
    /// is the node itself.
    pub fn find(&self, path: &str) -> DqmResult<&Node> {
        let mut current = self;
        for segment in path.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
            current = current
                .as_folder()
                .and_then(|folder| folder.child(segment))
                .ok_or_else(|| DqmError::NotFound {
                    path: path.to_string(),
                })?;
        }
        Ok(current)
    }

    /// Every element below this node with its path, depth-first.
    pub fn elements(&self) -> Vec<(String, Arc<MonitoringElement>)> {
        let mut out = Vec::new();
        self.collect_elements("", &mut out);
        out
    }

    fn collect_elements(&self, prefix: &str, out: &mut Vec<(String, Arc<MonitoringElement>)>) {
        let path = if prefix.is_empty() {
            self.name().to_string()
        } else {
            format!("{prefix}{PATH_SEPARATOR}{}", self.name())
        };
        match self {
            Node::Element(element) => out.push((path, Arc::clone(element))),
            Node::Folder(folder) => {
                for child in folder.children() {
                    child.collect_elements(&path, out);
                }
            }
        }
    }

    fn element_or<'a>(&'a self, operation: &'static str) -> DqmResult<&'a MonitoringElement> {
        match self {
            Node::Element(element) => Ok(element.as_ref()),
            Node::Folder(folder) => Err(DqmError::container(folder.name(), operation)),
        }
    }

    fn any_element(&self, predicate: impl Fn(&MonitoringElement) -> bool) -> bool {
        self.elements()
            .iter()
            .any(|(_, element)| predicate(element.as_ref()))
    }

    fn gather<T>(&self, select: impl Fn(&MonitoringElement) -> Vec<T>) -> Vec<T> {
        self.elements()
            .into_iter()
            .flat_map(|(_, element)| select(element.as_ref()))
            .collect()
    }

    // ── Element passthroughs ─────────────────────────────────────────────

    pub fn fill(&self, point: impl Into<FillPoint>) -> DqmResult<()> {
        self.element_or("fill")?.fill(point)
    }

    pub fn set_bin_content(&self, bin: impl Into<BinIndex>, content: f64) -> DqmResult<()> {
        self.element_or("set_bin_content")?.set_bin_content(bin, content)
    }

    pub fn set_bin_error(&self, bin: impl Into<BinIndex>, error: f64) -> DqmResult<()> {
        self.element_or("set_bin_error")?.set_bin_error(bin, error)
    }

    pub fn set_entries(&self, entries: f64) -> DqmResult<()> {
        self.element_or("set_entries")?.set_entries(entries)
    }

    pub fn set_bin_label(&self, bin: usize, label: &str, axis: Axis) -> DqmResult<()> {
        self.element_or("set_bin_label")?.set_bin_label(bin, label, axis)
    }

    pub fn set_axis_range(&self, min: f64, max: f64, axis: Axis) -> DqmResult<()> {
        self.element_or("set_axis_range")?.set_axis_range(min, max, axis)
    }

    pub fn set_text(&self, text: &str) -> DqmResult<()> {
        self.element_or("set_text")?.set_text(text)
    }

    pub fn entries(&self) -> DqmResult<f64> {
        self.element_or("entries")?.entries()
    }

    pub fn bin_content(&self, bin: impl Into<BinIndex>) -> DqmResult<f64> {
        self.element_or("bin_content")?.bin_content(bin)
    }

    pub fn mean(&self, axis: Axis) -> DqmResult<f64> {
        self.element_or("mean")?.mean(axis)
    }

    pub fn rms(&self, axis: Axis) -> DqmResult<f64> {
        self.element_or("rms")?.rms(axis)
    }

    /// Value string of an element; empty for folders.
    pub fn value_string(&self) -> String {
        self.as_element()
            .map(|element| element.value_string())
            .unwrap_or_default()
    }

    /// Tagged value of an element; empty for folders.
    pub fn tag_string(&self) -> String {
        self.as_element()
            .map(|element| element.tag_string())
            .unwrap_or_default()
    }

    // ── Recursive queries ────────────────────────────────────────────────

    pub fn has_error(&self) -> bool {
        self.any_element(MonitoringElement::has_error)
    }

    pub fn has_warning(&self) -> bool {
        self.any_element(MonitoringElement::has_warning)
    }

    pub fn has_other_report(&self) -> bool {
        self.any_element(MonitoringElement::has_other_report)
    }

    /// True if any descendant element changed during the current cycle.
    pub fn was_updated(&self) -> bool {
        self.any_element(MonitoringElement::was_updated)
    }

    pub fn q_errors(&self) -> Vec<QualityReport> {
        self.gather(MonitoringElement::q_errors)
    }

    pub fn q_warnings(&self) -> Vec<QualityReport> {
        self.gather(MonitoringElement::q_warnings)
    }

    pub fn q_others(&self) -> Vec<QualityReport> {
        self.gather(MonitoringElement::q_others)
    }

    /// First report named `test` in depth-first order.
    pub fn get_q_report(&self, test: &str) -> Option<QualityReport> {
        match self {
            Node::Element(element) => element.get_q_report(test),
            Node::Folder(folder) => folder.children().find_map(|child| child.get_q_report(test)),
        }
    }

    /// Every report named `test` below this node, with its element path.
    pub fn find_q_reports(&self, test: &str) -> Vec<(String, QualityReport)> {
        self.elements()
            .into_iter()
            .filter_map(|(path, element)| element.get_q_report(test).map(|r| (path, r)))
            .collect()
    }

    // ── Recursive lifecycle ──────────────────────────────────────────────

    /// Cycle-end transition on every descendant element.
    pub fn end_cycle(&self) -> BTreeMap<String, CycleOutcome> {
        let _span = info_span!("dqm.cycle", node = %self.name()).entered();
        self.elements()
            .into_iter()
            .map(|(path, element)| {
                let outcome = element.end_cycle();
                (path, outcome)
            })
            .collect()
    }

    pub fn set_accumulate(&self, flag: bool) {
        for (_, element) in self.elements() {
            element.set_accumulate(flag);
        }
    }

    pub fn set_reset_me(&self, flag: bool) {
        for (_, element) in self.elements() {
            element.set_reset_me(flag);
        }
    }

    pub fn soft_reset(&self) {
        for (_, element) in self.elements() {
            element.soft_reset();
        }
    }

    pub fn disable_soft_reset(&self) {
        for (_, element) in self.elements() {
            element.disable_soft_reset();
        }
    }

    /// Run quality tests on every descendant element, one at a time, each
    /// identified to the registry by its path. An enumeration failure on one
    /// element does not stop the others.
    pub fn run_quality_tests(&self, registry: &dyn QualityTestRegistry) -> FolderRun {
        let mut result = FolderRun::default();
        for (path, element) in self.elements() {
            match element.run_quality_tests_at(&path, registry) {
                Ok(run) => {
                    result.runs.insert(path, run);
                }
                Err(err) => {
                    warn!(element = %path, error = %err, "quality tests skipped");
                    result.errors.insert(path, err);
                }
            }
        }
        result
    }
}

impl From<Folder> for Node {
    fn from(folder: Folder) -> Self {
        Node::Folder(folder)
    }
}

impl From<MonitoringElement> for Node {
    fn from(element: MonitoringElement) -> Self {
        Node::Element(Arc::new(element))
    }
}

impl From<Arc<MonitoringElement>> for Node {
    fn from(element: Arc<MonitoringElement>) -> Self {
        Node::Element(element)
    }
}
