//! Harvest roll-up: one status per tested element, plus counts and an
//! overall status for the whole tree.

use std::collections::BTreeMap;

use dqm_core::{DqmResult, QualityReport, QualityStatus, QualityTestRegistry};
use dqm_element::{FolderRun, Node};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::harvest_span;

/// Status roll-up over a node tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestSummary {
    /// Worst element status; `Ok` when nothing was tested.
    pub overall: QualityStatus,
    /// Elements in the tree, tested or not.
    pub elements: usize,
    /// Elements holding at least one report.
    pub tested: usize,
    pub ok: usize,
    pub errors: usize,
    pub warnings: usize,
    pub others: usize,
    /// Worst status per tested element, keyed by path.
    pub statuses: BTreeMap<String, QualityStatus>,
}

impl HarvestSummary {
    /// Summarise the reports currently held by the tree. Does not run tests.
    pub fn collect(root: &Node) -> Self {
        let elements = root.elements();
        let statuses: BTreeMap<String, QualityStatus> = elements
            .iter()
            .filter_map(|(path, element)| {
                worst(element.q_reports().values()).map(|status| (path.clone(), status))
            })
            .collect();

        let count = |wanted: QualityStatus| statuses.values().filter(|s| **s == wanted).count();
        Self {
            overall: statuses
                .values()
                .copied()
                .max_by_key(|s| s.severity())
                .unwrap_or(QualityStatus::Ok),
            elements: elements.len(),
            tested: statuses.len(),
            ok: count(QualityStatus::Ok),
            errors: count(QualityStatus::Error),
            warnings: count(QualityStatus::Warning),
            others: count(QualityStatus::Other),
            statuses,
        }
    }

    /// Run every assigned test over the tree, then summarise.
    pub fn harvest(root: &Node, registry: &dyn QualityTestRegistry) -> (FolderRun, Self) {
        let _span = harvest_span!(root.name()).entered();
        let run = root.run_quality_tests(registry);
        for (path, err) in &run.errors {
            warn!(element = %path, error = %err, "element skipped in harvest");
        }
        let summary = Self::collect(root);
        info!(
            overall = %summary.overall,
            tested = summary.tested,
            errors = summary.errors,
            warnings = summary.warnings,
            "harvest complete"
        );
        (run, summary)
    }

    pub fn is_healthy(&self) -> bool {
        self.overall == QualityStatus::Ok
    }

    pub fn to_json(&self) -> DqmResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Worst status among `reports`, by severity.
fn worst<'a>(reports: impl IntoIterator<Item = &'a QualityReport>) -> Option<QualityStatus> {
    reports
        .into_iter()
        .map(QualityReport::status)
        .max_by_key(|s| s.severity())
}
