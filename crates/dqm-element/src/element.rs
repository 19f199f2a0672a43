//! [`MonitoringElement`]: the lock-guarded aggregate wrapper and its lifecycle.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use dqm_core::config::ElementConfig;
use dqm_core::{
    AggregateKind, AggregateSnapshot, AggregateView, Axis, BinIndex, DqmResult, FillPoint,
    QualityReport, StatisticalAggregate,
};
use tracing::{debug, trace, warn};

use crate::classification::ClassificationIndex;
use crate::policy::{Getter, SoftResetPolicy};

/// What the cycle-end transition did to the contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Contents were reset.
    Cleared,
    /// Contents were kept (no reset requested, or accumulating).
    Retained,
}

/// Everything behind the element's lock.
#[derive(Debug)]
pub(crate) struct ElementState {
    pub(crate) aggregate: Box<dyn StatisticalAggregate>,
    pub(crate) varied_since_last_cycle: bool,
    pub(crate) reset_at_cycle_end: bool,
    pub(crate) accumulating: bool,
    pub(crate) soft_reset_baseline: Option<AggregateSnapshot>,
    pub(crate) last_touched: DateTime<Utc>,
    pub(crate) reports: BTreeMap<String, QualityReport>,
    pub(crate) classification: ClassificationIndex,
}

impl ElementState {
    fn touch(&mut self) {
        self.varied_since_last_cycle = true;
        self.last_touched = Utc::now();
    }

    /// Contents as seen by baseline-relative readers.
    pub(crate) fn delta(&self) -> DqmResult<Option<AggregateSnapshot>> {
        self.soft_reset_baseline
            .as_ref()
            .map(|baseline| self.aggregate.snapshot().delta(baseline))
            .transpose()
    }
}

/// A named statistical aggregate with cycle-tracking, reset policy and
/// quality-test results.
///
/// All state sits behind one private mutex; every public operation holds it
/// for its whole duration, so a fill and a cycle-end transition on the same
/// element never interleave.
pub struct MonitoringElement {
    name: String,
    kind: AggregateKind,
    created_at: DateTime<Utc>,
    state: Mutex<ElementState>,
}

impl MonitoringElement {
    /// Create an element with default lifecycle flags.
    pub fn new(name: impl Into<String>, aggregate: impl StatisticalAggregate + 'static) -> Self {
        Self::with_config(name, aggregate, &ElementConfig::default())
    }

    /// Create an element with lifecycle flags taken from `config`.
    pub fn with_config(
        name: impl Into<String>,
        aggregate: impl StatisticalAggregate + 'static,
        config: &ElementConfig,
    ) -> Self {
        Self::from_boxed(name, Box::new(aggregate), config)
    }

    pub fn from_boxed(
        name: impl Into<String>,
        aggregate: Box<dyn StatisticalAggregate>,
        config: &ElementConfig,
    ) -> Self {
        let now = Utc::now();
        let kind = aggregate.kind();
        Self {
            name: name.into(),
            kind,
            created_at: now,
            state: Mutex::new(ElementState {
                aggregate,
                // a never-filled element is still harvested once
                varied_since_last_cycle: true,
                reset_at_cycle_end: config.reset_at_cycle_end,
                accumulating: config.accumulate,
                soft_reset_baseline: None,
                last_touched: now,
                reports: BTreeMap::new(),
                classification: ClassificationIndex::default(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AggregateKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_touched(&self) -> DateTime<Utc> {
        self.lock().last_touched
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, ElementState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!(element = %self.name, "element lock poisoned, recovering state");
            poisoned.into_inner()
        })
    }

    fn mutate<F>(&self, operation: &'static str, f: F) -> DqmResult<()>
    where
        F: FnOnce(&mut dyn StatisticalAggregate) -> DqmResult<()>,
    {
        let mut state = self.lock();
        f(state.aggregate.as_mut())?;
        state.touch();
        trace!(element = %self.name, operation, "aggregate updated");
        Ok(())
    }

    /// Read through the soft-reset policy: baseline-relative contents for
    /// getters the policy marks as such, the live aggregate otherwise.
    fn read<T, F>(&self, getter: Getter, f: F) -> DqmResult<T>
    where
        F: FnOnce(&dyn AggregateView) -> DqmResult<T>,
    {
        let state = self.lock();
        match &state.soft_reset_baseline {
            Some(baseline) if SoftResetPolicy::is_baseline_relative(self.kind, getter) => {
                let delta = state.aggregate.snapshot().delta(baseline)?;
                f(&delta)
            }
            _ => {
                let aggregate: &dyn StatisticalAggregate = state.aggregate.as_ref();
                f(&aggregate)
            }
        }
    }

    // ── Fills and setters ────────────────────────────────────────────────

    /// Fill by arity: `x`, `(x, y)` / `(x, w)`, `(x, y, z)` / `(x, y, w)`,
    /// `(x, y, z, w)`.
    pub fn fill(&self, point: impl Into<FillPoint>) -> DqmResult<()> {
        let point = point.into();
        self.mutate("fill", |agg| agg.fill(point))
    }

    pub fn set_bin_content(&self, bin: impl Into<BinIndex>, content: f64) -> DqmResult<()> {
        let bin = bin.into();
        self.mutate("set_bin_content", |agg| agg.set_bin_content(bin, content))
    }

    pub fn set_bin_error(&self, bin: impl Into<BinIndex>, error: f64) -> DqmResult<()> {
        let bin = bin.into();
        self.mutate("set_bin_error", |agg| agg.set_bin_error(bin, error))
    }

    pub fn set_entries(&self, entries: f64) -> DqmResult<()> {
        self.mutate("set_entries", |agg| agg.set_entries(entries))
    }

    pub fn set_bin_label(&self, bin: usize, label: &str, axis: Axis) -> DqmResult<()> {
        self.mutate("set_bin_label", |agg| agg.set_bin_label(bin, label, axis))
    }

    pub fn set_axis_range(&self, min: f64, max: f64, axis: Axis) -> DqmResult<()> {
        self.mutate("set_axis_range", |agg| agg.set_axis_range(min, max, axis))
    }

    /// String fill: replaces the value of a string scalar.
    pub fn set_text(&self, text: &str) -> DqmResult<()> {
        self.mutate("set_text", |agg| agg.set_text(text))
    }

    // ── Getters (soft-reset aware, see `SoftResetPolicy`) ────────────────

    pub fn entries(&self) -> DqmResult<f64> {
        self.read(Getter::Entries, |v| v.entries())
    }

    pub fn bin_content(&self, bin: impl Into<BinIndex>) -> DqmResult<f64> {
        let bin = bin.into();
        self.read(Getter::BinContent, |v| v.bin_content(bin))
    }

    pub fn bin_error(&self, bin: impl Into<BinIndex>) -> DqmResult<f64> {
        let bin = bin.into();
        self.read(Getter::BinError, |v| v.bin_error(bin))
    }

    pub fn bin_entries(&self, bin: usize) -> DqmResult<f64> {
        self.read(Getter::BinEntries, |v| v.bin_entries(bin))
    }

    pub fn mean(&self, axis: Axis) -> DqmResult<f64> {
        self.read(Getter::Mean, |v| v.mean(axis))
    }

    pub fn mean_error(&self, axis: Axis) -> DqmResult<f64> {
        self.read(Getter::MeanError, |v| v.mean_error(axis))
    }

    pub fn rms(&self, axis: Axis) -> DqmResult<f64> {
        self.read(Getter::Rms, |v| v.rms(axis))
    }

    pub fn rms_error(&self, axis: Axis) -> DqmResult<f64> {
        self.read(Getter::RmsError, |v| v.rms_error(axis))
    }

    pub fn y_min(&self) -> DqmResult<f64> {
        self.read(Getter::YMin, |v| v.y_min())
    }

    pub fn y_max(&self) -> DqmResult<f64> {
        self.read(Getter::YMax, |v| v.y_max())
    }

    pub fn n_bins(&self, axis: Axis) -> DqmResult<usize> {
        self.lock().aggregate.n_bins(axis)
    }

    /// Copy of the live contents, ignoring any soft-reset baseline.
    pub fn absolute_snapshot(&self) -> AggregateSnapshot {
        self.lock().aggregate.snapshot()
    }

    /// Contents accumulated since `soft_reset()`, or `None` when inactive.
    pub fn delta_snapshot(&self) -> DqmResult<Option<AggregateSnapshot>> {
        self.lock().delta()
    }

    /// Scoped raw access to the aggregate under the element's lock.
    pub fn with_aggregate<R>(&self, f: impl FnOnce(&dyn StatisticalAggregate) -> R) -> R {
        let state = self.lock();
        f(state.aggregate.as_ref())
    }

    pub fn value_string(&self) -> String {
        self.lock().aggregate.value_string()
    }

    /// `<name>value</name>`.
    pub fn tag_string(&self) -> String {
        format!("<{0}>{1}</{0}>", self.name, self.value_string())
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// True if the element changed since the last cycle-end transition.
    pub fn was_updated(&self) -> bool {
        self.lock().varied_since_last_cycle
    }

    /// Clear the "was updated" flag without touching contents.
    pub fn reset_update(&self) {
        self.lock().varied_since_last_cycle = false;
    }

    /// Request (or cancel) clearing of contents at each cycle end.
    pub fn set_reset_me(&self, flag: bool) {
        self.lock().reset_at_cycle_end = flag;
    }

    pub fn reset_me(&self) -> bool {
        self.lock().reset_at_cycle_end
    }

    /// Toggle accumulation; takes effect at the next cycle end.
    pub fn set_accumulate(&self, flag: bool) {
        let mut state = self.lock();
        if state.accumulating != flag {
            debug!(element = %self.name, accumulate = flag, "accumulate toggled");
        }
        state.accumulating = flag;
    }

    pub fn enable_accumulate(&self) {
        self.set_accumulate(true);
    }

    pub fn disable_accumulate(&self) {
        self.set_accumulate(false);
    }

    pub fn is_accumulating(&self) -> bool {
        self.lock().accumulating
    }

    /// Cycle-end transition: reset contents iff reset is requested and the
    /// element is not accumulating, then clear the "was updated" flag.
    /// Quality reports and the soft-reset baseline are left alone.
    pub fn end_cycle(&self) -> CycleOutcome {
        let mut state = self.lock();
        let outcome = if state.reset_at_cycle_end && !state.accumulating {
            state.aggregate.reset();
            CycleOutcome::Cleared
        } else {
            CycleOutcome::Retained
        };
        state.varied_since_last_cycle = false;
        debug!(element = %self.name, ?outcome, "cycle ended");
        outcome
    }

    /// Capture the current contents as baseline. No-op if already active.
    pub fn soft_reset(&self) {
        let mut state = self.lock();
        if state.soft_reset_baseline.is_some() {
            debug!(element = %self.name, "soft reset already active");
            return;
        }
        state.soft_reset_baseline = Some(state.aggregate.snapshot());
        debug!(element = %self.name, "soft reset enabled");
    }

    /// Drop the baseline; getters revert to absolute values. No-op if inactive.
    pub fn disable_soft_reset(&self) {
        if self.lock().soft_reset_baseline.take().is_some() {
            debug!(element = %self.name, "soft reset disabled");
        }
    }

    pub fn is_soft_reset_enabled(&self) -> bool {
        self.lock().soft_reset_baseline.is_some()
    }
}

impl fmt::Debug for MonitoringElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitoringElement")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
