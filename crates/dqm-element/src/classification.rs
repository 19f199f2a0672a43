//! Error / warning / other buckets derived from the report map.

use std::collections::BTreeMap;

use dqm_core::{QualityReport, QualityStatus};

/// Test-name keys into an element's report map, partitioned by status.
///
/// Holds no reports of its own: it is rebuilt wholesale from the owning map
/// after every test run, so it can never point at a replaced report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationIndex {
    errors: Vec<String>,
    warnings: Vec<String>,
    others: Vec<String>,
}

impl ClassificationIndex {
    /// Partition the non-Ok reports of `reports` by status.
    pub fn build(reports: &BTreeMap<String, QualityReport>) -> Self {
        let mut index = Self::default();
        for (name, report) in reports {
            match report.status() {
                QualityStatus::Ok => {}
                QualityStatus::Error => index.errors.push(name.clone()),
                QualityStatus::Warning => index.warnings.push(name.clone()),
                QualityStatus::Other => index.others.push(name.clone()),
            }
        }
        index
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn others(&self) -> &[String] {
        &self.others
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has_others(&self) -> bool {
        !self.others.is_empty()
    }

    /// Reports named by `keys`, in key order.
    pub fn resolve(keys: &[String], reports: &BTreeMap<String, QualityReport>) -> Vec<QualityReport> {
        keys.iter()
            .filter_map(|key| reports.get(key))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, status: QualityStatus) -> (String, QualityReport) {
        (name.to_string(), QualityReport::new(name, "Test", status, ""))
    }

    #[test]
    fn build_partitions_non_ok_reports() {
        let reports: BTreeMap<_, _> = [
            report("a", QualityStatus::Ok),
            report("b", QualityStatus::Error),
            report("c", QualityStatus::Warning),
            report("d", QualityStatus::Other),
            report("e", QualityStatus::Error),
        ]
        .into_iter()
        .collect();
        let index = ClassificationIndex::build(&reports);
        assert_eq!(index.errors(), ["b", "e"]);
        assert_eq!(index.warnings(), ["c"]);
        assert_eq!(index.others(), ["d"]);
        assert!(index.has_errors() && index.has_warnings() && index.has_others());
    }

    #[test]
    fn empty_map_gives_empty_buckets() {
        let index = ClassificationIndex::build(&BTreeMap::new());
        assert_eq!(index, ClassificationIndex::default());
        assert!(!index.has_errors());
    }
}
