//! Aggregate counts and module grouping

use crate::record::TestResult;

/// Pass/fail counts over a result sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Count outcomes in one pass
    pub fn of<'a>(results: impl IntoIterator<Item = &'a TestResult>) -> Self {
        let mut total = 0;
        let mut passed = 0;
        for result in results {
            total += 1;
            if result.status.is_pass() {
                passed += 1;
            }
        }
        Self {
            total,
            passed,
            failed: total - passed,
        }
    }

    /// Percentage of passing records; 0.0 for an empty run
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Partition results by module, preserving first-seen module order.
///
/// Interleaved records still land in their module's group; the group order
/// never depends on record counts.
pub fn group_by_module(results: &[TestResult]) -> Vec<(&str, Vec<&TestResult>)> {
    let mut groups: Vec<(&str, Vec<&TestResult>)> = Vec::new();
    for result in results {
        match groups.iter_mut().find(|(module, _)| *module == result.module) {
            Some((_, members)) => members.push(result),
            None => groups.push((result.module.as_str(), vec![result])),
        }
    }
    groups
}
