//! Machine-readable report dump

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::record::TestResult;
use crate::summary::RunSummary;

/// JSON artifact written alongside the HTML and text reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub summary: JsonSummary,
    pub detailed_results: Vec<TestResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSummary {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub success_rate: f64,
    pub total_time: f64,
    pub generated_at: String,
}

impl JsonReport {
    /// Build the dump: aggregate once, carry the record sequence verbatim
    pub fn build(results: &[TestResult], total_time: f64) -> Self {
        let summary = RunSummary::of(results);
        Self {
            summary: JsonSummary {
                total_tests: summary.total,
                passed: summary.passed,
                failed: summary.failed,
                success_rate: summary.success_rate(),
                total_time,
                generated_at: Local::now().to_rfc3339(),
            },
            detailed_results: results.to_vec(),
        }
    }
}
